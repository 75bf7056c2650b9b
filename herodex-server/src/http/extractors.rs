//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::HeroId;

/// Extract and validate a hero id from path
pub struct ValidHeroId(pub HeroId);

impl<S> FromRequestParts<S> for ValidHeroId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;

        let id = HeroId::parse(&id).map_err(|e| {
            tracing::debug!(id = %id, reason = %e, "Rejected hero id");
            ApiError::InvalidId
        })?;

        Ok(Self(id))
    }
}
