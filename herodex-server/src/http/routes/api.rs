//! JSON API endpoints, mounted under `/api`
//!
//! List endpoints answer 404 when nothing matched, so clients can tell an
//! empty search from a successful one by status alone.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::ValidHeroId;
use crate::http::server::AppState;
use crate::models::{AgeFilter, AgeFilterParams, AttributeQuery, HeroPayload};
use crate::views::{render_hero, render_hero_list, HeroEnvelope, HeroView};

type ApiResult<T> = Result<T, ApiError>;

/// GET /api/heroes
async fn list_heroes(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<HeroView>>> {
    let heroes = state
        .repo
        .get_all()
        .await
        .map_err(ApiError::store("Error al obtener todos los superhéroes"))?;

    if heroes.is_empty() {
        return Err(ApiError::not_found("No se encontraron superhéroes"));
    }
    Ok(Json(render_hero_list(&heroes)))
}

/// GET /api/heroes/{id}
async fn get_hero(
    State(state): State<Arc<AppState>>,
    ValidHeroId(id): ValidHeroId,
) -> ApiResult<Json<HeroView>> {
    let hero = state
        .repo
        .get_by_id(id)
        .await
        .map_err(ApiError::store("Error al obtener el superhéroe"))?
        .ok_or_else(|| ApiError::not_found("Superhéroe no encontrado"))?;

    Ok(Json(render_hero(&hero)))
}

/// GET /api/heroes/buscar/{atributo}/{valor}
async fn search_by_attribute(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult<Json<Vec<HeroView>>> {
    let Path((atributo, valor)) = path.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let query = AttributeQuery::parse(&atributo, &valor)?;
    tracing::debug!(attribute = %query.attribute, value = %valor, "Searching heroes by attribute");

    let heroes = state
        .repo
        .find_by_attribute(&query)
        .await
        .map_err(ApiError::store("Error al buscar superhéroes por atributo"))?;

    if heroes.is_empty() {
        return Err(ApiError::not_found(
            "No se encontraron superhéroes con ese atributo",
        ));
    }
    Ok(Json(render_hero_list(&heroes)))
}

/// GET /api/heroes/mayores-30?edad=&planetaOrigen=&minPoderes=
async fn older_than(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AgeFilterParams>, QueryRejection>,
) -> ApiResult<Json<Vec<HeroView>>> {
    let Query(params) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let filter = AgeFilter::from_params(&params)?;

    let heroes = state
        .repo
        .find_older_than(&filter)
        .await
        .map_err(ApiError::store("Error al obtener superhéroes filtrados por edad"))?;

    if heroes.is_empty() {
        return Err(ApiError::not_found(format!(
            "No se encontraron superhéroes mayores de {} años",
            filter.older_than
        )));
    }
    Ok(Json(render_hero_list(&heroes)))
}

/// POST /api/heroes
async fn create_hero(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<HeroPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<HeroEnvelope>)> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let hero = payload.validate_new()?;

    let created = state
        .repo
        .create(hero)
        .await
        .map_err(ApiError::store("Error al crear superhéroe"))?;

    tracing::info!(id = %created.id, alias = %created.fields.alias, "Hero created");
    Ok((
        StatusCode::CREATED,
        Json(HeroEnvelope::new("Superhéroe creado correctamente", &created)),
    ))
}

/// PUT /api/heroes/{id}
async fn update_hero(
    State(state): State<Arc<AppState>>,
    ValidHeroId(id): ValidHeroId,
    payload: Result<Json<HeroPayload>, JsonRejection>,
) -> ApiResult<Json<HeroEnvelope>> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let patch = payload.validate_update()?;

    let updated = state
        .repo
        .update_by_id(id, patch)
        .await
        .map_err(ApiError::store("Error al actualizar superhéroe"))?
        .ok_or_else(|| ApiError::not_found("Superhéroe no encontrado"))?;

    tracing::info!(id = %id, "Hero updated");
    Ok(Json(HeroEnvelope::new(
        "Superhéroe actualizado correctamente",
        &updated,
    )))
}

/// DELETE /api/heroes/{id}
async fn delete_hero(
    State(state): State<Arc<AppState>>,
    ValidHeroId(id): ValidHeroId,
) -> ApiResult<Json<HeroEnvelope>> {
    let deleted = state
        .repo
        .delete_by_id(id)
        .await
        .map_err(ApiError::store("Error al eliminar superhéroe"))?
        .ok_or_else(|| ApiError::not_found("Superhéroe no encontrado"))?;

    tracing::info!(id = %id, "Hero deleted");
    Ok(Json(HeroEnvelope::new(
        "Superhéroe eliminado correctamente",
        &deleted,
    )))
}

/// API routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/heroes", get(list_heroes).post(create_hero))
        .route("/heroes/mayores-30", get(older_than))
        .route("/heroes/buscar/{atributo}/{valor}", get(search_by_attribute))
        .route(
            "/heroes/{id}",
            get(get_hero).put(update_hero).delete(delete_hero),
        )
}
