//! HTTP error types with IntoResponse
//!
//! `ApiError` answers with `{ "mensaje": ... }` JSON bodies; `PageError`
//! answers browser routes with plain text. Storage failures are logged with
//! their cause and reported to the client as a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::db::StoreError;
use crate::models::{ValidationError, ValidationErrors};
use crate::views::{Message, ValidationReport};

/// Error raised by JSON API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request fields failed validation (400)
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Path id is not an ObjectId (400)
    #[error("invalid id")]
    InvalidId,

    /// Body could not be read at all (400)
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Nothing matched (404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Store failed (500, logged)
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Attach a log context to a store failure.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { context, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationReport {
                    mensaje: "Datos inválidos".to_string(),
                    errores: errors.field_errors(),
                }),
            )
                .into_response(),
            Self::InvalidId => {
                (StatusCode::BAD_REQUEST, Json(Message::new("ID no válido"))).into_response()
            }
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(Message::new(message))).into_response()
            }
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(Message::new(message))).into_response()
            }
            Self::Store { context, source } => {
                tracing::error!(error = %source, "{}", context);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Message::new("Error interno del servidor")),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.into())
    }
}

/// Error raised by HTML page handlers
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Form fields failed validation (400)
    #[error("invalid form: {0}")]
    Invalid(ValidationErrors),

    /// Path id is not an ObjectId (400)
    #[error("invalid id")]
    InvalidId,

    /// Form body could not be read at all (400)
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Record absent (404)
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Store failed (500, logged); `message` is shown to the user
    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl PageError {
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { message, source }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(errors) => {
                let mut body = String::from("Faltan datos obligatorios.");
                for e in errors.iter() {
                    body.push_str("\n- ");
                    body.push_str(&e.to_string());
                }
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            Self::InvalidId => (StatusCode::BAD_REQUEST, "ID no válido").into_response(),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            Self::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

impl From<ValidationErrors> for PageError {
    fn from(e: ValidationErrors) -> Self {
        Self::Invalid(e)
    }
}
