//! Route handlers organized by surface

pub mod api;
pub mod health;
pub mod pages;

use axum::http::StatusCode;
use axum::Json;

use crate::views::Message;

/// Catch-all for anything no route or static file matched
pub async fn not_found() -> (StatusCode, Json<Message>) {
    (StatusCode::NOT_FOUND, Json(Message::new("Ruta no encontrada")))
}
