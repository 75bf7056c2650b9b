//! HTTP server layer
//!
//! Axum server with:
//! - HTML pages and form posts for the browser
//! - JSON API under `/api`
//! - Request tracing and graceful shutdown
//! - JSON / plain text error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::{ApiError, PageError};
pub use server::{build_router, run_server, AppState, RouterConfig, ServerError};
