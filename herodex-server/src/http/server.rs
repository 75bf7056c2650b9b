//! Axum server setup
//!
//! Router with:
//! - HTML pages at the root, JSON API under `/api`
//! - Static assets for any other GET, JSON 404 when nothing matches
//! - Tracing, request timeout and CORS middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::handler::HandlerWithoutStateExt;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::ServerConfig;
use crate::db::HeroRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn HeroRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn HeroRepository>) -> Self {
        Self { repo }
    }
}

/// Router-level settings, split from [`ServerConfig`] so tests can build a
/// router without a bind address or database URI.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Directory served for unmatched GET requests
    pub static_dir: PathBuf,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Allow any origin (default: same-origin only)
    pub cors_permissive: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("public"),
            request_timeout: Duration::from_secs(30),
            cors_permissive: false,
        }
    }
}

impl From<&ServerConfig> for RouterConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            static_dir: config.static_dir.clone(),
            request_timeout: config.request_timeout,
            cors_permissive: config.cors_permissive,
        }
    }
}

/// Build the application router with all routes.
pub fn build_router(repo: Arc<dyn HeroRepository>, config: &RouterConfig) -> Router {
    let state = Arc::new(AppState::new(repo));

    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_methods(Any).allow_headers(Any)
    };

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors);

    let static_files = ServeDir::new(&config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(routes::not_found.into_service());

    let api = Router::new()
        .merge(routes::health::router())
        .merge(routes::api::router());

    Router::new()
        .merge(routes::pages::router())
        .nest("/api", api)
        .fallback_service(static_files)
        .layer(middleware)
        .with_state(state)
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let storage = Storage::open(&config.storage).await?;
/// let repo = Arc::new(MongoHeroRepo::new(&storage));
/// run_server(repo, &config).await?;
/// storage.close().await;
/// ```
pub async fn run_server(
    repo: Arc<dyn HeroRepository>,
    config: &ServerConfig,
) -> Result<(), ServerError> {
    let app = build_router(repo, &RouterConfig::from(config));

    let listener = TcpListener::bind(config.bind_addr).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!(static_dir = %config.static_dir.display(), "Servidor escuchando en {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
