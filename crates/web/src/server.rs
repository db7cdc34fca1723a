//! Storefront HTTP server.

use std::future::Future;
use std::sync::Arc;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use tracing::{debug, info};

use vitrine_core::ports::CartService;
use vitrine_core::services::ListingService;

use crate::routes;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Listing page loader.
    pub listing: Arc<ListingService>,
    /// Remote cart port; each submission wraps it in a fresh boundary.
    pub cart: Arc<dyn CartService>,
}

impl AppState {
    pub fn new(listing: Arc<ListingService>, cart: Arc<dyn CartService>) -> Self {
        Self { listing, cart }
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/products") }))
        .route("/products", get(routes::products_page))
        .route("/cart", post(routes::cart_action))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Start the storefront server.
pub async fn serve(state: AppState, config: ServerConfig) -> Result<(), std::io::Error> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🛍️  Storefront listening on http://{}", addr);

    axum::serve(listener, app).await
}

/// Start the storefront server with graceful shutdown support.
pub async fn serve_with_shutdown<F>(
    state: AppState,
    config: ServerConfig,
    shutdown_signal: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    debug!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
