//! LANEDRAFT Server - HTTP API for draft clients
//!
//! This crate provides the web backend:
//! - Two-team match generation
//! - Bracket pool validation and generation
//! - Status and generation counters
//!
//! Generation is CPU-bound and synchronous, so each request runs it on the
//! blocking thread pool.

mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use lanedraft_core::GeneratorConfig;

pub use routes::ErrorResponse;
pub use state::{GenerationStats, ServerState};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub generator: GeneratorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8040,
            generator: GeneratorConfig::server(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Two-team match
        .route("/api/match", post(routes::matchup::generate_match))
        // Bracket API
        .route(
            "/api/bracket/validate",
            post(routes::bracket::validate_pool),
        )
        .route("/api/bracket", post(routes::bracket::generate_bracket))
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(config.generator.clone()));
    let router = create_router(state);

    tracing::info!("LANEDRAFT Server starting on http://0.0.0.0:{}", config.port);
    tracing::info!(
        "Match policy: {:?}, bracket policy: {:?}",
        config.generator.match_policy,
        config.generator.bracket_policy
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
