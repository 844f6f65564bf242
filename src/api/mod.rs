// src/api/mod.rs — HTTP surface for the solve service

pub mod auth;
pub mod handlers;
pub mod types;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;

use crate::core::history::HistoryQuery;
use crate::core::orchestrator::SolveOrchestrator;
use crate::infra::config::ServerConfig;
use crate::limit::RateLimiter;
use crate::storage::StoreHandle;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: StoreHandle,
    pub orchestrator: SolveOrchestrator,
    pub history: HistoryQuery,
    pub limiter: Arc<dyn RateLimiter>,
    pub api_token: Option<String>,
    /// Wall-clock budget for a single solve attempt.
    pub budget: Duration,
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/api/v1/solve", post(handlers::solve))
        .route("/api/v1/history", get(handlers::history))
        .route("/api/v1/problems/{id}", get(handlers::get_problem))
        .route("/api/v1/solutions/{id}", get(handlers::get_solution))
        .route("/api/v1/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Start the API server (blocking until shutdown).
pub async fn start_server(config: &ServerConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let router = build_router(state);

    tracing::info!("cvxserve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
