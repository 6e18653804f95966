//! HTTP transport
//!
//! A thin axum layer over [`TicketLifecycleManager`]: it extracts query
//! parameters, calls the manager and renders the result or error as JSON.

mod error;
mod handlers;
mod state;

pub use error::ApiError;
pub use handlers::{EntryResponse, HealthResponse, QueryParams};
pub use state::AppState;

use crate::core::TicketLifecycleManager;
use crate::error::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/entry", post(handlers::entry))
        .route("/exit", post(handlers::exit))
        .route("/tickets/:ticket_id", get(handlers::quote))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve HTTP on `addr` until Ctrl+C
pub async fn serve(addr: &str, manager: Arc<TicketLifecycleManager>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(AppState::new(manager)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
