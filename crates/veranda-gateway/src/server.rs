// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use veranda_concierge::TurnOrchestrator;
use veranda_core::{ConversationStore, IdentityProvider, VerandaError};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The per-session turn state machine.
    pub orchestrator: Arc<TurnOrchestrator>,
    /// Conversation persistence, for the read endpoints.
    pub store: Arc<dyn ConversationStore>,
    /// Upstream identity resolution.
    pub identity: Arc<dyn IdentityProvider>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the gateway router over the shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::post_chat))
        .route("/api/chat/select", post(handlers::post_select_hotel))
        .route("/api/conversations", get(handlers::list_conversations))
        .route("/api/conversations/{session_id}", get(handlers::get_conversation))
        .route("/api/hotels", get(handlers::get_hotels))
        .route("/api/health", get(handlers::get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server and serve until the process exits.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), VerandaError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| VerandaError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| VerandaError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
