// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trigger HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the trigger surface.

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use nudge_core::{NudgeError, SubscriptionStore};
use nudge_engine::Dispatcher;

use crate::auth::{auth_middleware, AuthConfig};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Drives delivery passes for the trigger routes.
    pub dispatcher: Arc<Dispatcher>,
    /// Subscription lifecycle for the registration routes.
    pub subscriptions: Arc<dyn SubscriptionStore>,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

/// Trigger server configuration (mirrors `TriggerConfig` from nudge-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Build the trigger router.
///
/// - `GET /health` is public (process supervisors probe it).
/// - Everything under `/v1` sits behind the shared-secret middleware.
pub fn build_router(state: GatewayState) -> Router {
    let auth_state = state.auth.clone();

    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/v1/pass", post(handlers::post_pass))
        .route("/v1/force-send", post(handlers::post_force_send))
        .route("/v1/status", get(handlers::get_status))
        .route(
            "/v1/subscriptions",
            post(handlers::post_subscriptions).delete(handlers::delete_subscriptions),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
}

/// Bind and serve the trigger surface until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), NudgeError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| NudgeError::Internal(format!("failed to bind trigger server to {addr}: {e}")))?;

    tracing::info!("trigger server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| NudgeError::Internal(format!("trigger server error: {e}")))?;

    Ok(())
}
