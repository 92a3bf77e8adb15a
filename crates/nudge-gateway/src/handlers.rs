// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the trigger REST API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use nudge_core::PushSubscription;

use crate::server::GatewayState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Response body for GET /v1/status.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub subscriptions: usize,
    pub uptime_secs: u64,
}

/// Query parameters for DELETE /v1/subscriptions.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub endpoint: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn internal_error(context: &str, e: impl std::fmt::Display) -> Response {
    error!(error = %e, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("{context}: {e}"),
        }),
    )
        .into_response()
}

/// GET /health (public, for process supervisors).
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// POST /v1/pass — one scheduled delivery pass, now.
pub async fn post_pass(State(state): State<GatewayState>) -> Response {
    match state.dispatcher.run_pass(Utc::now()).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => internal_error("delivery pass failed", e),
    }
}

/// POST /v1/force-send — debug pass that skips eligibility.
pub async fn post_force_send(State(state): State<GatewayState>) -> Response {
    match state.dispatcher.force_send(Utc::now()).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => internal_error("force send failed", e),
    }
}

/// GET /v1/status — subscription count and uptime.
pub async fn get_status(State(state): State<GatewayState>) -> Response {
    match state.subscriptions.list_subscriptions().await {
        Ok(subs) => Json(StatusResponse {
            subscriptions: subs.len(),
            uptime_secs: state.start_time.elapsed().as_secs(),
        })
        .into_response(),
        Err(e) => internal_error("failed to list subscriptions", e),
    }
}

/// POST /v1/subscriptions — register or refresh one endpoint.
pub async fn post_subscriptions(
    State(state): State<GatewayState>,
    Json(subscription): Json<PushSubscription>,
) -> Response {
    match state.subscriptions.upsert_subscription(&subscription).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => internal_error("failed to store subscription", e),
    }
}

/// DELETE /v1/subscriptions?endpoint= — explicit opt-out.
pub async fn delete_subscriptions(
    State(state): State<GatewayState>,
    Query(params): Query<DeleteParams>,
) -> Response {
    match state.subscriptions.delete_subscription(&params.endpoint).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => internal_error("failed to delete subscription", e),
    }
}
