// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication middleware for the trigger surface.
//!
//! A single optional shared secret checked as a bearer token. When no
//! secret is configured the surface is open; keeping it reachable only
//! from trusted networks is a deployment concern.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Authentication configuration for the trigger routes.
#[derive(Clone)]
pub struct AuthConfig {
    /// Expected bearer token. `None` leaves the surface open.
    pub shared_secret: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "shared_secret",
                &self.shared_secret.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Middleware that validates the shared-secret bearer token.
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(ref expected) = auth.shared_secret else {
        return Ok(next.run(request).await);
    };

    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if token == expected => Ok(next.run(request).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
