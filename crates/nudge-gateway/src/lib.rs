// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP trigger surface for the Nudge notification engine.
//!
//! The engine has no internal scheduler; an external cron (or the binary's
//! opt-in ticker) POSTs to this surface once per minute to drive delivery
//! passes. Subscription registration and opt-out live here too.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use server::{build_router, start_server, GatewayState, ServerConfig};
