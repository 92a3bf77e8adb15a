// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Nudge integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without a real database or push service.
//!
//! # Components
//!
//! - [`MockStore`] - In-memory fixture implementing every store trait,
//!   with switches to fail individual read paths
//! - [`MockTransport`] - Push transport with scripted per-endpoint
//!   outcomes and payload capture

pub mod mock_store;
pub mod mock_transport;

pub use mock_store::MockStore;
pub use mock_transport::{MockTransport, SendOutcome};
