// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web Push transport crate for the Nudge notification engine.

pub mod transport;

pub use transport::WebPushTransport;
