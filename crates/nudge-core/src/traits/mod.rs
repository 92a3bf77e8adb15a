// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the engine's seams.
//!
//! The engine never talks to SQLite or the push service directly; it goes
//! through these traits so tests can substitute in-memory fakes.

pub mod push;
pub mod store;

pub use push::PushTransport;
pub use store::{
    ActivityCatalog, CompletionStore, ReminderStore, ScheduleStore, SubscriptionStore,
};
