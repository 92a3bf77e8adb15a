// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Nudge notification engine: context building, message generation,
//! delivery scheduling, and the push dispatcher.
//!
//! Everything here is pure or trait-driven; concrete storage and
//! transport implementations are injected through the `nudge-core`
//! adapter traits.

pub mod context;
pub mod dispatcher;
pub mod message;
pub mod scheduler;

pub use context::build_context;
pub use dispatcher::{Dispatcher, EngineStores};
pub use message::{generate, generic_check_in};
pub use scheduler::{is_eligible, local_clock};
