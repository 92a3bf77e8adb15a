// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per table.

pub mod activities;
pub mod completions;
pub mod reminders;
pub mod schedules;
pub mod subscriptions;

/// Wrap a chrono parse failure as a rusqlite conversion error so it can be
/// propagated out of a row-mapping closure.
pub(crate) fn conversion_err<E>(column: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
}
