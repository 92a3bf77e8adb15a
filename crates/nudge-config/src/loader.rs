// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./nudge.toml` > `~/.config/nudge/nudge.toml` >
//! `/etc/nudge/nudge.toml` with environment variable overrides via the
//! `NUDGE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::NudgeConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/nudge/nudge.toml` (system-wide)
/// 3. `~/.config/nudge/nudge.toml` (user XDG config)
/// 4. `./nudge.toml` (local directory)
/// 5. `NUDGE_*` environment variables
pub fn load_config() -> Result<NudgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NudgeConfig::default()))
        .merge(Toml::file("/etc/nudge/nudge.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("nudge/nudge.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("nudge.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<NudgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NudgeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<NudgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NudgeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `NUDGE_PUSH_VAPID_PRIVATE_KEY` must map
/// to `push.vapid_private_key`, not `push.vapid.private.key`.
fn env_provider() -> Env {
    Env::prefixed("NUDGE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: NUDGE_PUSH_VAPID_PRIVATE_KEY -> "push_vapid_private_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("engine_", "engine.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("push_", "push.", 1)
            .replacen("trigger_", "trigger.", 1);
        mapped.into()
    })
}
