// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Nudge notification engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Nudge configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NudgeConfig {
    /// Engine-wide behavior settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Web Push transport settings.
    #[serde(default)]
    pub push: PushConfig,

    /// External trigger surface settings.
    #[serde(default)]
    pub trigger: TriggerConfig,
}

/// Engine-wide behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum number of subscriptions processed concurrently per pass.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_concurrency() -> usize {
    8
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("nudge").join("nudge.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("nudge.db"))
        .to_string_lossy()
        .into_owned()
}

/// Web Push transport configuration.
///
/// The VAPID private key is required for any delivery; a pass aborts with a
/// configuration error before attempting a single send when it is absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PushConfig {
    /// URL-safe base64 VAPID private key. `None` disables delivery.
    #[serde(default)]
    pub vapid_private_key: Option<String>,

    /// VAPID subject (`mailto:` or origin URL) sent to push services.
    #[serde(default = "default_vapid_subject")]
    pub vapid_subject: String,

    /// Push service TTL in seconds. Short by design: a missed check-in is
    /// stale within minutes.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u32,

    /// Deadline in seconds for one send attempt.
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            vapid_private_key: None,
            vapid_subject: default_vapid_subject(),
            ttl_secs: default_ttl_secs(),
            send_timeout_secs: default_send_timeout_secs(),
        }
    }
}

fn default_vapid_subject() -> String {
    "mailto:push@nudge.app".to_string()
}

fn default_ttl_secs() -> u32 {
    60
}

fn default_send_timeout_secs() -> u64 {
    10
}

/// External trigger surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerConfig {
    /// Address to bind the trigger server to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to bind the trigger server to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared secret required as a bearer token on trigger routes.
    /// `None` leaves the surface open (deployment concern).
    #[serde(default)]
    pub shared_secret: Option<String>,

    /// Run the internal once-per-minute ticker under `nudge serve`.
    /// Disable when an external scheduler (cron or similar) drives passes.
    #[serde(default = "default_internal_ticker")]
    pub internal_ticker: bool,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            shared_secret: None,
            internal_ticker: default_internal_ticker(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7667
}

fn default_internal_ticker() -> bool {
    true
}
