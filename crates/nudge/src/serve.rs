// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nudge serve` command implementation.
//!
//! Starts the trigger HTTP server backed by SQLite storage and the Web Push
//! transport. When `trigger.internal_ticker` is enabled, a once-per-minute
//! ticker drives delivery passes without any external scheduler.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use nudge_config::NudgeConfig;
use nudge_core::{NudgeError, PushOptions};
use nudge_engine::{Dispatcher, EngineStores};
use nudge_gateway::{start_server, AuthConfig, GatewayState, ServerConfig};
use nudge_storage::SqliteStore;
use nudge_webpush::WebPushTransport;

/// Wire the dispatcher from storage and configuration.
///
/// Fails when `push.vapid_private_key` is unset; no pass can deliver
/// anything without it, so refusing to start beats failing every minute.
pub(crate) fn build_dispatcher(
    store: &SqliteStore,
    config: &NudgeConfig,
) -> Result<Dispatcher, NudgeError> {
    let transport = WebPushTransport::new(&config.push)?;

    let stores = EngineStores {
        schedules: Arc::new(store.clone()),
        completions: Arc::new(store.clone()),
        reminders: Arc::new(store.clone()),
        subscriptions: Arc::new(store.clone()),
        catalog: Arc::new(store.clone()),
    };

    let options = PushOptions {
        ttl_secs: config.push.ttl_secs,
        timeout: Duration::from_secs(config.push.send_timeout_secs),
    };

    Ok(Dispatcher::new(
        stores,
        Arc::new(transport),
        options,
        config.engine.concurrency,
    ))
}

/// Runs the `nudge serve` command.
///
/// Binds the trigger surface, optionally spawns the internal ticker, and
/// runs until SIGINT.
pub async fn run_serve(config: NudgeConfig) -> Result<(), NudgeError> {
    info!("starting nudge serve");

    let store = SqliteStore::open(&config.storage).await?;
    let dispatcher = Arc::new(build_dispatcher(&store, &config)?);

    let state = GatewayState {
        dispatcher: Arc::clone(&dispatcher),
        subscriptions: Arc::new(store.clone()),
        auth: AuthConfig {
            shared_secret: config.trigger.shared_secret.clone(),
        },
        start_time: std::time::Instant::now(),
    };

    let server_config = ServerConfig {
        host: config.trigger.bind_address.clone(),
        port: config.trigger.port,
    };

    let ticker = if config.trigger.internal_ticker {
        Some(tokio::spawn(run_ticker(Arc::clone(&dispatcher))))
    } else {
        info!("internal ticker disabled, expecting an external scheduler");
        None
    };

    let result = tokio::select! {
        result = start_server(&server_config, state) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            Ok(())
        }
    };

    if let Some(ticker) = ticker {
        ticker.abort();
    }
    store.close().await?;

    info!("nudge serve shutdown complete");
    result
}

/// Once-per-minute delivery loop. Pass failures are logged and the loop
/// continues; a transient storage hiccup must not kill the ticker.
async fn run_ticker(dispatcher: Arc<Dispatcher>) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    // Skip the first immediate tick.
    interval.tick().await;

    loop {
        interval.tick().await;
        if let Err(e) = dispatcher.run_pass(Utc::now()).await {
            warn!(error = %e, "ticker delivery pass failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_dispatcher_requires_vapid_key() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        let config = NudgeConfig::default();

        let err = build_dispatcher(&store, &config).unwrap_err();
        assert!(matches!(err, NudgeError::Config(_)));
    }

    #[tokio::test]
    async fn build_dispatcher_succeeds_with_key() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        let mut config = NudgeConfig::default();
        // Any syntactically valid URL-safe base64 P-256 scalar works here;
        // the key is only exercised at send time.
        config.push.vapid_private_key =
            Some("HkAehs55PrF35rnJ0gE9eiFHTzQvyLe1SCzpn2QadcI".to_string());

        assert!(build_dispatcher(&store, &config).is_ok());
    }
}
