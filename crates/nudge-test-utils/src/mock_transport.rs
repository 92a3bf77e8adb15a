// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock push transport with scripted outcomes and payload capture.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use nudge_core::{NotificationPayload, NudgeError, PushOptions, PushSubscription, PushTransport};

/// What the mock transport should report for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Delivery accepted.
    Ok,
    /// The push service reports the endpoint permanently gone.
    Gone,
    /// A retryable failure (5xx, connection reset).
    Transient,
    /// The send attempt timed out.
    TimedOut,
}

/// Push transport that records every send and replays scripted outcomes.
///
/// Endpoints without a script succeed. Cloning shares captures and scripts.
#[derive(Clone, Default)]
pub struct MockTransport {
    outcomes: Arc<Mutex<HashMap<String, SendOutcome>>>,
    sent: Arc<Mutex<Vec<(String, NotificationPayload)>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome for one endpoint.
    pub async fn script(&self, endpoint: &str, outcome: SendOutcome) {
        self.outcomes
            .lock()
            .await
            .insert(endpoint.to_string(), outcome);
    }

    /// Every `(endpoint, payload)` pair handed to `send`, in order.
    pub async fn sent(&self) -> Vec<(String, NotificationPayload)> {
        self.sent.lock().await.clone()
    }

    /// Payloads sent to one endpoint.
    pub async fn sent_to(&self, endpoint: &str) -> Vec<NotificationPayload> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(e, _)| e == endpoint)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

#[async_trait]
impl PushTransport for MockTransport {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
        _options: &PushOptions,
    ) -> Result<(), NudgeError> {
        self.sent
            .lock()
            .await
            .push((subscription.endpoint.clone(), payload.clone()));

        let outcome = self
            .outcomes
            .lock()
            .await
            .get(&subscription.endpoint)
            .copied()
            .unwrap_or(SendOutcome::Ok);

        match outcome {
            SendOutcome::Ok => Ok(()),
            SendOutcome::Gone => Err(NudgeError::SubscriptionGone {
                endpoint: subscription.endpoint.clone(),
            }),
            SendOutcome::Transient => Err(NudgeError::Push {
                message: "scripted transient failure".to_string(),
                source: None,
            }),
            SendOutcome::TimedOut => Err(NudgeError::Timeout {
                duration: Duration::from_secs(10),
            }),
        }
    }
}
