// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Push transport trait for Web Push delivery backends.

use async_trait::async_trait;

use crate::error::NudgeError;
use crate::types::{NotificationPayload, PushOptions, PushSubscription};

/// Encrypt-and-POST delivery to one push endpoint.
///
/// Implementations classify results: `Ok(())` on acceptance,
/// [`NudgeError::SubscriptionGone`] when the service reports the endpoint
/// permanently gone (404/410 equivalent), and [`NudgeError::Push`] or
/// [`NudgeError::Timeout`] for anything that might succeed later.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
        options: &PushOptions,
    ) -> Result<(), NudgeError>;
}
