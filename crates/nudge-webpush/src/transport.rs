// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `PushTransport` over the `web-push` crate.
//!
//! VAPID signing and aes128gcm payload encryption are handled by the
//! library; this module maps its error surface onto the workspace's
//! terminal/transient classification.

use async_trait::async_trait;
use tracing::debug;
use web_push::{
    ContentEncoding, IsahcWebPushClient, SubscriptionInfo, Urgency, VapidSignatureBuilder,
    WebPushClient, WebPushError, WebPushMessageBuilder,
};

use nudge_config::model::PushConfig;
use nudge_core::{NotificationPayload, NudgeError, PushOptions, PushSubscription, PushTransport};

/// Web Push delivery backed by VAPID-signed requests to browser push
/// services.
#[derive(Clone)]
pub struct WebPushTransport {
    client: IsahcWebPushClient,
    vapid_private_key: String,
    subject: String,
}

impl std::fmt::Debug for WebPushTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebPushTransport")
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

impl WebPushTransport {
    /// Build the transport from configuration.
    ///
    /// Fails with [`NudgeError::Config`] when no VAPID private key is
    /// configured; a pass must abort before attempting a single send.
    pub fn new(config: &PushConfig) -> Result<Self, NudgeError> {
        let vapid_private_key = config
            .vapid_private_key
            .clone()
            .ok_or_else(|| NudgeError::Config("push.vapid_private_key is not set".to_string()))?;

        let client = IsahcWebPushClient::new().map_err(|e| NudgeError::Push {
            message: "failed to construct push client".to_string(),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            vapid_private_key,
            subject: config.vapid_subject.clone(),
        })
    }

    fn build_message(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
    ) -> Result<(SubscriptionInfo, Vec<u8>), NudgeError> {
        let info = SubscriptionInfo::new(
            &subscription.endpoint,
            &subscription.keys.p256dh,
            &subscription.keys.auth,
        );
        let body = serde_json::to_vec(payload).map_err(|e| NudgeError::Push {
            message: "failed to encode notification payload".to_string(),
            source: Some(Box::new(e)),
        })?;
        Ok((info, body))
    }
}

#[async_trait]
impl PushTransport for WebPushTransport {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
        options: &PushOptions,
    ) -> Result<(), NudgeError> {
        let (info, body) = self.build_message(subscription, payload)?;

        let mut signature =
            VapidSignatureBuilder::from_base64(&self.vapid_private_key, &info)
                .map_err(|e| classify_error(e, &subscription.endpoint))?;
        signature.add_claim("sub", self.subject.as_str());
        let signature = signature
            .build()
            .map_err(|e| classify_error(e, &subscription.endpoint))?;

        let mut builder = WebPushMessageBuilder::new(&info);
        builder.set_vapid_signature(signature);
        builder.set_payload(ContentEncoding::Aes128Gcm, &body);
        builder.set_ttl(options.ttl_secs);
        // A missed check-in is time-sensitive; ask the service to wake
        // the device.
        builder.set_urgency(Urgency::High);
        let message = builder
            .build()
            .map_err(|e| classify_error(e, &subscription.endpoint))?;

        let result = tokio::time::timeout(options.timeout, self.client.send(message)).await;
        match result {
            Ok(Ok(())) => {
                debug!(endpoint = %subscription.endpoint, "push accepted");
                Ok(())
            }
            Ok(Err(e)) => Err(classify_error(e, &subscription.endpoint)),
            Err(_) => Err(NudgeError::Timeout {
                duration: options.timeout,
            }),
        }
    }
}

/// Map a library error onto the workspace classification. Only endpoint
/// loss (404/410 equivalents) is terminal; everything else might succeed
/// on a later pass.
fn classify_error(e: WebPushError, endpoint: &str) -> NudgeError {
    match e {
        WebPushError::EndpointNotValid { .. } | WebPushError::EndpointNotFound { .. } => {
            NudgeError::SubscriptionGone {
                endpoint: endpoint.to_string(),
            }
        }
        other => NudgeError::Push {
            message: other.to_string(),
            source: Some(Box::new(other)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> PushConfig {
        PushConfig {
            vapid_private_key: key.map(str::to_string),
            ..PushConfig::default()
        }
    }

    // `web_push` 0.11 keeps `ErrorInfo` unexported; it is `Deserialize`,
    // so build it through serde and let the variant constructors at the
    // call sites pin the type.
    fn error_info<T: serde::de::DeserializeOwned>(code: u16) -> T {
        serde_json::from_value(serde_json::json!({
            "code": code,
            "errno": code,
            "error": "",
            "message": "",
        }))
        .unwrap()
    }

    #[test]
    fn missing_vapid_key_is_a_config_error() {
        let err = WebPushTransport::new(&config_with_key(None)).unwrap_err();
        assert!(matches!(err, NudgeError::Config(_)));
        assert!(err.to_string().contains("vapid_private_key"));
    }

    #[test]
    fn endpoint_loss_classifies_as_terminal() {
        let gone = classify_error(WebPushError::EndpointNotFound(error_info(410)), "https://e/1");
        assert!(gone.is_terminal());
        let invalid =
            classify_error(WebPushError::EndpointNotValid(error_info(404)), "https://e/1");
        assert!(invalid.is_terminal());
    }

    #[test]
    fn other_errors_classify_as_transient() {
        for err in [
            WebPushError::InvalidUri,
            WebPushError::PayloadTooLarge,
            WebPushError::BadRequest(error_info(400)),
        ] {
            let classified = classify_error(err, "https://e/1");
            assert!(!classified.is_terminal());
            assert!(matches!(classified, NudgeError::Push { .. }));
        }
    }

    #[test]
    fn terminal_error_carries_the_endpoint() {
        let err = classify_error(
            WebPushError::EndpointNotFound(error_info(410)),
            "https://push.example/abc",
        );
        assert!(err.to_string().contains("https://push.example/abc"));
    }
}
