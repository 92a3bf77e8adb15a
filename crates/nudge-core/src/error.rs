// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Nudge notification engine.

use thiserror::Error;

/// The primary error type used across all Nudge adapter traits and engine operations.
#[derive(Debug, Error)]
pub enum NudgeError {
    /// Configuration errors (missing VAPID key, invalid TOML, bad field values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, malformed rows).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Push transport errors that may succeed on a later attempt
    /// (network failure, unexpected status code, payload build failure).
    #[error("push error: {message}")]
    Push {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The push service reported the endpoint permanently gone (404/410).
    /// The subscription row must be deleted so future passes stop trying it.
    #[error("subscription endpoint gone: {endpoint}")]
    SubscriptionGone { endpoint: String },

    /// An outbound send exceeded its deadline. Treated as a transient failure.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NudgeError {
    /// Whether this error means the endpoint will never accept another push.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NudgeError::SubscriptionGone { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_gone_is_terminal() {
        assert!(
            NudgeError::SubscriptionGone {
                endpoint: "https://push.example/abc".into()
            }
            .is_terminal()
        );
        assert!(!NudgeError::Config("missing key".into()).is_terminal());
        assert!(
            !NudgeError::Push {
                message: "503".into(),
                source: None,
            }
            .is_terminal()
        );
        assert!(
            !NudgeError::Timeout {
                duration: std::time::Duration::from_secs(10),
            }
            .is_terminal()
        );
    }

    #[test]
    fn display_includes_endpoint() {
        let err = NudgeError::SubscriptionGone {
            endpoint: "https://push.example/abc".into(),
        };
        assert!(err.to_string().contains("https://push.example/abc"));
    }
}
