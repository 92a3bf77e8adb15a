// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and positive
//! bounds on TTLs and timeouts.

use crate::diagnostic::ConfigError;
use crate::model::NudgeConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &NudgeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate bind_address is not empty
    if config.trigger.bind_address.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "trigger.bind_address must not be empty".to_string(),
        });
    }

    // Validate bind_address looks like a valid IP or hostname
    if !config.trigger.bind_address.trim().is_empty() {
        let addr = config.trigger.bind_address.trim();
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "trigger.bind_address `{addr}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.engine.concurrency < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "engine.concurrency must be at least 1, got {}",
                config.engine.concurrency
            ),
        });
    }

    if config.push.ttl_secs < 1 {
        errors.push(ConfigError::Validation {
            message: format!("push.ttl_secs must be at least 1, got {}", config.push.ttl_secs),
        });
    }

    if config.push.send_timeout_secs < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "push.send_timeout_secs must be at least 1, got {}",
                config.push.send_timeout_secs
            ),
        });
    }

    // A VAPID subject must be a mailto: URI or an https origin per RFC 8292.
    let subject = config.push.vapid_subject.trim();
    if !subject.is_empty() && !subject.starts_with("mailto:") && !subject.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!(
                "push.vapid_subject must start with `mailto:` or `https://`, got `{subject}`"
            ),
        });
    }

    if let Some(secret) = &config.trigger.shared_secret {
        if secret.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "trigger.shared_secret must not be empty when set; omit it to leave the \
                          trigger surface open"
                    .to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = NudgeConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = NudgeConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))));
    }

    #[test]
    fn zero_ttl_fails_validation() {
        let mut config = NudgeConfig::default();
        config.push.ttl_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("ttl_secs"))));
    }

    #[test]
    fn zero_concurrency_fails_validation() {
        let mut config = NudgeConfig::default();
        config.engine.concurrency = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("concurrency"))));
    }

    #[test]
    fn bad_vapid_subject_fails_validation() {
        let mut config = NudgeConfig::default();
        config.push.vapid_subject = "push@nudge.app".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("vapid_subject"))));
    }

    #[test]
    fn empty_shared_secret_fails_validation() {
        let mut config = NudgeConfig::default();
        config.trigger.shared_secret = Some("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("shared_secret"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = NudgeConfig::default();
        config.trigger.bind_address = "0.0.0.0".to_string();
        config.storage.database_path = "/tmp/test.db".to_string();
        config.push.vapid_private_key = Some("dGVzdA".to_string());
        config.push.vapid_subject = "https://nudge.example".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
