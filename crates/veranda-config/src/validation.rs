// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and sampling
//! parameter ranges.

use thiserror::Error;

use crate::model::VerandaConfig;

/// A configuration error surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config failed to parse or merge.
    #[error("{0}")]
    Parse(#[from] Box<figment::Error>),

    /// A semantic constraint failed after deserialization.
    #[error("{message}")]
    Validation { message: String },
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &VerandaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.gemini.api_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.api_url must not be empty".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.gemini.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.temperature must be within 0.0..=2.0, got {}",
                config.gemini.temperature
            ),
        });
    }

    if !(0.0..=1.0).contains(&config.gemini.top_p) {
        errors.push(ConfigError::Validation {
            message: format!("gemini.top_p must be within 0.0..=1.0, got {}", config.gemini.top_p),
        });
    }

    if config.gemini.max_output_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.max_output_tokens must be positive".to_string(),
        });
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.timeout_secs must be positive".to_string(),
        });
    }

    // An accidental extra zero on the typing delay would stall every reply.
    if config.agent.typing_delay_ms > 10_000 {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.typing_delay_ms must be at most 10000, got {}",
                config.agent.typing_delay_ms
            ),
        });
    }

    for (token, user) in &config.gateway.auth_tokens {
        if token.trim().is_empty() || user.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "gateway.auth_tokens entries must have non-empty token and user id"
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
