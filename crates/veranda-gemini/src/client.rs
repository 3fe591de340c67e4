// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.
//!
//! Provides [`GeminiClient`] which handles configuration validation,
//! request construction, and the single-shot completion call. There is no
//! retry and no streaming: a failed call is resolved by the caller through
//! the fallback responder, so the cheapest correct behavior here is to fail
//! fast with a classified error.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use veranda_config::model::GeminiConfig;
use veranda_core::{CompletionProvider, VerandaError};

use crate::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

/// Domain an acceptable endpoint URL must belong to.
const EXPECTED_API_DOMAIN: &str = "googleapis.com";

/// HTTP client for Gemini API communication.
///
/// Configuration validity is decided once at construction: a missing or
/// placeholder credential, or an endpoint off the Google API domain, marks
/// the client unconfigured and every `complete` call short-circuits with no
/// network attempt.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
    configured: bool,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini client from configuration.
    ///
    /// An invalid configuration produces an unconfigured client rather than
    /// an error, so the service always starts and the fallback responder
    /// carries the conversation. Only an HTTP client build failure errors.
    pub fn new(config: GeminiConfig) -> Result<Self, VerandaError> {
        let configured = check_configuration(&config);
        if !configured {
            warn!("Gemini API not configured -- replies will use the fallback responder");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VerandaError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let base_url = config.api_url.clone();
        Ok(Self {
            client,
            config,
            configured,
            base_url,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self.configured = true;
        self
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_k: self.config.top_k,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            },
        }
    }
}

/// Requires a non-placeholder credential and an endpoint URL on the expected
/// provider's domain.
fn check_configuration(config: &GeminiConfig) -> bool {
    let has_api_key = config
        .api_key
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty() && !key.starts_with("YOUR_"));
    let has_api_url = config.api_url.contains(EXPECTED_API_DOMAIN);
    has_api_key && has_api_url
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    /// Issues exactly one outbound request and returns the reply text.
    ///
    /// Every failure path returns an error tagged with a `kind` log event;
    /// the caller resolves all of them identically through the fallback
    /// responder, so none of these kinds are distinguishable downstream.
    async fn complete(&self, prompt: &str) -> Result<String, VerandaError> {
        if !self.configured {
            warn!(kind = "unconfigured", "completion requested without configuration");
            return Err(VerandaError::Provider {
                message: "Gemini client is not configured".to_string(),
                source: None,
            });
        }

        let request = self.build_request(prompt);
        let key = self.config.api_key.as_deref().unwrap_or_default();

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("key", key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!(kind = "timeout", timeout_secs = self.config.timeout_secs, "completion call timed out");
                    VerandaError::Timeout {
                        duration: Duration::from_secs(self.config.timeout_secs),
                    }
                } else {
                    warn!(kind = "transport", error = %e, "completion transport failure");
                    VerandaError::Provider {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(kind = "http_status", status = %status, "completion call rejected");
            return Err(VerandaError::Provider {
                message: format!("Gemini API returned {status}: {body}"),
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| {
            warn!(kind = "transport", error = %e, "failed to read completion body");
            VerandaError::Provider {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            }
        })?;

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(kind = "malformed_body", error = %e, "completion body did not parse");
            VerandaError::Provider {
                message: format!("failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            }
        })?;

        match parsed.first_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                warn!(kind = "malformed_body", "completion response carried no candidate text");
                Err(VerandaError::Provider {
                    message: "response carried no candidates[0].content.parts[0].text".to_string(),
                    source: None,
                })
            }
        }
    }
}
