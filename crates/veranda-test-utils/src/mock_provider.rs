// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with pre-configured
//! responses, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use veranda_core::{CompletionProvider, VerandaError};

/// A mock completion provider that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a default
/// "mock reply" text is returned. An unconfigured mock errors on every call,
/// mirroring the real client's short-circuit.
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    configured: bool,
}

impl MockProvider {
    /// Create a configured mock with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            configured: true,
        }
    }

    /// Create a configured mock pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            configured: true,
        }
    }

    /// Create a mock that reports itself unconfigured.
    pub fn unconfigured() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            configured: false,
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, _prompt: &str) -> Result<String, VerandaError> {
        if !self.configured {
            return Err(VerandaError::Provider {
                message: "mock provider is not configured".to_string(),
                source: None,
            });
        }
        Ok(self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock reply".to_string()))
    }
}
