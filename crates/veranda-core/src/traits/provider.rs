// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for LLM endpoint integrations.

use async_trait::async_trait;

use crate::error::VerandaError;

/// Adapter for a text-completion endpoint.
///
/// A provider takes one fully assembled prompt and returns one reply. There
/// is no streaming and no retry at this seam; every failure mode is an error
/// the caller resolves through the fallback responder.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Returns false when the provider lacks a usable credential or endpoint.
    ///
    /// Callers must not invoke [`complete`](Self::complete) on an
    /// unconfigured provider; doing so returns an error without any network
    /// attempt.
    fn is_configured(&self) -> bool;

    /// Sends one completion request and returns the reply text.
    async fn complete(&self, prompt: &str) -> Result<String, VerandaError>;
}
