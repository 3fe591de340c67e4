// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini completion provider for the Veranda concierge.
//!
//! Wraps the `generateContent` endpoint behind the workspace
//! [`CompletionProvider`](veranda_core::CompletionProvider) seam. The client
//! is single-shot: one outbound request per turn, bounded by a configurable
//! timeout, with every failure mode surfaced as an error the orchestrator
//! resolves through the fallback responder.

pub mod client;
pub mod types;

pub use client::GeminiClient;
