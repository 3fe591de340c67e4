// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reservation slot filling, prompt assembly, fallback rules, and the turn
//! orchestrator for the Veranda concierge.
//!
//! The flow per incoming message: the slot extractor updates the session's
//! reservation state, the prompt builder assembles a completion request over
//! the running transcript, and the orchestrator either calls the completion
//! provider or answers from the deterministic fallback rule table, then
//! persists the turn pair.

pub mod catalog;
pub mod fallback;
pub mod orchestrator;
pub mod prompt;
pub mod slots;

pub use fallback::FallbackResponder;
pub use orchestrator::{BookingStage, TurnOrchestrator, TurnOutcome};
pub use prompt::PromptBuilder;
pub use slots::{extract, Extraction};
