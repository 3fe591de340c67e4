// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Veranda concierge.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Veranda workspace. Collaborator
//! implementations (storage, completion provider, identity) live in their
//! own crates and implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VerandaError;
pub use types::{ConversationRecord, Hotel, ReservationSlots, Role, SessionId, Turn};

pub use traits::{CompletionProvider, ConversationStore, IdentityProvider};
