// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation store trait for persistence backends.

use async_trait::async_trait;

use crate::error::VerandaError;
use crate::types::{ConversationRecord, Turn};

/// Adapter for conversation persistence.
///
/// `append` is a full upsert at the storage layer: each call persists a
/// complete record holding the turns passed to that call (the user/assistant
/// pair), and `get_latest` returns the most recently written record for the
/// session. Last write wins; there is no message-level merge.
#[async_trait]
pub trait ConversationStore: Send + Sync + 'static {
    /// Initializes the backend (migrations, connection setup).
    async fn initialize(&self) -> Result<(), VerandaError>;

    /// Closes the backend, flushing pending writes.
    async fn close(&self) -> Result<(), VerandaError>;

    /// Persists one record for the session and returns its id.
    async fn append(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        turns: &[Turn],
    ) -> Result<i64, VerandaError>;

    /// Returns the most recently written record for the session.
    ///
    /// A record bound to a user id is only readable when `requester` matches
    /// it; anonymous records are world-readable by session id. Ownership
    /// mismatch is `Err(VerandaError::AccessDenied)`, absence is `Ok(None)`.
    async fn get_latest(
        &self,
        session_id: &str,
        requester: Option<&str>,
    ) -> Result<Option<ConversationRecord>, VerandaError>;

    /// Returns the user's records, most recent first.
    async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<ConversationRecord>, VerandaError>;
}
