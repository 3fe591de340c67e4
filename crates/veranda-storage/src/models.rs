// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for storage entities.
//!
//! The canonical [`ConversationRecord`] lives in `veranda-core::types` for
//! use across adapter trait boundaries; rows carry the raw serialized
//! `messages` column until they are decoded at the query layer.

use veranda_core::types::{ConversationRecord, Turn};
use veranda_core::VerandaError;

/// A raw `conversations` row with the messages column still serialized.
#[derive(Debug, Clone)]
pub struct ConversationRow {
    pub id: i64,
    pub user_id: Option<String>,
    pub session_id: String,
    pub messages: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ConversationRow {
    /// Decodes the serialized messages column into a domain record.
    pub fn into_record(self) -> Result<ConversationRecord, VerandaError> {
        let messages: Vec<Turn> =
            serde_json::from_str(&self.messages).map_err(|e| VerandaError::Storage {
                source: Box::new(e),
            })?;
        Ok(ConversationRecord {
            id: self.id,
            user_id: self.user_id,
            session_id: self.session_id,
            messages,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
