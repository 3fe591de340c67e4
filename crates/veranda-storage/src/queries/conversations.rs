// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation record operations.
//!
//! Every save inserts a fresh row; readers take the highest row id per
//! session, so the most recent write wins without any merge logic.

use rusqlite::params;
use veranda_core::VerandaError;

use crate::database::Database;
use crate::models::ConversationRow;

const ROW_COLUMNS: &str = "id, user_id, session_id, messages, created_at, updated_at";

fn row_from(row: &rusqlite::Row<'_>) -> Result<ConversationRow, rusqlite::Error> {
    Ok(ConversationRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        session_id: row.get(2)?,
        messages: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Insert a new conversation record and return its row id.
pub async fn insert_conversation(
    db: &Database,
    session_id: &str,
    user_id: Option<&str>,
    messages_json: &str,
    now: &str,
) -> Result<i64, VerandaError> {
    let session_id = session_id.to_string();
    let user_id = user_id.map(str::to_string);
    let messages_json = messages_json.to_string();
    let now = now.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversations (user_id, session_id, messages, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![user_id, session_id, messages_json, now, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the most recently written record for a session.
pub async fn latest_for_session(
    db: &Database,
    session_id: &str,
) -> Result<Option<ConversationRow>, VerandaError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ROW_COLUMNS} FROM conversations
                 WHERE session_id = ?1 ORDER BY id DESC LIMIT 1"
            ))?;
            let result = stmt.query_row(params![session_id], row_from);
            match result {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List a user's records, most recent first.
pub async fn list_for_user(
    db: &Database,
    user_id: &str,
    limit: i64,
) -> Result<Vec<ConversationRow>, VerandaError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ROW_COLUMNS} FROM conversations
                 WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![user_id, limit], row_from)?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
