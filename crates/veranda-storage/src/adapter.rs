// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ConversationStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use veranda_config::model::StorageConfig;
use veranda_core::types::{ConversationRecord, Turn};
use veranda_core::{ConversationStore, VerandaError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed conversation store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query module. The database is lazily initialized on the first call
/// to [`ConversationStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, VerandaError> {
        self.db.get().ok_or_else(|| VerandaError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl ConversationStore for SqliteStore {
    async fn initialize(&self) -> Result<(), VerandaError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| VerandaError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), VerandaError> {
        self.db()?.close().await
    }

    async fn append(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        turns: &[Turn],
    ) -> Result<i64, VerandaError> {
        let messages_json = serde_json::to_string(turns).map_err(|e| VerandaError::Storage {
            source: Box::new(e),
        })?;
        let now = chrono::Utc::now().to_rfc3339();
        let id = queries::conversations::insert_conversation(
            self.db()?,
            session_id,
            user_id,
            &messages_json,
            &now,
        )
        .await?;
        debug!(session_id, record_id = id, "conversation record persisted");
        Ok(id)
    }

    async fn get_latest(
        &self,
        session_id: &str,
        requester: Option<&str>,
    ) -> Result<Option<ConversationRecord>, VerandaError> {
        let Some(row) = queries::conversations::latest_for_session(self.db()?, session_id).await?
        else {
            return Ok(None);
        };
        // Records bound to a user are only readable by that identity.
        if let Some(owner) = row.user_id.as_deref() {
            if requester != Some(owner) {
                return Err(VerandaError::AccessDenied);
            }
        }
        row.into_record().map(Some)
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<ConversationRecord>, VerandaError> {
        let rows = queries::conversations::list_for_user(self.db()?, user_id, limit).await?;
        rows.into_iter().map(|row| row.into_record()).collect()
    }
}
