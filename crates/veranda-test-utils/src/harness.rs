// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration test harness wiring temp SQLite, the mock provider, and the
//! turn orchestrator into one disposable unit.

use std::sync::Arc;
use std::time::Duration;

use veranda_concierge::{FallbackResponder, PromptBuilder, TurnOrchestrator, TurnOutcome};
use veranda_config::model::StorageConfig;
use veranda_core::{ConversationStore, VerandaError};
use veranda_storage::SqliteStore;

use crate::mock_provider::MockProvider;

/// A fully wired concierge over a temp database and a mock provider.
///
/// Each harness is isolated: its database lives in its own temp directory
/// which is removed when the harness drops.
pub struct TestHarness {
    pub orchestrator: TurnOrchestrator,
    pub store: Arc<dyn ConversationStore>,
    pub provider: Arc<MockProvider>,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Starts building a harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }

    /// Runs one turn on the given session as an anonymous caller.
    pub async fn send_message(
        &self,
        session_id: &str,
        utterance: &str,
    ) -> Result<TurnOutcome, VerandaError> {
        self.orchestrator.handle_turn(session_id, None, utterance).await
    }

    /// Runs one turn on the given session with an authenticated identity.
    pub async fn send_message_as(
        &self,
        session_id: &str,
        user_id: &str,
        utterance: &str,
    ) -> Result<TurnOutcome, VerandaError> {
        self.orchestrator
            .handle_turn(session_id, Some(user_id), utterance)
            .await
    }
}

/// Builder for [`TestHarness`].
#[derive(Default)]
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    unconfigured: bool,
}

impl TestHarnessBuilder {
    /// Pre-loads the mock provider's reply queue.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Makes the provider report itself unconfigured, forcing every reply
    /// through the fallback rule table.
    pub fn unconfigured_provider(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    /// Wires everything together over a fresh temp database.
    pub async fn build(self) -> Result<TestHarness, VerandaError> {
        let temp_dir = tempfile::TempDir::new().map_err(|e| VerandaError::Storage {
            source: Box::new(e),
        })?;
        let db_path = temp_dir.path().join("veranda-test.db");

        let store = SqliteStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        });
        store.initialize().await?;
        let store: Arc<dyn ConversationStore> = Arc::new(store);

        let provider = if self.unconfigured {
            Arc::new(MockProvider::unconfigured())
        } else {
            Arc::new(MockProvider::with_responses(self.responses))
        };

        let catalog = veranda_concierge::catalog::default_catalog();
        let orchestrator = TurnOrchestrator::new(
            Arc::clone(&store),
            Arc::clone(&provider) as Arc<dyn veranda_core::CompletionProvider>,
            PromptBuilder::with_default_persona(catalog.clone()),
            FallbackResponder::new(catalog.clone()),
            catalog,
            Duration::ZERO,
        );

        Ok(TestHarness {
            orchestrator,
            store,
            provider,
            _temp_dir: temp_dir,
        })
    }
}
