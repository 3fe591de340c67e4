// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `veranda serve` command implementation.
//!
//! Starts the concierge with SQLite storage, the Gemini completion client,
//! the static token identity table, and the HTTP gateway. All collaborators
//! are constructed here and injected explicitly; nothing is process-global.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use veranda_concierge::{FallbackResponder, PromptBuilder, TurnOrchestrator};
use veranda_config::VerandaConfig;
use veranda_core::{CompletionProvider, ConversationStore, VerandaError};
use veranda_gateway::{AppState, ServerConfig, StaticTokenIdentity};
use veranda_gemini::GeminiClient;
use veranda_storage::SqliteStore;

/// Runs the `veranda serve` command until interrupted.
pub async fn run_serve(config: VerandaConfig) -> Result<(), VerandaError> {
    init_tracing(&config.agent.log_level);

    info!(agent = %config.agent.name, "starting veranda serve");

    // Storage.
    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;
    let store: Arc<dyn ConversationStore> = Arc::new(store);

    // Completion provider.
    let provider = GeminiClient::new(config.gemini.clone())?;
    if !provider.is_configured() {
        warn!("Gemini is unconfigured -- every reply will come from the rule table");
    }
    let provider: Arc<dyn CompletionProvider> = Arc::new(provider);

    // Concierge core.
    let catalog = veranda_concierge::catalog::default_catalog();
    let prompt_builder = match &config.agent.persona {
        Some(persona) => PromptBuilder::new(persona.clone(), catalog.clone()),
        None => PromptBuilder::with_default_persona(catalog.clone()),
    };
    let orchestrator = TurnOrchestrator::new(
        Arc::clone(&store),
        provider,
        prompt_builder,
        FallbackResponder::new(catalog.clone()),
        catalog,
        Duration::from_millis(config.agent.typing_delay_ms),
    );

    // Gateway.
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        store: Arc::clone(&store),
        identity: Arc::new(StaticTokenIdentity::new(config.gateway.auth_tokens.clone())),
        start_time: std::time::Instant::now(),
    };
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    tokio::select! {
        result = veranda_gateway::start_server(&server_config, state) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    store.close().await?;
    info!("veranda serve stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("veranda={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
