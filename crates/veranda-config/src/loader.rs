// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./veranda.toml` > `~/.config/veranda/veranda.toml`
//! > `/etc/veranda/veranda.toml` with environment variable overrides via
//! `VERANDA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::VerandaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/veranda/veranda.toml` (system-wide)
/// 3. `~/.config/veranda/veranda.toml` (user XDG config)
/// 4. `./veranda.toml` (local directory)
/// 5. `VERANDA_*` environment variables
pub fn load_config() -> Result<VerandaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VerandaConfig::default()))
        .merge(Toml::file("/etc/veranda/veranda.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("veranda/veranda.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("veranda.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<VerandaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VerandaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VerandaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VerandaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `VERANDA_GEMINI_API_KEY`
/// must map to `gemini.api_key`, not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("VERANDA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: VERANDA_GEMINI_API_KEY -> "gemini_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
