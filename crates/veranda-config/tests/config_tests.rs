// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Veranda configuration system.

use veranda_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_veranda_config() {
    let toml = r#"
[agent]
name = "test-concierge"
log_level = "debug"
typing_delay_ms = 0
persona = "You are a terse test assistant."

[gemini]
api_key = "AIza-test-key"
api_url = "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-lite:generateContent"
temperature = 0.7
max_output_tokens = 512
timeout_secs = 4

[storage]
database_path = "/tmp/test.db"
wal_mode = false

[gateway]
host = "0.0.0.0"
port = 8080

[gateway.auth_tokens]
"tok-abc" = "user-1"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "test-concierge");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.agent.typing_delay_ms, 0);
    assert_eq!(
        config.agent.persona.as_deref(),
        Some("You are a terse test assistant.")
    );
    assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-test-key"));
    assert_eq!(config.gemini.temperature, 0.7);
    assert_eq!(config.gemini.max_output_tokens, 512);
    assert_eq!(config.gemini.timeout_secs, 4);
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.gateway.host, "0.0.0.0");
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(
        config.gateway.auth_tokens.get("tok-abc").map(String::as_str),
        Some("user-1")
    );
}

/// Unknown field in [agent] produces an error mentioning the bad key.
#[test]
fn unknown_field_in_agent_produces_error() {
    let toml = r#"
[agent]
naem = "test"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error
    assert!(
        err_str.contains("unknown field") || err_str.contains("naem"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown field in [gemini] produces an error.
#[test]
fn unknown_field_in_gemini_produces_error() {
    let toml = r#"
[gemini]
api_keey = "abc"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("api_keey"),
        "got: {err_str}"
    );
}

/// Empty TOML yields the compiled defaults.
#[test]
fn empty_toml_yields_defaults() {
    let config = load_config_from_str("").expect("empty config should use defaults");
    assert_eq!(config.agent.name, "vera");
    assert_eq!(config.gateway.port, 3090);
    assert!(config.gemini.api_key.is_none());
    assert!(config.gemini.api_url.contains("googleapis.com"));
}

/// Partial sections keep defaults for unset fields.
#[test]
fn partial_section_keeps_field_defaults() {
    let toml = r#"
[gemini]
api_key = "AIza-partial"
"#;
    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-partial"));
    assert_eq!(config.gemini.temperature, 0.2);
    assert_eq!(config.gemini.max_output_tokens, 1024);
}

/// load_and_validate_str surfaces semantic errors from valid TOML.
#[test]
fn semantic_validation_runs_after_parse() {
    let toml = r#"
[gemini]
temperature = 9.0
"#;
    let errors = load_and_validate_str(toml).expect_err("out-of-range temperature");
    assert!(errors
        .iter()
        .any(|e| e.to_string().contains("temperature")));
}

/// Wrong type for a known field is a parse error, not a silent default.
#[test]
fn type_mismatch_is_rejected() {
    let toml = r#"
[gateway]
port = "not-a-port"
"#;
    assert!(load_config_from_str(toml).is_err());
}
