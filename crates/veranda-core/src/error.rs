// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Veranda concierge.

use thiserror::Error;

/// The primary error type used across all Veranda adapter traits and core operations.
#[derive(Debug, Error)]
pub enum VerandaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion provider errors (API failure, malformed response, transport failure).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed client input (missing prompt, missing session id). Surfaced
    /// to the caller directly; never resolved through the fallback path.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A requested record or catalog entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requester's identity does not match the record's bound owner.
    #[error("access denied")]
    AccessDenied,

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
