// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional bearer identity resolution for the gateway.
//!
//! Authentication is optional on most routes: a missing Authorization
//! header leaves the request anonymous, a presented token must resolve to a
//! user id or the request is rejected. Credential validation itself belongs
//! to the upstream auth collaborator behind [`IdentityProvider`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;

use veranda_core::{IdentityProvider, VerandaError};

/// Identity resolver over a static token table.
///
/// Tokens are issued by the upstream auth service and mirrored into the
/// gateway config; the gateway itself never mints or verifies credentials.
pub struct StaticTokenIdentity {
    tokens: HashMap<String, String>,
}

impl StaticTokenIdentity {
    /// Creates a resolver over token -> user-id bindings.
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

impl std::fmt::Debug for StaticTokenIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenIdentity")
            .field("tokens", &format!("[{} redacted]", self.tokens.len()))
            .finish()
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentity {
    async fn identify(&self, token: &str) -> Result<Option<String>, VerandaError> {
        Ok(self.tokens.get(token).cloned())
    }
}

/// Outcome of resolving a request's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// No Authorization header was presented.
    Anonymous,
    /// The presented token resolved to this user id.
    User(String),
    /// A token was presented but did not resolve.
    Invalid,
}

impl Identity {
    /// The user id, if authenticated.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Identity::User(id) => Some(id),
            _ => None,
        }
    }
}

/// Resolves the request's identity from its Authorization header.
pub async fn resolve_identity(
    headers: &HeaderMap,
    identity: &Arc<dyn IdentityProvider>,
) -> Identity {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        None => Identity::Anonymous,
        Some(token) => match identity.identify(token).await {
            Ok(Some(user_id)) => Identity::User(user_id),
            Ok(None) => Identity::Invalid,
            Err(e) => {
                tracing::warn!(error = %e, "identity resolution failed");
                Identity::Invalid
            }
        },
    }
}
