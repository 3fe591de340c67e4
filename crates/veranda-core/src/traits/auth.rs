// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity provider trait.
//!
//! The concierge core never validates credentials itself; an upstream auth
//! collaborator resolves a presented token to a user id (or to nothing).

use async_trait::async_trait;

use crate::error::VerandaError;

/// Resolves a bearer token to an authenticated user id.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Returns the user id bound to the token, or `None` for an unknown token.
    async fn identify(&self, token: &str) -> Result<Option<String>, VerandaError>;
}
