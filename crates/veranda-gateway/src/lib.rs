// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Veranda concierge.
//!
//! Exposes the chat endpoint, conversation reads, the hotel catalog, and a
//! health probe over axum. The gateway validates client input and resolves
//! identity; everything conversational is delegated to the turn
//! orchestrator.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::{Identity, StaticTokenIdentity};
pub use server::{build_router, start_server, AppState, ServerConfig};
