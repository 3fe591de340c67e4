// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Veranda concierge.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a conversation session.
///
/// Session ids are client-generated and opaque; they are stable for the
/// lifetime of a browser tab and carry no identity information.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Attribution of a conversation turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message exchanged in a conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// ISO 8601 timestamp of when the turn was produced.
    pub timestamp: String,
}

impl Turn {
    /// Creates a turn stamped with the given timestamp.
    pub fn new(role: Role, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// A read-only catalog entry. Never mutated by conversation logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: u32,
    pub name: String,
    /// Nightly price in the catalog's display currency.
    pub price: u64,
    pub location: String,
    pub rating: f32,
}

/// Reservation information accumulated across a session's turns.
///
/// Fill is monotonic: a slot, once set, is only overwritten by an explicit
/// new value extracted from a later turn, and only cleared by an explicit
/// reset intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationSlots {
    pub city: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub guests: Option<u32>,
    pub hotel: Option<Hotel>,
}

impl ReservationSlots {
    /// A reservation is complete iff city, both dates, and the guest count are set.
    /// The hotel slot is optional; a complete reservation without one gets
    /// catalog suggestions instead of a named hotel.
    pub fn is_complete(&self) -> bool {
        self.city.is_some()
            && self.check_in.is_some()
            && self.check_out.is_some()
            && self.guests.is_some()
    }

    /// Names of the required fields still unset, in collection order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.city.is_none() {
            missing.push("destination city");
        }
        if self.check_in.is_none() {
            missing.push("check-in date");
        }
        if self.check_out.is_none() {
            missing.push("check-out date");
        }
        if self.guests.is_none() {
            missing.push("guest count");
        }
        missing
    }
}

/// A persisted conversation record.
///
/// Each record is the complete snapshot written by one `append` call (the
/// user/assistant turn pair); retrieval by session id returns the most
/// recently written record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: i64,
    pub user_id: Option<String>,
    pub session_id: String,
    pub messages: Vec<Turn>,
    pub created_at: String,
    pub updated_at: String,
}
