// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic rule-based reply generation.
//!
//! This table is the system's availability floor: it is the only responder
//! guaranteed to run when the completion client is unconfigured or the
//! network is down, so the rules are evaluated strictly in the order below
//! and mirror the slot extractor's detection order.
//!
//! Rules receive the slot state as it was BEFORE the current utterance was
//! extracted; that state is what tells a date answering "when do you
//! arrive?" apart from a date answering "when do you leave?".

use std::sync::LazyLock;

use regex::Regex;
use veranda_core::types::{Hotel, ReservationSlots};

use crate::catalog;
use crate::slots;

/// Greeting tokens, word-bounded.
static GREETING_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(hello|hi|bonjour|salut)\b").expect("valid regex"));

/// Departure-context tokens inside the utterance itself.
static DEPARTURE_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(departure|checkout|check-out|départ)\b").expect("valid regex"));

/// Canned-reply rule engine over the hotel catalog.
#[derive(Debug, Clone)]
pub struct FallbackResponder {
    catalog: Vec<Hotel>,
}

impl FallbackResponder {
    /// Creates a responder over the given catalog.
    pub fn new(catalog: Vec<Hotel>) -> Self {
        Self { catalog }
    }

    /// Produces the canned next-turn reply for `utterance` given the slot
    /// state before this utterance was extracted.
    ///
    /// Rule order (first match wins):
    /// 1. City answer (city keyword, or digit-free text before a check-in
    ///    exists) → ask for the arrival date.
    /// 2. Date answer: in a departure-question context → ask the guest
    ///    count; otherwise → ask for the departure date.
    /// 3. Guest-count answer → recommend hotels and ask whether to book.
    /// 4. Confirmation → booking-confirmed message.
    /// 5. Reset → ask for the city again.
    /// 6. Greeting → welcome message.
    /// 7. Default → ask for the four required details.
    pub fn respond(&self, utterance: &str, prior_slots: &ReservationSlots) -> String {
        let text = utterance.trim();
        let lower = text.to_lowercase();
        let has_digit = text.chars().any(|c| c.is_ascii_digit());

        if lower.contains("ville")
            || lower.contains("city")
            || (!has_digit && prior_slots.check_in.is_none() && !slots::has_confirm_token(&lower) && !slots::has_reset_token(&lower))
        {
            return "Excellent choice! When would you like to arrive? \
                    (Format: DD/MM/YYYY or YYYY-MM-DD)"
                .to_string();
        }

        if slots::contains_date(text) {
            if DEPARTURE_TOKENS.is_match(&lower) || prior_slots.check_in.is_some() {
                return "Perfect! How many people will be traveling with you?".to_string();
            }
            return "Great! And when are you planning to leave? (Departure date)".to_string();
        }

        if slots::matches_guest_count(text) {
            let mut reply = String::from("Perfect! 🎉\n\nHere are my best recommendations for you:\n");
            for hotel in self.catalog.iter().take(3) {
                reply.push('\n');
                reply.push_str(&catalog::render_line(hotel));
                reply.push('\n');
            }
            reply.push_str("\nWould you like to book one of these hotels?");
            return reply;
        }

        if slots::has_confirm_token(&lower) {
            return "Wonderful! 🎊 Your reservation is confirmed!\n\n\
                    You will receive a confirmation email shortly with all the details.\n\n\
                    Is there anything else I can help you with?"
                .to_string();
        }

        if slots::has_reset_token(&lower) {
            return "No problem! Which city would you like to stay in?".to_string();
        }

        if GREETING_TOKENS.is_match(&lower) {
            return "Hello! 👋 Welcome to Veranda. I'm your booking assistant. \
                    Which city would you like to stay in?"
                .to_string();
        }

        "I understand. To help you best, I need a few details: the city, \
         the arrival and departure dates, and the number of guests."
            .to_string()
    }
}
