// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion prompt assembly.
//!
//! Deterministic string concatenation: persona block, serialized catalog,
//! the running transcript as `Client:`/`Assistant:` lines, the new
//! utterance, and a closing instruction to answer only as the assistant.

use veranda_core::types::{Hotel, ReservationSlots, Role, Turn};

use crate::catalog;

/// Hard cap applied to the latest utterance before it enters the prompt.
/// Trailing characters beyond the cap are dropped silently.
pub const MAX_UTTERANCE_CHARS: usize = 2000;

/// Builds completion prompts from a fixed persona and catalog.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    persona: String,
    catalog: Vec<Hotel>,
}

impl PromptBuilder {
    /// Creates a builder with the given persona preamble and catalog.
    pub fn new(persona: impl Into<String>, catalog: Vec<Hotel>) -> Self {
        Self {
            persona: persona.into(),
            catalog,
        }
    }

    /// Creates a builder with the built-in concierge persona.
    pub fn with_default_persona(catalog: Vec<Hotel>) -> Self {
        Self::new(default_persona(), catalog)
    }

    /// Assembles the full prompt for one turn.
    pub fn build(
        &self,
        slots: &ReservationSlots,
        transcript: &[Turn],
        latest_utterance: &str,
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str(&self.persona);
        prompt.push_str("\n\nINFORMATION TO COLLECT (in order):\n");
        for (i, field) in slots.missing_fields().iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, field));
        }
        if slots.is_complete() {
            prompt.push_str("(all required details are collected)\n");
        }

        prompt.push_str("\nDETAILS COLLECTED SO FAR:\n");
        prompt.push_str(&render_slots(slots));

        prompt.push_str("\nAVAILABLE HOTELS:\n");
        for hotel in &self.catalog {
            prompt.push_str(&format!(
                "- {}: {} DH/night ({:.1}⭐) - {}\n",
                hotel.name,
                catalog::format_price(hotel.price),
                hotel.rating,
                hotel.location
            ));
        }

        prompt.push_str("\nCONVERSATION HISTORY:\n");
        for turn in transcript.iter().filter(|t| t.role != Role::System) {
            let speaker = match turn.role {
                Role::User => "Client",
                _ => "Assistant",
            };
            prompt.push_str(&format!("{speaker}: {}\n", turn.content));
        }

        let latest = truncate_chars(latest_utterance, MAX_UTTERANCE_CHARS);
        prompt.push_str(&format!("\nClient: {latest}\n"));
        prompt.push_str("\nNow reply as the assistant only (maximum 4 sentences):");

        prompt
    }
}

/// Renders the collected slot values, one per line.
fn render_slots(slots: &ReservationSlots) -> String {
    let mut out = String::new();
    if let Some(ref city) = slots.city {
        out.push_str(&format!("- destination city: {city}\n"));
    }
    if let Some(ref check_in) = slots.check_in {
        out.push_str(&format!("- check-in date: {check_in}\n"));
    }
    if let Some(ref check_out) = slots.check_out {
        out.push_str(&format!("- check-out date: {check_out}\n"));
    }
    if let Some(guests) = slots.guests {
        out.push_str(&format!("- guest count: {guests}\n"));
    }
    if let Some(ref hotel) = slots.hotel {
        out.push_str(&format!("- selected hotel: {}\n", hotel.name));
    }
    if out.is_empty() {
        out.push_str("(none yet)\n");
    }
    out
}

/// Drops trailing characters beyond `max` without signaling an error.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// The built-in concierge persona.
pub fn default_persona() -> String {
    "You are a luxury hotel booking assistant for Veranda.\n\
     \n\
     ROLE:\n\
     - You help clients book luxury hotels\n\
     - You are professional, warm, and efficient\n\
     - You ask clear and precise questions\n\
     \n\
     INSTRUCTIONS:\n\
     - Be concise (maximum 3-4 sentences)\n\
     - Use emojis in moderation (🏨 ⭐ 📍 🎉)\n\
     - Once every detail is collected, suggest 2-3 suitable hotels\n\
     - Confirm the reservation when the client accepts\n\
     - Stay natural and conversational"
        .to_string()
}
