// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic reservation-slot extraction.
//!
//! One pass over one utterance against the current slot state. Zero-cost
//! keyword and regex rules; no LLM pre-call, no network, no latency.
//! Categories are independent: a single message can fill a date and a guest
//! count at once. Within a category, matching stops at the first success.

use std::sync::LazyLock;

use regex::Regex;
use veranda_core::types::ReservationSlots;

/// `DD/MM/YYYY` date form.
static DATE_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{2}/\d{2}/\d{4}\b").expect("valid regex"));

/// `YYYY-MM-DD` date form.
static DATE_ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").expect("valid regex"));

/// `<integer> guests`-style count with a unit word.
static GUESTS_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s*(guests?|persons?|people|personnes?)\b").expect("valid regex")
});

/// Affirmative intent tokens ("réserv" is a stem covering réserver/réservation).
static CONFIRM_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(yes|oui)\b").expect("valid regex"));

/// Negative / start-over intent tokens.
static RESET_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(no|non|autre)\b").expect("valid regex"));

/// Bare integers below this are read as a guest count when no unit word is present.
const BARE_GUEST_LIMIT: u32 = 20;

/// The result of one extraction pass.
///
/// `confirmed` and `reset` are transient intents consumed by the turn
/// orchestrator; they are not slots and are never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub slots: ReservationSlots,
    pub confirmed: bool,
    pub reset: bool,
}

/// Runs every heuristic category over `utterance` and returns the updated
/// slot state.
///
/// Category order and semantics:
/// 1. Reset intent clears all slots and short-circuits the pass.
/// 2. The first date match fills check-in if unset, else check-out.
/// 3. A guest count with a unit word always sets the count (an explicit
///    value overwrites); a bare integer below 20 only fills an unset count.
/// 4. Confirmation intent sets the transient `confirmed` flag.
/// 5. A digit-free utterance that carries no intent token is taken as the
///    city name when the city is unset.
///
/// If no heuristic matches, the slots come back unchanged.
pub fn extract(utterance: &str, current: &ReservationSlots) -> Extraction {
    let text = utterance.trim();
    let mut slots = current.clone();

    if text.is_empty() {
        return Extraction {
            slots,
            confirmed: false,
            reset: false,
        };
    }

    let lower = text.to_lowercase();
    let confirmed = CONFIRM_TOKENS.is_match(&lower) || lower.contains("réserv");

    if RESET_TOKENS.is_match(&lower) {
        return Extraction {
            slots: ReservationSlots::default(),
            confirmed: false,
            reset: true,
        };
    }

    if let Some(date) = first_date(text) {
        if slots.check_in.is_none() {
            slots.check_in = Some(date);
        } else {
            slots.check_out = Some(date);
        }
    }

    if let Some(cap) = GUESTS_UNIT.captures(&lower) {
        if let Ok(count) = cap[1].parse::<u32>() {
            if count > 0 {
                slots.guests = Some(count);
            }
        }
    } else if slots.guests.is_none() {
        if let Ok(count) = text.parse::<u32>() {
            if (1..BARE_GUEST_LIMIT).contains(&count) {
                slots.guests = Some(count);
            }
        }
    }

    let has_digit = text.chars().any(|c| c.is_ascii_digit());
    if slots.city.is_none() && !has_digit && !confirmed {
        slots.city = Some(text.to_string());
    }

    Extraction {
        slots,
        confirmed,
        reset: false,
    }
}

/// True when the utterance carries a date in either accepted form.
pub(crate) fn contains_date(text: &str) -> bool {
    first_date(text).is_some()
}

/// True when the utterance matches a guest-count pattern (unit form, or a
/// bare integer below the threshold).
pub(crate) fn matches_guest_count(text: &str) -> bool {
    let lower = text.to_lowercase();
    if GUESTS_UNIT.is_match(&lower) {
        return true;
    }
    text.trim()
        .parse::<u32>()
        .is_ok_and(|n| (1..BARE_GUEST_LIMIT).contains(&n))
}

/// True when the utterance carries an affirmative intent token.
pub(crate) fn has_confirm_token(lower: &str) -> bool {
    CONFIRM_TOKENS.is_match(lower) || lower.contains("réserv")
}

/// True when the utterance carries a negative / start-over intent token.
pub(crate) fn has_reset_token(lower: &str) -> bool {
    RESET_TOKENS.is_match(lower)
}

/// Returns the earliest date substring in either accepted form.
fn first_date(text: &str) -> Option<String> {
    let slash = DATE_SLASH.find(text);
    let iso = DATE_ISO.find(text);
    match (slash, iso) {
        (Some(a), Some(b)) => Some(if a.start() <= b.start() { a } else { b }.as_str().to_string()),
        (Some(a), None) => Some(a.as_str().to_string()),
        (None, Some(b)) => Some(b.as_str().to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> ReservationSlots {
        ReservationSlots::default()
    }

    #[test]
    fn digit_free_utterance_fills_city() {
        let result = extract("Marrakech", &empty());
        assert_eq!(result.slots.city.as_deref(), Some("Marrakech"));
        assert!(!result.confirmed);
        assert!(!result.reset);
    }

    #[test]
    fn city_is_not_overwritten_once_set() {
        let mut slots = empty();
        slots.city = Some("Marrakech".into());
        let result = extract("Sydney", &slots);
        assert_eq!(result.slots.city.as_deref(), Some("Marrakech"));
    }

    #[test]
    fn first_date_fills_check_in_then_check_out() {
        let result = extract("2025-09-12", &empty());
        assert_eq!(result.slots.check_in.as_deref(), Some("2025-09-12"));
        assert!(result.slots.check_out.is_none());

        let result = extract("2025-09-20", &result.slots);
        assert_eq!(result.slots.check_in.as_deref(), Some("2025-09-12"));
        assert_eq!(result.slots.check_out.as_deref(), Some("2025-09-20"));
    }

    #[test]
    fn slash_date_form_is_accepted() {
        let result = extract("12/09/2025", &empty());
        assert_eq!(result.slots.check_in.as_deref(), Some("12/09/2025"));
    }

    #[test]
    fn date_inside_sentence_is_found() {
        let result = extract("arriving on 12/09/2025 thanks", &empty());
        assert_eq!(result.slots.check_in.as_deref(), Some("12/09/2025"));
        // A sentence with digits is never a city.
        assert!(result.slots.city.is_none());
    }

    #[test]
    fn unit_guest_count_is_extracted() {
        assert_eq!(extract("4 guests", &empty()).slots.guests, Some(4));
        assert_eq!(extract("2 people", &empty()).slots.guests, Some(2));
        assert_eq!(extract("1 person", &empty()).slots.guests, Some(1));
        assert_eq!(extract("3 personnes", &empty()).slots.guests, Some(3));
    }

    #[test]
    fn bare_integer_below_twenty_fills_guests() {
        assert_eq!(extract("15", &empty()).slots.guests, Some(15));
    }

    #[test]
    fn bare_integer_at_or_over_twenty_is_ignored() {
        assert_eq!(extract("25", &empty()).slots.guests, None);
        assert_eq!(extract("20", &empty()).slots.guests, None);
    }

    #[test]
    fn zero_guests_is_rejected_in_both_forms() {
        assert_eq!(extract("0", &empty()).slots.guests, None);
        assert_eq!(extract("0 guests", &empty()).slots.guests, None);
    }

    #[test]
    fn bare_integer_does_not_overwrite_guests() {
        let mut slots = empty();
        slots.guests = Some(2);
        assert_eq!(extract("15", &slots).slots.guests, Some(2));
    }

    #[test]
    fn explicit_unit_count_overwrites_guests() {
        let mut slots = empty();
        slots.guests = Some(2);
        assert_eq!(extract("make it 4 guests", &slots).slots.guests, Some(4));
    }

    #[test]
    fn date_and_count_fill_from_one_utterance() {
        let result = extract("12/09/2025 for 2 guests", &empty());
        assert_eq!(result.slots.check_in.as_deref(), Some("12/09/2025"));
        assert_eq!(result.slots.guests, Some(2));
    }

    #[test]
    fn confirmation_tokens_set_transient_flag() {
        assert!(extract("oui", &empty()).confirmed);
        assert!(extract("yes please", &empty()).confirmed);
        assert!(extract("je veux réserver", &empty()).confirmed);
        assert!(!extract("maybe", &empty()).confirmed);
    }

    #[test]
    fn intent_only_utterance_is_not_a_city() {
        let result = extract("oui", &empty());
        assert!(result.slots.city.is_none());
    }

    #[test]
    fn reset_clears_all_slots_regardless_of_prior_state() {
        let full = ReservationSlots {
            city: Some("Marrakech".into()),
            check_in: Some("12/09/2025".into()),
            check_out: Some("20/09/2025".into()),
            guests: Some(2),
            hotel: None,
        };
        for utterance in ["no", "non", "autre chose"] {
            let result = extract(utterance, &full);
            assert_eq!(result.slots, ReservationSlots::default(), "for {utterance:?}");
            assert!(result.reset);
            assert!(!result.confirmed);
        }
    }

    #[test]
    fn no_match_returns_slots_unchanged() {
        let mut slots = empty();
        slots.city = Some("Marrakech".into());
        let result = extract("tell me more 99999", &slots);
        assert_eq!(result.slots, slots);
    }

    #[test]
    fn extraction_is_idempotent_when_slot_already_set() {
        let first = extract("Marrakech", &empty());
        let second = extract("Marrakech", &first.slots);
        assert_eq!(second.slots, first.slots);

        let first = extract("4 guests", &empty());
        let second = extract("4 guests", &first.slots);
        assert_eq!(second.slots, first.slots);
    }

    #[test]
    fn empty_utterance_changes_nothing() {
        let mut slots = empty();
        slots.guests = Some(2);
        let result = extract("   ", &slots);
        assert_eq!(result.slots, slots);
        assert!(!result.confirmed && !result.reset);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Reset always wins, whatever the prior state holds.
            #[test]
            fn reset_always_yields_unset_slots(city in ".{0,12}", guests in proptest::option::of(1u32..30)) {
                let slots = ReservationSlots {
                    city: Some(city),
                    check_in: Some("12/09/2025".into()),
                    check_out: None,
                    guests,
                    hotel: None,
                };
                let result = extract("non", &slots);
                prop_assert_eq!(result.slots, ReservationSlots::default());
                prop_assert!(result.reset);
            }

            /// Extraction never panics and reaches a fixed point: a third
            /// pass of the same utterance changes nothing a second pass
            /// didn't already settle (dates need two passes to fill both
            /// ends, everything else one).
            #[test]
            fn extraction_reaches_fixed_point(utterance in ".{0,40}") {
                let once = extract(&utterance, &ReservationSlots::default());
                let twice = extract(&utterance, &once.slots);
                let thrice = extract(&utterance, &twice.slots);
                prop_assert_eq!(thrice.slots, twice.slots);
            }

            /// Monotonic fill: a pass never clears a slot unless it is a reset.
            #[test]
            fn non_reset_pass_never_clears_slots(utterance in "[a-zA-Z0-9 /]{0,30}") {
                let slots = ReservationSlots {
                    city: Some("Marrakech".into()),
                    check_in: Some("12/09/2025".into()),
                    check_out: Some("20/09/2025".into()),
                    guests: Some(2),
                    hotel: None,
                };
                let result = extract(&utterance, &slots);
                if !result.reset {
                    prop_assert!(result.slots.city.is_some());
                    prop_assert!(result.slots.check_in.is_some());
                    prop_assert!(result.slots.check_out.is_some());
                    prop_assert!(result.slots.guests.is_some());
                }
            }
        }
    }
}
