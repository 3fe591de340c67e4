// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-turn orchestration for a conversation session.
//!
//! Each incoming user message runs extract → prompt/complete → persist →
//! reply to completion before the session's next message is accepted
//! (per-session mutex). Sessions are independent and proceed in parallel.
//!
//! The booking stage is never stored: it is recomputed from slot contents
//! plus the transient confirmed flag, so state and data cannot diverge.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use veranda_core::types::{Hotel, ReservationSlots, Role, Turn};
use veranda_core::{CompletionProvider, ConversationStore, VerandaError};

use crate::catalog;
use crate::fallback::FallbackResponder;
use crate::prompt::PromptBuilder;
use crate::slots;

/// The derived position of a session in the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    AwaitingCity,
    AwaitingCheckIn,
    AwaitingCheckOut,
    AwaitingGuests,
    AwaitingConfirmation,
    Confirmed,
}

impl BookingStage {
    /// Recomputes the stage from slot contents and the confirmed flag.
    ///
    /// Pure: the stage is a view over the data, not a stored field.
    pub fn derive(slots: &ReservationSlots, confirmed: bool) -> Self {
        if confirmed && slots.is_complete() {
            BookingStage::Confirmed
        } else if slots.city.is_none() {
            BookingStage::AwaitingCity
        } else if slots.check_in.is_none() {
            BookingStage::AwaitingCheckIn
        } else if slots.check_out.is_none() {
            BookingStage::AwaitingCheckOut
        } else if slots.guests.is_none() {
            BookingStage::AwaitingGuests
        } else {
            BookingStage::AwaitingConfirmation
        }
    }
}

impl std::fmt::Display for BookingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStage::AwaitingCity => write!(f, "awaiting_city"),
            BookingStage::AwaitingCheckIn => write!(f, "awaiting_checkin"),
            BookingStage::AwaitingCheckOut => write!(f, "awaiting_checkout"),
            BookingStage::AwaitingGuests => write!(f, "awaiting_guests"),
            BookingStage::AwaitingConfirmation => write!(f, "awaiting_confirmation"),
            BookingStage::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// The result of processing one user message.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The assistant reply to emit to the caller.
    pub reply: String,
    /// The derived booking stage after this turn.
    pub stage: BookingStage,
    /// Snapshot of the slot state after this turn.
    pub slots: ReservationSlots,
}

/// In-memory state for one session.
#[derive(Debug, Default)]
struct SessionEntry {
    slots: ReservationSlots,
    transcript: Vec<Turn>,
    confirmed: bool,
    seeded: bool,
}

/// Ties the slot extractor, prompt builder, completion provider, fallback
/// responder, and conversation store together per incoming user message.
pub struct TurnOrchestrator {
    store: Arc<dyn ConversationStore>,
    provider: Arc<dyn CompletionProvider>,
    prompt_builder: PromptBuilder,
    fallback: FallbackResponder,
    catalog: Vec<Hotel>,
    sessions: DashMap<String, Arc<Mutex<SessionEntry>>>,
    typing_delay: Duration,
}

impl TurnOrchestrator {
    /// Creates an orchestrator over explicitly injected collaborators.
    pub fn new(
        store: Arc<dyn ConversationStore>,
        provider: Arc<dyn CompletionProvider>,
        prompt_builder: PromptBuilder,
        fallback: FallbackResponder,
        catalog: Vec<Hotel>,
        typing_delay: Duration,
    ) -> Self {
        Self {
            store,
            provider,
            prompt_builder,
            fallback,
            catalog,
            sessions: DashMap::new(),
            typing_delay,
        }
    }

    /// Returns the read-only hotel catalog.
    pub fn catalog(&self) -> &[Hotel] {
        &self.catalog
    }

    /// Processes one user message to completion and returns the reply.
    ///
    /// The session's mutex is held for the whole turn, so a session is
    /// single-writer; concurrent turns on different sessions proceed freely.
    pub async fn handle_turn(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        utterance: &str,
    ) -> Result<TurnOutcome, VerandaError> {
        if session_id.trim().is_empty() {
            return Err(VerandaError::InvalidInput("session id is required".into()));
        }
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(VerandaError::InvalidInput("prompt is required".into()));
        }

        let entry = self.session_entry(session_id);
        let mut session = entry.lock().await;

        if !session.seeded {
            self.seed_session(&mut session, session_id, user_id).await;
        }

        // The fallback rules need the state this utterance was answering.
        let prior_slots = session.slots.clone();

        let extraction = slots::extract(utterance, &session.slots);
        session.slots = extraction.slots;
        if extraction.reset {
            session.confirmed = false;
        } else if extraction.confirmed && session.slots.is_complete() {
            session.confirmed = true;
        }
        let stage = BookingStage::derive(&session.slots, session.confirmed);
        debug!(session_id, %stage, "slots updated");

        let reply = if self.provider.is_configured() {
            let prompt = self
                .prompt_builder
                .build(&session.slots, &session.transcript, utterance);
            match self.provider.complete(&prompt).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(session_id, error = %e, "completion failed -- answering from the rule table");
                    self.fallback.respond(utterance, &prior_slots)
                }
            }
        } else {
            self.fallback.respond(utterance, &prior_slots)
        };

        // Typing latency simulation: the reply is never emitted instantly.
        if !self.typing_delay.is_zero() {
            tokio::time::sleep(self.typing_delay).await;
        }

        let user_turn = Turn::new(Role::User, utterance, now());
        let assistant_turn = Turn::new(Role::Assistant, reply.clone(), now());
        session.transcript.push(user_turn.clone());
        session.transcript.push(assistant_turn.clone());

        // A failed save is logged and the reply proceeds unaffected.
        if let Err(e) = self
            .store
            .append(session_id, user_id, &[user_turn, assistant_turn])
            .await
        {
            warn!(session_id, error = %e, "failed to persist conversation turn");
        }

        if stage == BookingStage::Confirmed {
            info!(session_id, "reservation confirmed");
        }

        Ok(TurnOutcome {
            reply,
            stage,
            slots: session.slots.clone(),
        })
    }

    /// Binds a catalog hotel into the session and returns the card reply.
    ///
    /// Mirrors selecting a hotel card in the UI: the card text joins the
    /// in-memory transcript so the completion prompt sees it, but it is not
    /// persisted on its own; the next turn pair carries the conversation.
    pub async fn select_hotel(
        &self,
        session_id: &str,
        hotel_id: u32,
    ) -> Result<TurnOutcome, VerandaError> {
        if session_id.trim().is_empty() {
            return Err(VerandaError::InvalidInput("session id is required".into()));
        }
        let hotel = self
            .catalog
            .iter()
            .find(|h| h.id == hotel_id)
            .cloned()
            .ok_or_else(|| VerandaError::NotFound(format!("hotel {hotel_id}")))?;

        let entry = self.session_entry(session_id);
        let mut session = entry.lock().await;

        let reply = format!(
            "Excellent choice! 🏨\n\n{}\n💰 {} DH/night\n⭐ {:.1}/5\n📍 {}\n\n\
             Would you like to book this hotel? If so, give me your arrival and departure dates.",
            hotel.name,
            catalog::format_price(hotel.price),
            hotel.rating,
            hotel.location
        );

        session.slots.hotel = Some(hotel);
        session
            .transcript
            .push(Turn::new(Role::Assistant, reply.clone(), now()));

        let stage = BookingStage::derive(&session.slots, session.confirmed);
        Ok(TurnOutcome {
            reply,
            stage,
            slots: session.slots.clone(),
        })
    }

    fn session_entry(&self, session_id: &str) -> Arc<Mutex<SessionEntry>> {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(Default::default)
            .clone()
    }

    /// Seeds a fresh in-memory session from the latest persisted record.
    ///
    /// Slot state is not persisted; it is recomputed by replaying the seeded
    /// user turns through the extractor. Read failures leave the session
    /// empty and are logged.
    async fn seed_session(
        &self,
        session: &mut SessionEntry,
        session_id: &str,
        user_id: Option<&str>,
    ) {
        session.seeded = true;
        match self.store.get_latest(session_id, user_id).await {
            Ok(Some(record)) => {
                for turn in record.messages.iter().filter(|t| t.role == Role::User) {
                    let extraction = slots::extract(&turn.content, &session.slots);
                    if extraction.reset {
                        session.slots = ReservationSlots::default();
                        session.confirmed = false;
                    } else {
                        session.slots = extraction.slots;
                        if extraction.confirmed && session.slots.is_complete() {
                            session.confirmed = true;
                        }
                    }
                }
                debug!(
                    session_id,
                    turns = record.messages.len(),
                    "session resumed from persisted record"
                );
                session.transcript = record.messages;
            }
            Ok(None) => {}
            Err(VerandaError::AccessDenied) => {
                warn!(session_id, "persisted record owned by another identity -- starting fresh");
            }
            Err(e) => {
                warn!(session_id, error = %e, "failed to read persisted record -- starting fresh");
            }
        }
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
