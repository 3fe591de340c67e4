// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete concierge pipeline.
//!
//! Each test creates an isolated TestHarness with temp SQLite and a mock
//! completion provider. Tests are independent and order-insensitive.

use veranda_concierge::BookingStage;
use veranda_core::types::Role;
use veranda_core::VerandaError;
use veranda_test_utils::TestHarness;

// ---- Booking flow over the fallback rule table ----

#[tokio::test]
async fn booking_flow_fills_slots_and_confirms() {
    let harness = TestHarness::builder()
        .unconfigured_provider()
        .build()
        .await
        .unwrap();

    let outcome = harness.send_message("sess-1", "Marrakech").await.unwrap();
    assert_eq!(outcome.slots.city.as_deref(), Some("Marrakech"));
    assert!(outcome.reply.contains("When would you like to arrive?"));
    assert_eq!(outcome.stage, BookingStage::AwaitingCheckIn);

    let outcome = harness.send_message("sess-1", "12/09/2025").await.unwrap();
    assert_eq!(outcome.slots.check_in.as_deref(), Some("12/09/2025"));
    assert!(outcome.reply.contains("when are you planning to leave"));
    assert_eq!(outcome.stage, BookingStage::AwaitingCheckOut);

    let outcome = harness.send_message("sess-1", "20/09/2025").await.unwrap();
    assert_eq!(outcome.slots.check_out.as_deref(), Some("20/09/2025"));
    assert!(outcome.reply.contains("How many people"));
    assert_eq!(outcome.stage, BookingStage::AwaitingGuests);

    let outcome = harness.send_message("sess-1", "2 guests").await.unwrap();
    assert_eq!(outcome.slots.guests, Some(2));
    assert!(outcome.slots.is_complete());
    assert!(outcome.reply.contains("Here are my best recommendations"));
    assert!(outcome.reply.contains("The Ritz-Carlton, Melbourne"));
    assert_eq!(outcome.stage, BookingStage::AwaitingConfirmation);

    let outcome = harness.send_message("sess-1", "oui").await.unwrap();
    assert_eq!(outcome.stage, BookingStage::Confirmed);
    assert!(outcome.reply.contains("Your reservation is confirmed!"));
}

#[tokio::test]
async fn reset_mid_flow_returns_to_awaiting_city() {
    let harness = TestHarness::builder()
        .unconfigured_provider()
        .build()
        .await
        .unwrap();

    harness.send_message("sess-1", "Marrakech").await.unwrap();
    harness.send_message("sess-1", "12/09/2025").await.unwrap();

    let outcome = harness.send_message("sess-1", "non").await.unwrap();
    assert_eq!(outcome.stage, BookingStage::AwaitingCity);
    assert!(outcome.slots.city.is_none());
    assert!(outcome.slots.check_in.is_none());
    assert!(outcome.reply.contains("Which city would you like to stay in?"));
}

// ---- Completion path and degradation ----

#[tokio::test]
async fn configured_provider_reply_reaches_the_caller() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["Bonjour! Which city? 🏨".to_string()])
        .build()
        .await
        .unwrap();

    let outcome = harness.send_message("sess-1", "hello").await.unwrap();
    assert_eq!(outcome.reply, "Bonjour! Which city? 🏨");
}

#[tokio::test]
async fn unconfigured_provider_always_uses_the_rule_table() {
    let harness = TestHarness::builder()
        .unconfigured_provider()
        .build()
        .await
        .unwrap();

    // The availability floor: replies are deterministic rule-table output.
    let outcome = harness.send_message("sess-1", "Marrakech").await.unwrap();
    assert!(outcome.reply.contains("When would you like to arrive?"));
}

#[tokio::test]
async fn slots_fill_identically_on_both_reply_paths() {
    let with_model = TestHarness::builder()
        .with_mock_responses(vec!["model says hi".to_string(); 4])
        .build()
        .await
        .unwrap();
    let without_model = TestHarness::builder()
        .unconfigured_provider()
        .build()
        .await
        .unwrap();

    for harness in [&with_model, &without_model] {
        harness.send_message("sess-1", "Marrakech").await.unwrap();
        let outcome = harness.send_message("sess-1", "12/09/2025").await.unwrap();
        assert_eq!(outcome.slots.city.as_deref(), Some("Marrakech"));
        assert_eq!(outcome.slots.check_in.as_deref(), Some("12/09/2025"));
    }
}

// ---- Persistence semantics ----

#[tokio::test]
async fn each_turn_persists_a_user_assistant_pair() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["Persisted reply".to_string()])
        .build()
        .await
        .unwrap();

    harness.send_message("sess-1", "Test persistence").await.unwrap();

    let record = harness.store.get_latest("sess-1", None).await.unwrap().unwrap();
    assert_eq!(record.messages.len(), 2);
    assert_eq!(record.messages[0].role, Role::User);
    assert_eq!(record.messages[0].content, "Test persistence");
    assert_eq!(record.messages[1].role, Role::Assistant);
    assert_eq!(record.messages[1].content, "Persisted reply");
}

#[tokio::test]
async fn get_latest_returns_the_most_recent_pair() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["first".to_string(), "second".to_string()])
        .build()
        .await
        .unwrap();

    harness.send_message("sess-1", "one").await.unwrap();
    harness.send_message("sess-1", "two").await.unwrap();

    // Each call persisted its own snapshot; the most recent write wins.
    let record = harness.store.get_latest("sess-1", None).await.unwrap().unwrap();
    assert_eq!(record.messages[0].content, "two");
    assert_eq!(record.messages[1].content, "second");
}

#[tokio::test]
async fn authenticated_turns_bind_the_record_to_the_user() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["noted".to_string()])
        .build()
        .await
        .unwrap();

    harness
        .send_message_as("sess-owned", "user-1", "Marrakech")
        .await
        .unwrap();

    // Owner reads fine; other identities are denied.
    assert!(harness
        .store
        .get_latest("sess-owned", Some("user-1"))
        .await
        .unwrap()
        .is_some());
    let err = harness
        .store
        .get_latest("sess-owned", Some("user-2"))
        .await
        .unwrap_err();
    assert!(matches!(err, VerandaError::AccessDenied));

    let history = harness.store.list_for_user("user-1", 20).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].session_id, "sess-owned");
}

// ---- Client input errors ----

#[tokio::test]
async fn missing_prompt_is_a_client_error_and_nothing_is_persisted() {
    let harness = TestHarness::builder().build().await.unwrap();

    let err = harness.send_message("sess-1", "  ").await.unwrap_err();
    assert!(matches!(err, VerandaError::InvalidInput(_)));

    assert!(harness.store.get_latest("sess-1", None).await.unwrap().is_none());
}

// ---- Hotel selection ----

#[tokio::test]
async fn selecting_a_hotel_binds_it_into_the_reservation() {
    let harness = TestHarness::builder()
        .unconfigured_provider()
        .build()
        .await
        .unwrap();

    harness.send_message("sess-1", "Sydney").await.unwrap();
    let outcome = harness.orchestrator.select_hotel("sess-1", 5).await.unwrap();
    assert!(outcome.reply.contains("The Peninsula, Sydney"));
    assert_eq!(outcome.slots.hotel.as_ref().map(|h| h.id), Some(5));
    assert_eq!(outcome.slots.city.as_deref(), Some("Sydney"));
}

// ---- Session isolation ----

#[tokio::test]
async fn sessions_are_independent() {
    let harness = TestHarness::builder()
        .unconfigured_provider()
        .build()
        .await
        .unwrap();

    let a = harness.send_message("sess-a", "Marrakech").await.unwrap();
    let b = harness.send_message("sess-b", "Sydney").await.unwrap();

    assert_eq!(a.slots.city.as_deref(), Some("Marrakech"));
    assert_eq!(b.slots.city.as_deref(), Some("Sydney"));

    let ra = harness.store.get_latest("sess-a", None).await.unwrap().unwrap();
    let rb = harness.store.get_latest("sess-b", None).await.unwrap().unwrap();
    assert_ne!(ra.id, rb.id);
}
