// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles POST /api/chat, POST /api/chat/select, GET /api/conversations,
//! GET /api/conversations/{session_id}, GET /api/hotels, GET /api/health.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use veranda_core::types::{ConversationRecord, Hotel};
use veranda_core::VerandaError;

use crate::auth::{resolve_identity, Identity};
use crate::server::AppState;

/// How many records a history listing returns at most.
const HISTORY_LIMIT: i64 = 20;

/// Request body for POST /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's utterance.
    #[serde(default)]
    pub prompt: String,
    /// Client-generated session identifier.
    #[serde(default)]
    pub session_id: String,
}

/// Response body for POST /api/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The assistant reply.
    pub text: String,
}

/// Request body for POST /api/chat/select.
#[derive(Debug, Deserialize)]
pub struct SelectHotelRequest {
    #[serde(default)]
    pub session_id: String,
    pub hotel_id: u32,
}

/// Response body for GET /api/conversations/{session_id}.
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub conversation: ConversationRecord,
}

/// Response body for GET /api/conversations.
#[derive(Debug, Serialize)]
pub struct ConversationListResponse {
    pub conversations: Vec<ConversationRecord>,
}

/// Response body for GET /api/hotels.
#[derive(Debug, Serialize)]
pub struct HotelListResponse {
    pub hotels: Vec<Hotel>,
}

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

fn error_response(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code,
        }),
    )
        .into_response()
}

/// Maps a core error to the caller-visible signal.
fn map_error(err: VerandaError) -> Response {
    match err {
        VerandaError::InvalidInput(message) => {
            error_response(StatusCode::BAD_REQUEST, "INVALID_INPUT", message)
        }
        VerandaError::NotFound(what) => {
            error_response(StatusCode::NOT_FOUND, "NOT_FOUND", format!("{what} not found"))
        }
        VerandaError::AccessDenied => error_response(
            StatusCode::FORBIDDEN,
            "UNAUTHORIZED_ACCESS",
            "access to this conversation is not allowed",
        ),
        other => {
            tracing::error!(error = %other, "request failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal server error",
            )
        }
    }
}

fn invalid_token() -> Response {
    error_response(StatusCode::UNAUTHORIZED, "INVALID_TOKEN", "invalid bearer token")
}

/// POST /api/chat
///
/// Runs one conversation turn. Anonymous requests are allowed; a presented
/// bearer token must resolve or the request is rejected.
pub async fn post_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ChatRequest>,
) -> Response {
    let identity = resolve_identity(&headers, &state.identity).await;
    if identity == Identity::Invalid {
        return invalid_token();
    }

    if body.prompt.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "PROMPT_REQUIRED", "prompt is required");
    }
    if body.session_id.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "NO_SESSION_ID",
            "session id required for conversation tracking",
        );
    }

    match state
        .orchestrator
        .handle_turn(&body.session_id, identity.user_id(), &body.prompt)
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(ChatResponse { text: outcome.reply })).into_response(),
        Err(err) => map_error(err),
    }
}

/// POST /api/chat/select
///
/// Binds a catalog hotel into the session and returns the card reply.
pub async fn post_select_hotel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SelectHotelRequest>,
) -> Response {
    let identity = resolve_identity(&headers, &state.identity).await;
    if identity == Identity::Invalid {
        return invalid_token();
    }
    if body.session_id.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "NO_SESSION_ID",
            "session id required for conversation tracking",
        );
    }

    match state
        .orchestrator
        .select_hotel(&body.session_id, body.hotel_id)
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(ChatResponse { text: outcome.reply })).into_response(),
        Err(err) => map_error(err),
    }
}

/// GET /api/conversations/{session_id}
///
/// Returns the latest record for the session. Ownership is enforced: a
/// record bound to a user is only readable by that identity.
pub async fn get_conversation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
) -> Response {
    let identity = resolve_identity(&headers, &state.identity).await;
    if identity == Identity::Invalid {
        return invalid_token();
    }

    match state.store.get_latest(&session_id, identity.user_id()).await {
        Ok(Some(conversation)) => {
            (StatusCode::OK, Json(ConversationResponse { conversation })).into_response()
        }
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "CONVERSATION_NOT_FOUND",
            "conversation not found",
        ),
        Err(err) => map_error(err),
    }
}

/// GET /api/conversations
///
/// Returns the authenticated user's history, most recent first.
pub async fn list_conversations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let identity = resolve_identity(&headers, &state.identity).await;
    let user_id = match &identity {
        Identity::User(id) => id.clone(),
        Identity::Invalid => return invalid_token(),
        Identity::Anonymous => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "authentication required",
            )
        }
    };

    match state.store.list_for_user(&user_id, HISTORY_LIMIT).await {
        Ok(conversations) => {
            (StatusCode::OK, Json(ConversationListResponse { conversations })).into_response()
        }
        Err(err) => map_error(err),
    }
}

/// GET /api/hotels
///
/// Returns the read-only hotel catalog.
pub async fn get_hotels(State(state): State<AppState>) -> Json<HotelListResponse> {
    Json(HotelListResponse {
        hotels: state.orchestrator.catalog().to_vec(),
    })
}

/// GET /api/health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
