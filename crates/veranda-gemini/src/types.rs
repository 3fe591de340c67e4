// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini `generateContent` request/response wire types.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request to the Gemini `generateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    /// Conversation contents. The concierge sends a single fully assembled
    /// prompt as one content entry.
    pub contents: Vec<Content>,

    /// Generation parameters.
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

/// One content entry holding ordered parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// A single text part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Sampling and length parameters for a generation call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    pub temperature: f64,

    #[serde(rename = "topK")]
    pub top_k: u32,

    #[serde(rename = "topP")]
    pub top_p: f64,

    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

// --- Response types ---

/// A response from the Gemini `generateContent` endpoint.
///
/// Only the fields the concierge consumes are modeled; unknown fields are
/// ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Extracts `candidates[0].content.parts[0].text`.
    ///
    /// Absence of that path is a provider failure, not an empty-string
    /// success; callers treat `None` as an error.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()
            .map(|p| p.text.as_str())
    }
}
