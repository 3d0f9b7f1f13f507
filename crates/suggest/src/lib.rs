//! Move suggestions from the Gemini `generateContent` API.
//!
//! [`GeminiClient`] implements the session's [`MoveSuggester`] trait. One
//! request per suggestion, no retries.

use std::time::Duration;

use game_session::{
    parse_suggestion_text, MoveSuggester, Suggestion, SuggestionError, SuggestionRequest,
};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new() -> Result<Self, SuggestionError> {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Client for another endpoint, e.g. a local stand-in.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SuggestionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SuggestionError::Http(Box::new(e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL of the model's `generateContent` method, without the key.
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl MoveSuggester for GeminiClient {
    fn suggest(&self, request: &SuggestionRequest) -> Result<Suggestion, SuggestionError> {
        debug!(model = %request.model, fen = %request.fen, "requesting move suggestion");
        let response = self
            .client
            .post(self.endpoint(&request.model))
            .query(&[("key", request.api_key.as_str())])
            .json(&GenerateRequest::new(suggestion_prompt(&request.fen)))
            .send()
            .map_err(|e| SuggestionError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestionError::Status(status.as_u16()));
        }
        let body = response
            .text()
            .map_err(|e| SuggestionError::Http(Box::new(e)))?;
        parse_suggestion_text(&reply_text(&body)?)
    }
}

pub fn suggestion_prompt(fen: &str) -> String {
    format!(
        "Based on the following FEN string, what is the best move for the current player? \
         Please provide your answer in JSON format with two fields: \"move\" (in algebraic \
         notation, e.g., \"e4\", \"Nf3\") and \"explain\" (a brief explanation of why it's a \
         good move).\n\nFEN: {fen}"
    )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    pub fn new(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

/// Text of the first part of the first candidate.
pub fn reply_text(body: &str) -> Result<String, SuggestionError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(SuggestionError::MissingText)
}
