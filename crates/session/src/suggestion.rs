//! Boundary types for an external move-suggestion service.
//!
//! The session only knows the [`MoveSuggester`] trait; the HTTP client lives
//! in its own crate.

use chess_core::Move;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub fen: String,
    pub api_key: String,
    pub model: String,
}

/// The service's answer: a SAN move and a short explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "move")]
    pub mv: String,
    #[serde(default)]
    pub explain: String,
}

/// A suggestion that maps onto a legal move of the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedMove {
    pub mv: Move,
    pub san: String,
    pub explain: String,
}

#[derive(Error, Debug)]
pub enum SuggestionError {
    /// Transport failure. The source keeps the HTTP client's own error type.
    #[error("request failed: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("service answered with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response carries no text")]
    MissingText,

    #[error("no suggestion found in {0:?}")]
    Unparseable(String),
}

pub trait MoveSuggester {
    fn suggest(&self, request: &SuggestionRequest) -> Result<Suggestion, SuggestionError>;
}

/// Reads the `{"move": ..., "explain": ...}` object out of a model reply.
///
/// The object may be wrapped in a ```json fence or surrounded by prose.
pub fn parse_suggestion_text(text: &str) -> Result<Suggestion, SuggestionError> {
    let body = fenced_json(text).unwrap_or(text).trim();
    if let Ok(suggestion) = serde_json::from_str::<Suggestion>(body) {
        return Ok(suggestion);
    }
    let object = match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => return Err(SuggestionError::Unparseable(text.to_string())),
    };
    serde_json::from_str(object).map_err(|_| SuggestionError::Unparseable(text.to_string()))
}

fn fenced_json(text: &str) -> Option<&str> {
    let start = text.find("```json")? + "```json".len();
    let rest = &text[start..];
    let end = rest.find("```")?;
    Some(&rest[..end])
}

#[cfg(test)]
#[path = "suggestion_tests.rs"]
mod suggestion_tests;
