//! Wire types shared with the puzzle generation service.
//!
//! The service exposes a single endpoint, `POST {api_base}/generate-puzzle`, which takes a topic and answers with
//! the raw text produced by the generator. That text is expected to contain a `{"word": ..., "svg": ...}` object but
//! may be wrapped in prose, so decoding it is left to the caller.

use serde::{Deserialize, Serialize};

/// Path of the generation endpoint, relative to the API base.
pub const GENERATE_PUZZLE_PATH: &str = "/generate-puzzle";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePuzzleRequest {
    pub topic: String,
}

impl GeneratePuzzleRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Success envelope, `puzzle` holds unprocessed generator output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePuzzleResponse {
    pub puzzle: String,
}

impl GeneratePuzzleResponse {
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}

/// Error envelope sent alongside non-2xx statuses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    /// Best effort, error bodies are not guaranteed to follow the envelope.
    pub fn from_json(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

/// Joins `api_base` with [`GENERATE_PUZZLE_PATH`], ignoring trailing slashes on the base.
pub fn endpoint_url(api_base: &str) -> String {
    format!("{}{}", api_base.trim_end_matches('/'), GENERATE_PUZZLE_PATH)
}
