use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("text generation is disabled")]
    Disabled,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse generation response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("generation service returned no text")]
    EmptyResponse,

    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
}
