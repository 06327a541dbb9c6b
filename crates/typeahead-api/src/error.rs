use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Autocomplete request failed: {0}")]
    Status(StatusCode),

    #[error("Malformed autocomplete response: {0}")]
    Decode(#[from] serde_json::Error),
}
