//! API-specific error types

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Backend request errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Write attempted without a valid session; nothing was sent
    #[error("Not logged in")]
    NotAuthenticated,

    /// Backend rejected the bearer token (the session is left untouched)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Map a non-success response
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("Unknown status").to_string()
        });

        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Status { status: status.as_u16(), message },
        }
    }

    /// Whether the caller should treat the session as dead
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::Unauthorized(_))
    }
}

/// `message` or `error` from a JSON body, else the trimmed body text
fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for field in ["message", "error"] {
            if let Some(Value::String(text)) = map.get(field) {
                if !text.is_empty() {
                    return Some(text.clone());
                }
            }
        }
    }

    Some(body.to_string())
}
