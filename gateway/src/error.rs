use thiserror::Error;

use shared::ErrorResponse;

/// Everything that can go wrong below the envelope boundary. None of this
/// leaks to callers: the entity APIs log it and answer with a failure
/// envelope.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid range: {from}..={to}")]
    InvalidRange { from: i64, to: i64 },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Injected failure: {0}")]
    Injected(String),
}

impl GatewayError {
    /// Build a `Remote` error from a non-success status and its body
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|parsed| parsed.describe())
            .unwrap_or_else(|_| body.to_string());
        if status == 401 || status == 403 {
            return Self::Unauthorized(message);
        }
        Self::Remote { status, message }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
