//! Gemini error types.

use serde::Deserialize;
use thiserror::Error;

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Whether a failure is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rate limiting or quota exhaustion; back off and try again.
    Retryable,
    /// Anything else; retrying will not help.
    Fatal,
}

/// Errors that can occur during Gemini operations.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("Gemini API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid model name: {0}")]
    InvalidModel(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error envelope returned by Google APIs.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GeminiError {
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Build an error from a non-success HTTP response.
    ///
    /// HTTP 429 and `RESOURCE_EXHAUSTED` bodies are retryable; all other
    /// statuses are fatal.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok();
        let message = parsed
            .as_ref()
            .map(|e| e.error.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string());
        let api_status = parsed.map(|e| e.error.status).unwrap_or_default();

        if status == 429 {
            Self::RateLimited(message)
        } else if api_status == "RESOURCE_EXHAUSTED" {
            Self::ResourceExhausted(message)
        } else {
            Self::Api { status, message }
        }
    }

    /// Map a transport error, separating timeouts from other network failures.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Network(err)
        }
    }

    /// Retry classification for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GeminiError::RateLimited(_) | GeminiError::ResourceExhausted(_) => ErrorKind::Retryable,
            _ => ErrorKind::Fatal,
        }
    }

    /// Check if error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Retryable
    }
}
