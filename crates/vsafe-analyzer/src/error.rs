//! Analyzer error types.

use thiserror::Error;
use vsafe_gemini::GeminiError;
use vsafe_media::MediaError;

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Video processing failed: {0}")]
    ProcessingFailed(String),

    #[error("Malformed report: {message}")]
    MalformedReport {
        message: String,
        /// Leading part of the offending text, for diagnostics
        excerpt: String,
    },

    #[error("Remote error: {0}")]
    Remote(#[from] GeminiError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn processing_failed(msg: impl Into<String>) -> Self {
        Self::ProcessingFailed(msg.into())
    }

    pub fn malformed_report(message: impl Into<String>, excerpt: impl Into<String>) -> Self {
        Self::MalformedReport {
            message: message.into(),
            excerpt: excerpt.into(),
        }
    }

    /// Check if error is retryable.
    ///
    /// Only remote rate-limit and quota errors are; everything raised
    /// locally is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            AnalyzerError::Remote(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Short machine-friendly category, used as a metrics label.
    pub fn category(&self) -> &'static str {
        match self {
            AnalyzerError::InvalidInput(_) => "input",
            AnalyzerError::Config(_) => "config",
            AnalyzerError::ProcessingFailed(_) => "processing_failed",
            AnalyzerError::MalformedReport { .. } => "malformed_report",
            AnalyzerError::Remote(_) => "remote",
            AnalyzerError::Media(_) => "media",
            AnalyzerError::Io(_) => "io",
        }
    }
}
