//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for pipeline runs with
//! tracing spans and contextual information.

use tracing::{error, info, Span};
use uuid::Uuid;

/// Run logger for structured logging with consistent formatting.
///
/// Every event carries the run ID and the operation name, so interleaved
/// output from several invocations stays attributable.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    operation: String,
}

impl RunLogger {
    /// Create a logger for a new run with a fresh run ID.
    pub fn new(operation: &str) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run started: {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run progress: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run completed: {}", message
        );
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Create a tracing span covering the whole run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "run",
            run_id = %self.run_id,
            operation = %self.operation
        )
    }
}
