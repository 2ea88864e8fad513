//! Analyzer metrics.
//!
//! Counters for remote retries, analyzed segments and finished runs. Without
//! an installed recorder every call is a no-op.

use metrics::counter;

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Total retry attempts by remote operation.
    pub const REMOTE_RETRIES_TOTAL: &str = "vsafe_remote_retries_total";

    /// Total segments analyzed, including single-pass runs.
    pub const SEGMENTS_ANALYZED_TOTAL: &str = "vsafe_segments_analyzed_total";

    /// Total pipeline runs by outcome.
    pub const RUNS_TOTAL: &str = "vsafe_runs_total";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record a retry attempt.
pub fn record_retry(operation: &str) {
    counter!(
        names::REMOTE_RETRIES_TOTAL,
        "operation" => operation.to_string()
    )
    .increment(1);
}

pub fn record_segment_analyzed() {
    counter!(names::SEGMENTS_ANALYZED_TOTAL).increment(1);
}

/// Record a finished run; `outcome` is `"success"` or an error category.
pub fn record_run(outcome: &str) {
    counter!(
        names::RUNS_TOTAL,
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert!(names::REMOTE_RETRIES_TOTAL.contains("retries"));
        assert!(names::SEGMENTS_ANALYZED_TOTAL.contains("segments"));
        assert!(names::RUNS_TOTAL.starts_with("vsafe_"));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_retry("upload");
        record_segment_analyzed();
        record_run("success");
    }
}
