//! Analyzer configuration.

use std::path::PathBuf;
use std::time::Duration;

use vsafe_gemini::{GeminiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::retry::RetryPolicy;

/// Analyzer configuration.
///
/// Built once (usually by [`AnalyzerConfig::from_env`] plus CLI overrides)
/// and handed to the pipeline; components never read the environment.
#[derive(Clone)]
pub struct AnalyzerConfig {
    /// Gemini API key
    pub api_key: String,
    /// Gemini API base URL
    pub api_base: String,
    /// Requested model name, validated when the job driver is built
    pub model: String,
    /// Videos longer than this are split
    pub chunk_threshold_secs: f64,
    /// Length of each segment when splitting
    pub segment_secs: f64,
    /// Sleep between file status polls
    pub poll_interval: Duration,
    /// Per-call timeout of the analysis request
    pub analysis_timeout: Duration,
    /// Retry policy for every remote call
    pub retry: RetryPolicy,
    /// Parent directory of the per-run scratch directory
    pub work_dir: PathBuf,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            chunk_threshold_secs: 1200.0, // 20 minutes
            segment_secs: 600.0,          // 10 minutes
            poll_interval: Duration::from_secs(2),
            analysis_timeout: Duration::from_secs(600),
            retry: RetryPolicy::default(),
            work_dir: std::env::temp_dir(),
        }
    }
}

impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("chunk_threshold_secs", &self.chunk_threshold_secs)
            .field("segment_secs", &self.segment_secs)
            .field("poll_interval", &self.poll_interval)
            .field("analysis_timeout", &self.analysis_timeout)
            .field("retry", &self.retry)
            .field("work_dir", &self.work_dir)
            .finish()
    }
}

impl AnalyzerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            api_base: std::env::var("GEMINI_API_BASE").unwrap_or(defaults.api_base),
            model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            chunk_threshold_secs: std::env::var("VSAFE_CHUNK_THRESHOLD_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.chunk_threshold_secs),
            segment_secs: std::env::var("VSAFE_SEGMENT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.segment_secs),
            poll_interval: Duration::from_secs(
                std::env::var("VSAFE_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2),
            ),
            analysis_timeout: Duration::from_secs(
                std::env::var("VSAFE_ANALYSIS_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            retry: RetryPolicy::new(
                std::env::var("VSAFE_RETRY_MAX_ATTEMPTS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
                Duration::from_secs(
                    std::env::var("VSAFE_RETRY_BASE_DELAY_SECS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(2),
                ),
            ),
            work_dir: std::env::var("VSAFE_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
        }
    }

    /// Override the API key when one is given.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key {
            self.api_key = key;
        }
        self
    }

    /// Override the model when one is given.
    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }

    /// Check the values that cannot be defaulted.
    pub fn validate(&self) -> AnalyzerResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AnalyzerError::config_error(
                "Gemini API key is not set (use --api_key or GEMINI_API_KEY)",
            ));
        }
        if !(self.segment_secs.is_finite() && self.segment_secs > 0.0) {
            return Err(AnalyzerError::config_error(format!(
                "segment length must be positive, got {}",
                self.segment_secs
            )));
        }
        if !(self.chunk_threshold_secs.is_finite() && self.chunk_threshold_secs > 0.0) {
            return Err(AnalyzerError::config_error(format!(
                "chunk threshold must be positive, got {}",
                self.chunk_threshold_secs
            )));
        }
        Ok(())
    }

    /// Client configuration for the Gemini API.
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig::new(self.api_key.clone()).with_base_url(self.api_base.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.chunk_threshold_secs, 1200.0);
        assert_eq!(config.segment_secs, 600.0);
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.analysis_timeout, Duration::from_secs(600));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_overrides() {
        let config = AnalyzerConfig::default()
            .with_api_key(Some("key".into()))
            .with_model(None);
        assert_eq!(config.api_key, "key");
        assert_eq!(config.model, DEFAULT_MODEL);

        let config = config.with_model(Some("gemini-1.5-pro".into()));
        assert_eq!(config.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_validate_requires_api_key() {
        let err = AnalyzerConfig::default().validate().unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(_)));

        let config = AnalyzerConfig::default().with_api_key(Some("key".into()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_segment_length() {
        let mut config = AnalyzerConfig::default().with_api_key(Some("key".into()));
        config.segment_secs = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = AnalyzerConfig::default().with_api_key(Some("super-secret".into()));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
