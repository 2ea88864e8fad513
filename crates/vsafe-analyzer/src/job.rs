//! Async job driver.
//!
//! Drives one media file through the remote protocol:
//! `Submitted -> Processing -> {Ready | Failed}`, then requests the analysis.
//! Every remote call goes through [`call_with_retry`].

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};
use vsafe_gemini::ModelName;

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::remote::{AnalysisService, JobState, RemoteJob};
use crate::retry::{call_with_retry, RetryPolicy};

/// Prompt sent with every analysis request.
pub const SAFETY_PROMPT: &str = r#"Analyze this video for adult content, violence, and other safety concerns.
Provide a detailed report in JSON format with the following structure:
{
    "safety_score": 0-100 (where 100 is safe, 0 is very unsafe),
    "summary": "Brief summary of the video content",
    "flags": [
        {
            "timestamp": "MM:SS or HH:MM:SS",
            "category": "Adult|Violence|Hate|Dangerous",
            "severity": "Low|Medium|High",
            "description": "Description of the flagged content"
        }
    ]
}
Ensure the output is strictly valid JSON."#;

/// Resolve the requested model, falling back to the default model when the
/// name cannot be used.
pub fn select_model(requested: &str) -> ModelName {
    match ModelName::parse(requested) {
        Ok(model) => model,
        Err(e) => {
            let fallback = ModelName::default_model();
            warn!(
                requested = %requested,
                fallback = %fallback,
                "Unsupported model, using fallback: {}",
                e
            );
            fallback
        }
    }
}

/// Drives remote jobs for one pipeline run.
pub struct JobDriver<'a, S: AnalysisService + ?Sized> {
    service: &'a S,
    retry: RetryPolicy,
    poll_interval: Duration,
    analysis_timeout: Duration,
    model: ModelName,
}

impl<'a, S: AnalysisService + ?Sized> JobDriver<'a, S> {
    pub fn new(service: &'a S, config: &AnalyzerConfig) -> Self {
        Self {
            service,
            retry: config.retry.clone(),
            poll_interval: config.poll_interval,
            analysis_timeout: config.analysis_timeout,
            model: select_model(&config.model),
        }
    }

    /// The model analysis requests are sent to.
    pub fn model(&self) -> &ModelName {
        &self.model
    }

    /// Upload a media file.
    pub async fn submit(&self, path: &Path) -> AnalyzerResult<RemoteJob> {
        let job = call_with_retry(&self.retry, "upload", || self.service.upload(path)).await?;
        info!(job = %job.name, state = %job.state, "Media submitted");
        Ok(job)
    }

    /// Poll until the job reaches a terminal state.
    ///
    /// There is no overall cap on the number of polls; a stuck job is only
    /// bounded by individual polls exhausting their retry budget.
    pub async fn await_ready(&self, mut job: RemoteJob) -> AnalyzerResult<RemoteJob> {
        let mut polls = 0u64;
        while !job.state.is_terminal() {
            tokio::time::sleep(self.poll_interval).await;
            let current = &job;
            job = call_with_retry(&self.retry, "get_status", || self.service.get_status(current))
                .await?;
            polls += 1;
            debug!(job = %job.name, state = %job.state, polls, "Polled job state");
        }

        match job.state {
            JobState::Ready => {
                info!(job = %job.name, polls, "Job ready");
                Ok(job)
            }
            state => Err(AnalyzerError::processing_failed(format!(
                "job {} ended in terminal state {}",
                job.name, state
            ))),
        }
    }

    /// Request the analysis of a ready job and return the raw response text.
    pub async fn analyze(&self, job: &RemoteJob) -> AnalyzerResult<String> {
        info!(job = %job.name, model = %self.model, "Requesting analysis");
        let text = call_with_retry(&self.retry, "generate", || {
            self.service
                .generate(job, &self.model, SAFETY_PROMPT, self.analysis_timeout)
        })
        .await?;
        debug!(job = %job.name, bytes = text.len(), "Analysis received");
        Ok(text)
    }

    /// Delete the remote copy. Failures are logged and swallowed.
    pub async fn release(&self, job: &RemoteJob) {
        if let Err(e) = self.service.delete(job).await {
            warn!(job = %job.name, "Failed to delete remote file: {}", e);
        }
    }

    /// Full unit of work for one media file:
    /// submit, wait for readiness, analyze, then release the remote copy.
    ///
    /// The remote copy is released on failure too, once it exists.
    pub async fn run(&self, path: &Path) -> AnalyzerResult<String> {
        let job = self.submit(path).await?;
        let handle = job.clone();

        let result = match self.await_ready(job).await {
            Ok(ready) => self.analyze(&ready).await,
            Err(e) => Err(e),
        };

        self.release(&handle).await;
        result
    }
}
