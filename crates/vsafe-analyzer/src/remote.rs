//! Remote analysis service seam.
//!
//! The job driver talks to the analysis service only through
//! [`AnalysisService`], which is implemented for [`GeminiClient`] and by
//! in-memory fakes in tests.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use vsafe_gemini::{
    FileResource, FileState, GeminiClient, GeminiResult, GenerationConfig, ModelName,
};

/// Lifecycle state of a remote analysis job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Submitted,
    Processing,
    Ready,
    Failed,
}

impl JobState {
    /// `Ready` and `Failed` never transition further.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Ready | JobState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Submitted => "submitted",
            JobState::Processing => "processing",
            JobState::Ready => "ready",
            JobState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<FileState> for JobState {
    fn from(state: FileState) -> Self {
        match state {
            FileState::StateUnspecified => JobState::Submitted,
            FileState::Processing => JobState::Processing,
            FileState::Active => JobState::Ready,
            FileState::Failed => JobState::Failed,
        }
    }
}

/// Handle to one uploaded media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteJob {
    /// Resource name, e.g. `files/abc-123`
    pub name: String,
    pub uri: String,
    pub mime_type: String,
    pub state: JobState,
}

impl From<FileResource> for RemoteJob {
    fn from(file: FileResource) -> Self {
        Self {
            name: file.name,
            uri: file.uri,
            mime_type: file.mime_type,
            state: file.state.into(),
        }
    }
}

/// MIME type sent on upload, from the file extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        _ => "video/mp4",
    }
}

/// Remote media analysis service.
///
/// Each method is a single attempt; retrying is the caller's job.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Upload a local media file and return the new job.
    async fn upload(&self, path: &Path) -> GeminiResult<RemoteJob>;

    /// Fetch the current state of a job.
    async fn get_status(&self, job: &RemoteJob) -> GeminiResult<RemoteJob>;

    /// Run the model over a ready job and return its raw text output.
    async fn generate(
        &self,
        job: &RemoteJob,
        model: &ModelName,
        prompt: &str,
        timeout: Duration,
    ) -> GeminiResult<String>;

    /// Delete the remote copy of the job's media.
    async fn delete(&self, job: &RemoteJob) -> GeminiResult<()>;
}

#[async_trait]
impl AnalysisService for GeminiClient {
    async fn upload(&self, path: &Path) -> GeminiResult<RemoteJob> {
        let file = self.upload_file(path, mime_type_for(path)).await?;
        Ok(file.into())
    }

    async fn get_status(&self, job: &RemoteJob) -> GeminiResult<RemoteJob> {
        let file = self.get_file(&job.name).await?;
        Ok(file.into())
    }

    async fn generate(
        &self,
        job: &RemoteJob,
        model: &ModelName,
        prompt: &str,
        timeout: Duration,
    ) -> GeminiResult<String> {
        self.generate_content(
            model,
            &job.uri,
            &job.mime_type,
            prompt,
            &GenerationConfig::default(),
            timeout,
        )
        .await
    }

    async fn delete(&self, job: &RemoteJob) -> GeminiResult<()> {
        self.delete_file(&job.name).await
    }
}
