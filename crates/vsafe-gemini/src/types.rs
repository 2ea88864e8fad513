//! Gemini REST request/response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Files API
// =============================================================================

/// Processing state of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    #[default]
    StateUnspecified,
    Processing,
    Active,
    Failed,
}

impl FileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileState::StateUnspecified => "STATE_UNSPECIFIED",
            FileState::Processing => "PROCESSING",
            FileState::Active => "ACTIVE",
            FileState::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for FileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error detail attached to a failed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// An uploaded file as described by the Files API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResource {
    /// Resource name, e.g. `files/abc-123`
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub state: FileState,
    #[serde(default)]
    pub error: Option<FileStatus>,
}

/// Body returned by the upload finalize call.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub file: FileResource,
}

/// Metadata sent when starting a resumable upload.
#[derive(Debug, Serialize)]
pub(crate) struct UploadStartRequest<'a> {
    pub file: UploadFileMetadata<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UploadFileMetadata<'a> {
    pub display_name: &'a str,
}

// =============================================================================
// generateContent
// =============================================================================

/// Sampling parameters for `generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_p: 1.0,
            top_k: 32,
            max_output_tokens: 8192,
            response_mime_type: "application/json".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest<'a> {
    pub contents: Vec<Content<'a>>,
    pub generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content<'a> {
    pub role: &'static str,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Part<'a> {
    File {
        #[serde(rename = "fileData")]
        file_data: FileData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileData<'a> {
    pub mime_type: &'a str,
    pub file_uri: &'a str,
}

/// `generateContent` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Why no text came back, for error messages.
    pub fn empty_reason(&self) -> String {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return format!("prompt blocked: {}", reason);
        }
        match self.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
            Some(reason) => format!("no text in response (finish reason: {})", reason),
            None => "no candidates in response".to_string(),
        }
    }
}
