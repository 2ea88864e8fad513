//! Gemini REST API client.
//!
//! Thin, single-attempt wrappers over the HTTP calls. Retrying is the
//! caller's decision, guided by [`GeminiError::kind`].

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{debug, info};

use crate::error::{GeminiError, GeminiResult};
use crate::model::ModelName;
use crate::types::{
    Content, FileData, FileResource, GenerateRequest, GenerateResponse, GenerationConfig, Part,
    UploadFileMetadata, UploadResponse, UploadStartRequest,
};

/// Public Gemini endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";
const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

// =============================================================================
// Configuration
// =============================================================================

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Scheme and host, without a trailing slash
    pub base_url: String,
    /// Default timeout for metadata calls
    pub timeout: Duration,
    /// Timeout for the upload body transfer
    pub upload_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
            upload_timeout: Duration::from_secs(3600),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// Gemini REST API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("vsafe-gemini/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GeminiError::Network)?;

        Ok(Self { http, config })
    }

    /// Upload a local file with the resumable upload protocol.
    ///
    /// Returns the file as reported after finalization; its state is usually
    /// `PROCESSING`.
    pub async fn upload_file(&self, path: &Path, mime_type: &str) -> GeminiResult<FileResource> {
        let size = tokio::fs::metadata(path).await?.len();
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "video".to_string());

        info!(path = %path.display(), size, "Uploading file to Gemini");

        // 1. Start the session
        let start_url = format!("{}/upload/v1beta/files", self.config.base_url);
        let response = self
            .http
            .post(&start_url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", size.to_string())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .timeout(self.config.timeout)
            .json(&UploadStartRequest {
                file: UploadFileMetadata {
                    display_name: &display_name,
                },
            })
            .send()
            .await
            .map_err(GeminiError::from_transport)?;
        let response = check_status(response).await?;

        let upload_url = response
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| GeminiError::invalid_response("missing upload URL header"))?;

        debug!("Resumable upload session started");

        // 2. Send the bytes and finalize
        let file = tokio::fs::File::open(path).await?;
        let response = self
            .http
            .post(&upload_url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header("Content-Length", size.to_string())
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .timeout(self.config.upload_timeout)
            .body(file)
            .send()
            .await
            .map_err(GeminiError::from_transport)?;
        let response = check_status(response).await?;

        let uploaded: UploadResponse = response.json().await.map_err(GeminiError::from_transport)?;
        info!(name = %uploaded.file.name, state = %uploaded.file.state, "Upload finished");
        Ok(uploaded.file)
    }

    /// Fetch the current description of an uploaded file.
    pub async fn get_file(&self, name: &str) -> GeminiResult<FileResource> {
        let response = self
            .http
            .get(self.file_url(name))
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(GeminiError::from_transport)?;
        let response = check_status(response).await?;

        response.json().await.map_err(GeminiError::from_transport)
    }

    /// Delete an uploaded file.
    pub async fn delete_file(&self, name: &str) -> GeminiResult<()> {
        let response = self
            .http
            .delete(self.file_url(name))
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(GeminiError::from_transport)?;
        check_status(response).await?;
        Ok(())
    }

    /// Run `generateContent` over an uploaded file and return the text output.
    pub async fn generate_content(
        &self,
        model: &ModelName,
        file_uri: &str,
        mime_type: &str,
        prompt: &str,
        generation_config: &GenerationConfig,
        timeout: Duration,
    ) -> GeminiResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, model
        );

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::File {
                        file_data: FileData {
                            mime_type,
                            file_uri,
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
            generation_config,
        };

        debug!(model = %model, file_uri = %file_uri, "Calling generateContent");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(GeminiError::from_transport)?;
        let response = check_status(response).await?;

        let body: GenerateResponse = response.json().await.map_err(GeminiError::from_transport)?;
        body.text()
            .ok_or_else(|| GeminiError::invalid_response(body.empty_reason()))
    }

    fn file_url(&self, name: &str) -> String {
        if name.starts_with("files/") {
            format!("{}/v1beta/{}", self.config.base_url, name)
        } else {
            format!("{}/v1beta/files/{}", self.config.base_url, name)
        }
    }
}

/// Turn a non-success response into a typed error.
async fn check_status(response: Response) -> GeminiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GeminiError::from_http_status(status.as_u16(), &body))
}
