//! Gemini REST client for video analysis.
//!
//! Covers the calls needed to analyze a media file:
//! - Resumable upload to the Files API
//! - File status polling
//! - `generateContent` against an uploaded file
//! - File deletion
//!
//! Errors carry an explicit [`ErrorKind`] so callers can decide whether a
//! failure is worth retrying without inspecting message text.

pub mod client;
pub mod error;
pub mod model;
pub mod types;

pub use client::{GeminiClient, GeminiConfig, DEFAULT_API_BASE};
pub use error::{ErrorKind, GeminiError, GeminiResult};
pub use model::{ModelName, DEFAULT_MODEL};
pub use types::{FileResource, FileState, GenerationConfig};
