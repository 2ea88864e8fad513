//! Chunked video safety analysis.
//!
//! A video is submitted to Gemini for safety analysis. Videos longer than the
//! chunk threshold are split into fixed-length segments that are analyzed one
//! after another; their reports are rebased onto the source timeline and
//! merged into a single [`FinalReport`](vsafe_models::FinalReport).

pub mod aggregate;
pub mod config;
pub mod error;
pub mod job;
pub mod logging;
pub mod media;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod rebase;
pub mod remote;
pub mod retry;

pub use aggregate::aggregate;
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, AnalyzerResult};
pub use job::{select_model, JobDriver, SAFETY_PROMPT};
pub use logging::RunLogger;
pub use media::{FfmpegBackend, MediaBackend, MediaInput};
pub use normalize::normalize;
pub use pipeline::Pipeline;
pub use rebase::rebase;
pub use remote::{AnalysisService, JobState, RemoteJob};
pub use retry::{call_with_retry, Classify, RetryPolicy};
