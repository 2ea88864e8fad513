//! FFmpeg CLI wrapper for media acquisition and segmenting.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Duration probing via FFprobe
//! - Time-range extraction with re-encoding
//! - Video download and title lookup via yt-dlp

pub mod clip;
pub mod command;
pub mod download;
pub mod error;
pub mod probe;

pub use clip::{extract_range, SEGMENT_AUDIO_CODEC, SEGMENT_VIDEO_CODEC};
pub use command::{check_ffmpeg, check_ffprobe, check_ytdlp, FfmpegCommand, FfmpegRunner};
pub use download::{download_video, fetch_title, UNKNOWN_TITLE};
pub use error::{MediaError, MediaResult};
pub use probe::{get_duration, probe_video, VideoInfo};
