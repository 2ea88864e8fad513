//! Media input and the media backend seam.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;
use url::Url;
use vsafe_media::{MediaError, MediaResult};
use vsafe_models::Segment;

use crate::error::{AnalyzerError, AnalyzerResult};

/// Where the video to analyze comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaInput {
    /// Remote video, downloaded into the run's scratch directory
    Url(Url),
    /// Caller-owned local file, used in place and never removed
    File(PathBuf),
}

impl MediaInput {
    /// Build the input from the CLI options.
    ///
    /// A URL takes precedence when both are given.
    pub fn from_args(url: Option<String>, file: Option<PathBuf>) -> AnalyzerResult<Self> {
        match (url, file) {
            (Some(url), file) => {
                if let Some(file) = file {
                    warn!(file = %file.display(), "Both --url and --file given, using --url");
                }
                Self::parse_url(&url)
            }
            (None, Some(file)) => Ok(MediaInput::File(file)),
            (None, None) => Err(AnalyzerError::invalid_input("No URL or file provided")),
        }
    }

    fn parse_url(raw: &str) -> AnalyzerResult<Self> {
        let url = Url::parse(raw.trim())
            .map_err(|e| AnalyzerError::invalid_input(format!("Invalid URL '{}': {}", raw, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(MediaInput::Url(url)),
            scheme => Err(AnalyzerError::invalid_input(format!(
                "Unsupported URL scheme '{}'",
                scheme
            ))),
        }
    }

    /// Check that a caller-supplied file exists.
    pub fn validate(&self) -> AnalyzerResult<()> {
        match self {
            MediaInput::File(path) if !path.is_file() => Err(AnalyzerError::invalid_input(
                format!("Video file not found: {}", path.display()),
            )),
            _ => Ok(()),
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            MediaInput::Url(url) => url.to_string(),
            MediaInput::File(path) => path.display().to_string(),
        }
    }
}

/// Title for a caller-supplied file: its file name.
pub fn file_title(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Local media operations used by the pipeline.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Download a remote video to `dest`.
    async fn download(&self, url: &Url, dest: &Path) -> MediaResult<()>;

    /// Human-readable title of a remote video; never fails.
    async fn title(&self, url: &Url) -> String;

    /// Total duration of a local file in seconds.
    async fn probe_duration(&self, path: &Path) -> MediaResult<f64>;

    /// Write the `[segment.start, segment.end)` range of `source` to `dest`.
    async fn extract(&self, source: &Path, dest: &Path, segment: &Segment) -> MediaResult<()>;
}

/// [`MediaBackend`] over the ffmpeg, ffprobe and yt-dlp executables.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegBackend;

impl FfmpegBackend {
    pub fn new() -> Self {
        Self
    }

    /// Verify the external tools are on `PATH`.
    pub fn check_tools(&self, needs_download: bool) -> MediaResult<()> {
        vsafe_media::check_ffprobe()?;
        vsafe_media::check_ffmpeg()?;
        if needs_download {
            vsafe_media::check_ytdlp()?;
        }
        Ok(())
    }
}

#[async_trait]
impl MediaBackend for FfmpegBackend {
    async fn download(&self, url: &Url, dest: &Path) -> MediaResult<()> {
        vsafe_media::download_video(url.as_str(), dest).await
    }

    async fn title(&self, url: &Url) -> String {
        vsafe_media::fetch_title(url.as_str()).await
    }

    async fn probe_duration(&self, path: &Path) -> MediaResult<f64> {
        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }
        vsafe_media::get_duration(path).await
    }

    async fn extract(&self, source: &Path, dest: &Path, segment: &Segment) -> MediaResult<()> {
        vsafe_media::extract_range(source, dest, segment.start, segment.end).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args_url() {
        let url = "https://www.youtube.com/watch?v=abc".to_string();
        let input = MediaInput::from_args(Some(url), None).unwrap();
        assert!(matches!(input, MediaInput::Url(_)));
    }

    #[test]
    fn test_from_args_file() {
        let input = MediaInput::from_args(None, Some(PathBuf::from("video.mp4"))).unwrap();
        assert_eq!(input, MediaInput::File(PathBuf::from("video.mp4")));
    }

    #[test]
    fn test_from_args_url_wins() {
        let input = MediaInput::from_args(
            Some("https://example.com/v.mp4".into()),
            Some(PathBuf::from("video.mp4")),
        )
        .unwrap();
        assert!(matches!(input, MediaInput::Url(_)));
    }

    #[test]
    fn test_from_args_neither() {
        let err = MediaInput::from_args(None, None).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidInput(_)));
        assert!(err.to_string().contains("No URL or file provided"));
    }

    #[test]
    fn test_from_args_rejects_bad_urls() {
        assert!(MediaInput::from_args(Some("not a url".into()), None).is_err());
        assert!(MediaInput::from_args(Some("ftp://host/v.mp4".into()), None).is_err());
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = MediaInput::File(dir.path().join("missing.mp4"));
        let err = input.validate().unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidInput(_)));
        assert!(err.to_string().contains("Video file not found"));
    }

    #[test]
    fn test_validate_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = MediaInput::File(dir.path().to_path_buf());
        assert!(matches!(input.validate(), Err(AnalyzerError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_existing_file_and_url() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(MediaInput::File(file.path().to_path_buf()).validate().is_ok());

        let input = MediaInput::from_args(Some("https://example.com/v.mp4".into()), None).unwrap();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_file_title() {
        assert_eq!(file_title(Path::new("/videos/holiday.mp4")), "holiday.mp4");
        assert_eq!(file_title(Path::new("clip.webm")), "clip.webm");
    }
}
