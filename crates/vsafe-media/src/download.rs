//! Video download and metadata lookup using yt-dlp.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::command::check_ytdlp;
use crate::error::{MediaError, MediaResult};

/// Title reported when the source's metadata cannot be read.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Format selector: a single progressive MP4 so no muxing is needed.
const DOWNLOAD_FORMAT: &str = "best[ext=mp4]";

/// Download a video to `output_path`.
pub async fn download_video(url: &str, output_path: impl AsRef<Path>) -> MediaResult<()> {
    let output_path = output_path.as_ref();

    check_ytdlp()?;

    info!("Downloading video from {} to {}", url, output_path.display());

    let output = Command::new("yt-dlp")
        .args(["--no-playlist", "--no-progress", "--quiet", "-f", DOWNLOAD_FORMAT, "-o"])
        .arg(output_path)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp stderr: {}", stderr);

        if is_rate_limited(&stderr) {
            warn!(url = %url, "Source rate limit detected");
        }

        let error_msg = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("Unknown error");
        return Err(MediaError::download_failed(format!("yt-dlp failed: {}", error_msg)));
    }

    if !output_path.exists() {
        return Err(MediaError::download_failed("Output file not created"));
    }

    info!("Downloaded video: {}", output_path.display());
    Ok(())
}

/// Look up a video's title.
///
/// Never fails: any lookup problem yields [`UNKNOWN_TITLE`].
pub async fn fetch_title(url: &str) -> String {
    match try_fetch_title(url).await {
        Ok(title) => title,
        Err(e) => {
            warn!(url = %url, "Could not read video title: {}", e);
            UNKNOWN_TITLE.to_string()
        }
    }
}

async fn try_fetch_title(url: &str) -> MediaResult<String> {
    check_ytdlp()?;

    let output = Command::new("yt-dlp")
        .args(["--print", "title", "--no-download", "--no-playlist", "--no-warnings"])
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::download_failed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    first_non_empty_line(&String::from_utf8_lossy(&output.stdout))
        .ok_or_else(|| MediaError::download_failed("yt-dlp returned an empty title"))
}

fn first_non_empty_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

fn is_rate_limited(stderr: &str) -> bool {
    stderr.contains("429")
        || stderr.contains("Too Many Requests")
        || stderr.contains("rate limit")
        || stderr.contains("Sign in to confirm")
}
