//! Time-range extraction.
//!
//! Segments are re-encoded rather than stream-copied so that each one starts
//! on a keyframe and is independently decodable by the analysis service.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Video codec used for extracted segments.
pub const SEGMENT_VIDEO_CODEC: &str = "libx264";

/// Audio codec used for extracted segments.
pub const SEGMENT_AUDIO_CODEC: &str = "aac";

/// Build the FFmpeg command for a `[start_secs, end_secs)` extraction.
pub fn extract_range_command(
    input: &Path,
    output: &Path,
    start_secs: f64,
    end_secs: f64,
) -> MediaResult<FfmpegCommand> {
    if !(start_secs >= 0.0 && end_secs > start_secs) {
        return Err(MediaError::InvalidRange(format!(
            "[{:.3}, {:.3})",
            start_secs, end_secs
        )));
    }

    Ok(FfmpegCommand::new(input, output)
        .seek(start_secs)
        .duration(end_secs - start_secs)
        .video_codec(SEGMENT_VIDEO_CODEC)
        .audio_codec(SEGMENT_AUDIO_CODEC)
        .preset("veryfast"))
}

/// Extract `[start_secs, end_secs)` of `input` into a new file at `output`.
pub async fn extract_range(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    start_secs: f64,
    end_secs: f64,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let cmd = extract_range_command(input, output, start_secs, end_secs)?;

    info!(
        "Extracting range: {} -> {} ({:.2}s - {:.2}s)",
        input.display(),
        output.display(),
        start_secs,
        end_secs
    );

    FfmpegRunner::new().run(&cmd).await?;

    if !output.exists() {
        return Err(MediaError::ffmpeg_failed(
            "FFmpeg reported success but produced no output file",
            None,
            None,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_range_command_uses_segment_codecs() {
        let cmd = extract_range_command(Path::new("in.mp4"), Path::new("out.mp4"), 1200.0, 1800.0)
            .unwrap();
        let args = cmd.build_args();
        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "600.000");
        let cv = args.iter().position(|a| a == "-c:v").unwrap();
        assert_eq!(args[cv + 1], SEGMENT_VIDEO_CODEC);
        let ca = args.iter().position(|a| a == "-c:a").unwrap();
        assert_eq!(args[ca + 1], SEGMENT_AUDIO_CODEC);
    }

    #[test]
    fn test_extract_range_command_rejects_empty_range() {
        let result = extract_range_command(Path::new("in.mp4"), Path::new("out.mp4"), 600.0, 600.0);
        assert!(matches!(result, Err(MediaError::InvalidRange(_))));
        let result = extract_range_command(Path::new("in.mp4"), Path::new("out.mp4"), -1.0, 10.0);
        assert!(matches!(result, Err(MediaError::InvalidRange(_))));
    }

    #[tokio::test]
    async fn test_extract_range_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.mp4");
        let result = extract_range(missing, dir.path().join("out.mp4"), 0.0, 1.0).await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }
}
