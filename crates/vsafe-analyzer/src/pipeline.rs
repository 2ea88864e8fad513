//! Pipeline driver.
//!
//! One run: resolve the input, probe its duration, then analyze it either
//! in a single pass or segment by segment, and merge the results. Every
//! file the run creates lives in a per-run scratch directory that is removed
//! when the run ends, whatever the outcome.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{info, warn, Instrument};
use vsafe_gemini::GeminiClient;
use vsafe_models::{needs_split, plan_segments, FinalReport, Segment, SegmentReport};

use crate::aggregate::aggregate;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerResult;
use crate::job::JobDriver;
use crate::logging::RunLogger;
use crate::media::{file_title, FfmpegBackend, MediaBackend, MediaInput};
use crate::metrics::{record_run, record_segment_analyzed};
use crate::normalize::normalize;
use crate::rebase::rebase;
use crate::remote::AnalysisService;

const SCRATCH_PREFIX: &str = "vsafe-";
const SOURCE_FILE_NAME: &str = "source.mp4";

/// Video safety analysis pipeline.
pub struct Pipeline<S, M> {
    config: AnalyzerConfig,
    service: S,
    media: M,
}

impl Pipeline<GeminiClient, FfmpegBackend> {
    /// Pipeline backed by the Gemini API and the local ffmpeg toolchain.
    pub fn from_config(config: AnalyzerConfig) -> AnalyzerResult<Self> {
        config.validate()?;
        let client = GeminiClient::new(config.gemini_config())?;
        Ok(Self::new(config, client, FfmpegBackend::new()))
    }
}

impl<S: AnalysisService, M: MediaBackend> Pipeline<S, M> {
    pub fn new(config: AnalyzerConfig, service: S, media: M) -> Self {
        Self {
            config,
            service,
            media,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Analyze one video.
    ///
    /// Fails on the first unrecovered error; no partial report is returned.
    pub async fn run(&self, input: &MediaInput) -> AnalyzerResult<FinalReport> {
        let logger = RunLogger::new("analyze");
        let span = logger.create_span();

        async {
            logger.log_start(&input.describe());
            let result = self.execute(input, &logger).await;
            match &result {
                Ok(report) => {
                    record_run("success");
                    logger.log_completion(&format!(
                        "safety_score={} flags={}",
                        report.safety_score,
                        report.flags.len()
                    ));
                }
                Err(e) => {
                    record_run(e.category());
                    logger.log_error(&e.to_string());
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, input: &MediaInput, logger: &RunLogger) -> AnalyzerResult<FinalReport> {
        input.validate()?;

        let scratch = self.scratch_dir()?;

        let (source, title) = match input {
            MediaInput::Url(url) => {
                let title = self.media.title(url).await;
                let dest = scratch.path().join(SOURCE_FILE_NAME);
                self.media.download(url, &dest).await?;
                (dest, title)
            }
            MediaInput::File(path) => (path.clone(), file_title(path)),
        };

        let duration = self.media.probe_duration(&source).await?;
        let driver = JobDriver::new(&self.service, &self.config);

        let report = if needs_split(duration, self.config.chunk_threshold_secs) {
            let segments = plan_segments(
                duration,
                self.config.segment_secs,
                self.config.chunk_threshold_secs,
            );
            logger.log_progress(&format!(
                "duration {:.1}s exceeds {:.0}s, analyzing {} segments",
                duration,
                self.config.chunk_threshold_secs,
                segments.len()
            ));

            let mut reports = Vec::with_capacity(segments.len());
            for segment in &segments {
                let report = self
                    .analyze_segment(&driver, &source, scratch.path(), segment, segments.len())
                    .await?;
                reports.push(report);
            }
            aggregate(title, reports)
        } else {
            logger.log_progress(&format!("duration {:.1}s, single pass", duration));
            let raw = driver.run(&source).await?;
            let report = normalize(&raw)?;
            record_segment_analyzed();
            FinalReport::from_segment(title, report)
        };

        if let Err(e) = scratch.close() {
            warn!("Failed to remove scratch directory: {}", e);
        }
        Ok(report)
    }

    async fn analyze_segment(
        &self,
        driver: &JobDriver<'_, S>,
        source: &Path,
        scratch: &Path,
        segment: &Segment,
        total: usize,
    ) -> AnalyzerResult<SegmentReport> {
        let path = segment_path(scratch, segment);
        info!(
            part = segment.part_number(),
            total,
            start = segment.start,
            end = segment.end,
            "Analyzing segment"
        );

        self.media.extract(source, &path, segment).await?;
        let raw = driver.run(&path).await;

        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(path = %path.display(), "Failed to remove segment file: {}", e);
        }

        let report = normalize(&raw?)?;
        record_segment_analyzed();
        Ok(rebase(&report, segment.offset_secs()))
    }

    fn scratch_dir(&self) -> AnalyzerResult<TempDir> {
        std::fs::create_dir_all(&self.config.work_dir)?;
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(&self.config.work_dir)?;
        Ok(dir)
    }
}

fn segment_path(scratch: &Path, segment: &Segment) -> PathBuf {
    scratch.join(format!("segment_{:03}.mp4", segment.index))
}
