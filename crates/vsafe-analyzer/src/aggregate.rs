//! Merge per-segment reports into the final report.

use vsafe_models::{FinalReport, SegmentReport, MAX_SAFETY_SCORE};

/// Combine segment reports, given in segment order.
///
/// - score: the minimum over all segments, or 100 when there are none
/// - summary: `"Part N: <summary>"` per segment (1-based), space separated
/// - flags: concatenated in segment order, without deduplication
pub fn aggregate<I>(title: impl Into<String>, reports: I) -> FinalReport
where
    I: IntoIterator<Item = SegmentReport>,
{
    let mut safety_score = MAX_SAFETY_SCORE;
    let mut parts = Vec::new();
    let mut flags = Vec::new();

    for (index, report) in reports.into_iter().enumerate() {
        safety_score = safety_score.min(report.safety_score);
        parts.push(format!("Part {}: {}", index + 1, report.summary));
        flags.extend(report.flags);
    }

    FinalReport {
        title: title.into(),
        safety_score,
        summary: parts.join(" "),
        flags,
    }
}
