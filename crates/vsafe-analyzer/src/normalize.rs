//! Result normalizer: raw model text to [`SegmentReport`].

use vsafe_models::{SegmentReport, MAX_SAFETY_SCORE};

use crate::error::{AnalyzerError, AnalyzerResult};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";
const EXCERPT_CHARS: usize = 200;

/// Parse the model's response text into a segment report.
///
/// A surrounding Markdown code fence (```` ```json ```` or bare
/// ```` ``` ````) is stripped first. Anything that does not then parse as a
/// complete report is a [`AnalyzerError::MalformedReport`].
pub fn normalize(raw: &str) -> AnalyzerResult<SegmentReport> {
    let body = strip_fences(raw);

    let report: SegmentReport = serde_json::from_str(body)
        .map_err(|e| AnalyzerError::malformed_report(e.to_string(), excerpt(raw)))?;

    if report.safety_score > MAX_SAFETY_SCORE {
        return Err(AnalyzerError::malformed_report(
            format!(
                "safety_score {} is out of range 0-{}",
                report.safety_score, MAX_SAFETY_SCORE
            ),
            excerpt(raw),
        ));
    }

    Ok(report)
}

fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(JSON_FENCE) {
        text = rest;
    } else if let Some(rest) = text.strip_prefix(FENCE) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }
    text.trim()
}

fn excerpt(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().count() <= EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}
