//! Timestamp rebase: segment-local finding times onto the source timeline.

use tracing::debug;
use vsafe_models::{format_clock, parse_clock, Finding, SegmentReport};

/// Shift every finding of `report` forward by `offset_secs`.
///
/// Returns a new report; the input is left untouched. With a zero offset
/// the result is an equal copy. Rebased timestamps are always `HH:MM:SS`
/// with unbounded hours.
///
/// A timestamp that is neither `MM:SS` nor `HH:MM:SS` counts as `0`
/// seconds, so it lands on the segment start.
pub fn rebase(report: &SegmentReport, offset_secs: u64) -> SegmentReport {
    if offset_secs == 0 {
        return report.clone();
    }

    SegmentReport {
        safety_score: report.safety_score,
        summary: report.summary.clone(),
        flags: report
            .flags
            .iter()
            .map(|finding| rebase_finding(finding, offset_secs))
            .collect(),
    }
}

fn rebase_finding(finding: &Finding, offset_secs: u64) -> Finding {
    let local = parse_clock(&finding.timestamp).unwrap_or_else(|e| {
        debug!(timestamp = %finding.timestamp, "Unparseable finding timestamp, using 0: {}", e);
        0
    });
    finding.with_timestamp(format_clock(local.saturating_add(offset_secs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsafe_models::{Category, Severity};

    fn report(timestamps: &[&str]) -> SegmentReport {
        SegmentReport {
            safety_score: 60,
            summary: "segment".into(),
            flags: timestamps
                .iter()
                .map(|ts| Finding::new(*ts, Category::Violence, Severity::Medium, "fight"))
                .collect(),
        }
    }

    fn timestamps(report: &SegmentReport) -> Vec<&str> {
        report.flags.iter().map(|f| f.timestamp.as_str()).collect()
    }

    #[test]
    fn test_zero_offset_is_identity() {
        let original = report(&["05:00", "1:02:03", "garbage"]);
        assert_eq!(rebase(&original, 0), original);
    }

    #[test]
    fn test_minutes_seconds_rebased_to_full_clock() {
        let rebased = rebase(&report(&["05:00"]), 1200);
        assert_eq!(timestamps(&rebased), ["00:25:00"]);
    }

    #[test]
    fn test_hours_form_rebased() {
        let rebased = rebase(&report(&["00:09:59"]), 600);
        assert_eq!(timestamps(&rebased), ["00:19:59"]);
    }

    #[test]
    fn test_unbounded_hours() {
        let rebased = rebase(&report(&["23:30:00"]), 5400);
        assert_eq!(timestamps(&rebased), ["25:00:00"]);
    }

    #[test]
    fn test_unparseable_timestamp_lands_on_offset() {
        let rebased = rebase(&report(&["90", "1:2:3:4", "ab:cd"]), 600);
        assert_eq!(timestamps(&rebased), ["00:10:00", "00:10:00", "00:10:00"]);
    }

    #[test]
    fn test_out_of_range_timestamp_lands_on_offset() {
        let rebased = rebase(&report(&["9999999999999999:00:00", "999999999999999999:00"]), 600);
        assert_eq!(timestamps(&rebased), ["00:10:00", "00:10:00"]);
    }

    #[test]
    fn test_rebase_is_additive() {
        let original = report(&["01:15", "09:59"]);
        let twice = rebase(&rebase(&original, 600), 1200);
        let once = rebase(&original, 1800);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let original = report(&["05:00"]);
        let _ = rebase(&original, 1200);
        assert_eq!(original.flags[0].timestamp, "05:00");
    }

    #[test]
    fn test_other_fields_preserved() {
        let original = report(&["00:30"]);
        let rebased = rebase(&original, 60);
        assert_eq!(rebased.safety_score, original.safety_score);
        assert_eq!(rebased.summary, original.summary);
        assert_eq!(rebased.flags[0].description, "fight");
        assert_eq!(rebased.flags[0].category, Category::Violence);
    }
}
