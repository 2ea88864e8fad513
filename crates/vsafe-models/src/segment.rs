//! Media segments and the segment planner.
//!
//! Long videos are analyzed in fixed-length windows. The planner is a pure
//! function of the media duration and the split policy.

use serde::{Deserialize, Serialize};

/// A contiguous `[start, end)` slice of the source media, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 0-based position in the plan
    pub index: usize,
    /// Start time in seconds (inclusive)
    pub start: f64,
    /// End time in seconds (exclusive)
    pub end: f64,
}

impl Segment {
    /// Length of the segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whole-second offset used to move segment-local timestamps onto the
    /// source timeline.
    pub fn offset_secs(&self) -> u64 {
        self.start.max(0.0).floor() as u64
    }

    /// 1-based label used in summaries and logs.
    pub fn part_number(&self) -> usize {
        self.index + 1
    }
}

/// Whether a video of `duration` seconds has to be split.
pub fn needs_split(duration: f64, threshold: f64) -> bool {
    duration > threshold
}

/// Plan the segments for a video.
///
/// - `duration <= threshold`: a single segment `[0, duration)`.
/// - otherwise: consecutive windows of `segment_length` seconds, the last one
///   clamped to `duration`.
///
/// # Examples
/// ```
/// use vsafe_models::segment::plan_segments;
/// let segments = plan_segments(1900.0, 600.0, 1200.0);
/// assert_eq!(segments.len(), 4);
/// assert_eq!(segments[3].start, 1800.0);
/// assert_eq!(segments[3].end, 1900.0);
/// ```
pub fn plan_segments(duration: f64, segment_length: f64, threshold: f64) -> Vec<Segment> {
    let duration = duration.max(0.0);
    let whole = Segment {
        index: 0,
        start: 0.0,
        end: duration,
    };

    if !needs_split(duration, threshold) || segment_length <= 0.0 || !segment_length.is_finite() {
        return vec![whole];
    }

    let mut segments = Vec::new();
    let mut index = 0usize;
    loop {
        // Multiply rather than accumulate so boundaries don't drift.
        let start = index as f64 * segment_length;
        if start >= duration {
            break;
        }
        segments.push(Segment {
            index,
            start,
            end: (start + segment_length).min(duration),
        });
        index += 1;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(segments: &[Segment]) -> (Vec<f64>, Vec<f64>) {
        (
            segments.iter().map(|s| s.start).collect(),
            segments.iter().map(|s| s.end).collect(),
        )
    }

    fn assert_partition(segments: &[Segment], duration: f64) {
        assert_eq!(segments.first().unwrap().start, 0.0);
        assert_eq!(segments.last().unwrap().end, duration);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert!(pair[0].start < pair[0].end);
        }
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.index, i);
        }
    }

    #[test]
    fn test_short_video_is_single_segment() {
        for duration in [0.5, 60.0, 1199.9, 1200.0] {
            let segments = plan_segments(duration, 600.0, 1200.0);
            assert_eq!(segments.len(), 1);
            assert_eq!(segments[0].start, 0.0);
            assert_eq!(segments[0].end, duration);
        }
    }

    #[test]
    fn test_long_video_partition() {
        let segments = plan_segments(1900.0, 600.0, 1200.0);
        let (starts, ends) = bounds(&segments);
        assert_eq!(starts, vec![0.0, 600.0, 1200.0, 1800.0]);
        assert_eq!(ends, vec![600.0, 1200.0, 1800.0, 1900.0]);
        assert_partition(&segments, 1900.0);
    }

    #[test]
    fn test_exact_split_has_no_empty_tail() {
        let segments = plan_segments(1800.0, 600.0, 1200.0);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].duration(), 600.0);
        assert_partition(&segments, 1800.0);
    }

    #[test]
    fn test_segment_count_is_ceiling() {
        for duration in [1200.5, 1799.0, 2400.0, 3601.25, 7200.0] {
            let segments = plan_segments(duration, 600.0, 1200.0);
            let expected = (duration / 600.0).ceil() as usize;
            assert_eq!(segments.len(), expected, "duration {}", duration);
            assert_partition(&segments, duration);
        }
    }

    #[test]
    fn test_invalid_segment_length_falls_back_to_whole() {
        let segments = plan_segments(5000.0, 0.0, 1200.0);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].end, 5000.0);
    }

    #[test]
    fn test_offset_and_part_number() {
        let segments = plan_segments(1900.0, 600.0, 1200.0);
        assert_eq!(segments[2].offset_secs(), 1200);
        assert_eq!(segments[2].part_number(), 3);
    }
}
