//! Clock timestamp parsing and formatting.
//!
//! Findings reported by the analysis model carry clock values in either
//! `MM:SS` or `HH:MM:SS` form. Internally a timestamp is a count of whole
//! seconds; formatting always produces zero-padded `HH:MM:SS`.

/// Parse a clock timestamp into whole seconds.
///
/// Accepts exactly two shapes:
/// - `MM:SS`
/// - `HH:MM:SS`
///
/// # Examples
/// ```
/// use vsafe_models::timestamp::parse_clock;
/// assert_eq!(parse_clock("05:00").unwrap(), 300);
/// assert_eq!(parse_clock("01:30:00").unwrap(), 5400);
/// assert!(parse_clock("90").is_err());
/// ```
pub fn parse_clock(ts: &str) -> Result<u64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let parts: Vec<&str> = ts.split(':').collect();
    match parts.as_slice() {
        [minutes, seconds] => {
            let minutes = parse_component("minutes", minutes)?;
            let seconds = parse_component("seconds", seconds)?;
            total_secs(ts, 0, minutes, seconds)
        }
        [hours, minutes, seconds] => {
            let hours = parse_component("hours", hours)?;
            let minutes = parse_component("minutes", minutes)?;
            let seconds = parse_component("seconds", seconds)?;
            total_secs(ts, hours, minutes, seconds)
        }
        _ => Err(TimestampError::InvalidFormat(ts.to_string())),
    }
}

fn parse_component(component: &'static str, value: &str) -> Result<u64, TimestampError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| TimestampError::InvalidValue(component, value.to_string()))
}

fn total_secs(
    ts: &str,
    hours: u64,
    minutes: u64,
    seconds: u64,
) -> Result<u64, TimestampError> {
    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| TimestampError::Overflow(ts.to_string()))
}

/// Format whole seconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24; 25 hours formats as `25:00:00`.
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// Timestamp string is empty
    Empty,
    /// A component is not a non-negative integer
    InvalidValue(&'static str, String),
    /// Neither `MM:SS` nor `HH:MM:SS`
    InvalidFormat(String),
    /// Total does not fit in a `u64` second count
    Overflow(String),
}

impl std::fmt::Display for TimestampError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Timestamp cannot be empty"),
            Self::InvalidValue(component, value) => {
                write!(f, "Invalid {} value: {}", component, value)
            }
            Self::InvalidFormat(ts) => write!(
                f,
                "Invalid timestamp format '{}'. Use MM:SS or HH:MM:SS",
                ts
            ),
            Self::Overflow(ts) => write!(f, "Timestamp '{}' is out of range", ts),
        }
    }
}

impl std::error::Error for TimestampError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_mm_ss() {
        assert_eq!(parse_clock("00:00").unwrap(), 0);
        assert_eq!(parse_clock("05:30").unwrap(), 330);
        assert_eq!(parse_clock("53:53").unwrap(), 3233);
    }

    #[test]
    fn test_parse_clock_hh_mm_ss() {
        assert_eq!(parse_clock("00:00:00").unwrap(), 0);
        assert_eq!(parse_clock("01:00:00").unwrap(), 3600);
        assert_eq!(parse_clock("01:30:45").unwrap(), 5445);
        assert_eq!(parse_clock("25:00:00").unwrap(), 90000);
    }

    #[test]
    fn test_parse_clock_errors() {
        assert!(matches!(parse_clock(""), Err(TimestampError::Empty)));
        assert!(matches!(parse_clock("  "), Err(TimestampError::Empty)));
        assert!(matches!(parse_clock("90"), Err(TimestampError::InvalidFormat(_))));
        assert!(matches!(parse_clock("1:2:3:4"), Err(TimestampError::InvalidFormat(_))));
        assert!(matches!(parse_clock("ab:10"), Err(TimestampError::InvalidValue("minutes", _))));
        assert!(matches!(parse_clock("00:30.5"), Err(TimestampError::InvalidValue("seconds", _))));
    }

    #[test]
    fn test_parse_clock_overflow_is_error() {
        assert!(matches!(
            parse_clock("9999999999999999:00:00"),
            Err(TimestampError::Overflow(_))
        ));
        assert!(matches!(
            parse_clock("999999999999999999:00"),
            Err(TimestampError::Overflow(_))
        ));
        assert!(matches!(
            parse_clock("00:00:18446744073709551615"),
            Ok(u64::MAX)
        ));
        assert!(matches!(
            parse_clock("00:01:18446744073709551615"),
            Err(TimestampError::Overflow(_))
        ));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(90), "00:01:30");
        assert_eq!(format_clock(1500), "00:25:00");
        assert_eq!(format_clock(3661), "01:01:01");
        assert_eq!(format_clock(90000), "25:00:00");
    }

    #[test]
    fn test_clock_round_trip() {
        for secs in [0, 1, 59, 60, 599, 3599, 3600, 86399, 86400, 360_000] {
            assert_eq!(parse_clock(&format_clock(secs)).unwrap(), secs);
        }
    }
}
