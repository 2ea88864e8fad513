//! Safety report models.

use serde::{Deserialize, Serialize};

/// Highest (safest) possible score.
pub const MAX_SAFETY_SCORE: u8 = 100;

/// Kind of safety concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(alias = "adult")]
    Adult,
    #[serde(alias = "violence")]
    Violence,
    #[serde(alias = "hate")]
    Hate,
    #[serde(alias = "dangerous")]
    Dangerous,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Adult => "Adult",
            Category::Violence => "Violence",
            Category::Hate => "Hate",
            Category::Dangerous => "Dangerous",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single flagged moment in the video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Clock position (`MM:SS` or `HH:MM:SS`)
    pub timestamp: String,
    pub category: Category,
    pub severity: Severity,
    pub description: String,
}

impl Finding {
    pub fn new(
        timestamp: impl Into<String>,
        category: Category,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            category,
            severity,
            description: description.into(),
        }
    }

    /// Copy of this finding with a different timestamp.
    pub fn with_timestamp(&self, timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            ..self.clone()
        }
    }
}

/// Analysis result for one segment, as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentReport {
    /// 0 (very unsafe) to 100 (safe)
    pub safety_score: u8,
    pub summary: String,
    #[serde(default)]
    pub flags: Vec<Finding>,
}

/// Report for the whole video.
///
/// Field order is the order of the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    pub title: String,
    pub safety_score: u8,
    pub summary: String,
    pub flags: Vec<Finding>,
}

impl FinalReport {
    /// Attach a title to a single-pass segment report.
    pub fn from_segment(title: impl Into<String>, report: SegmentReport) -> Self {
        Self {
            title: title.into(),
            safety_score: report.safety_score,
            summary: report.summary,
            flags: report.flags,
        }
    }
}
