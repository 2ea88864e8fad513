//! Shared data models for VSafe.
//!
//! This crate provides Serde-serializable types for:
//! - Safety findings and their categories/severities
//! - Per-segment and final analysis reports
//! - Media segments and the segment planner
//! - Clock timestamp parsing and formatting

pub mod report;
pub mod segment;
pub mod timestamp;

// Re-export common types
pub use report::{Category, FinalReport, Finding, SegmentReport, Severity, MAX_SAFETY_SCORE};
pub use segment::{needs_split, plan_segments, Segment};
pub use timestamp::{format_clock, parse_clock, TimestampError};
