//! Posture Analysis
//!
//! Per-frame posture classification from skeletal keypoints:
//! - Shoulder tilt (shoulder line against horizontal)
//! - Head side tilt (ear line against horizontal)
//! - Head forward tilt (nose against the vertical above mid-shoulder)

pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod geometry;

pub use analysis::{PostureIssue, PostureMetrics, PostureState, PostureVerdict};
pub use analyzer::PostureAnalyzer;
pub use config::PostureConfig;

use thiserror::Error;

/// Posture error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PostureError {
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}
