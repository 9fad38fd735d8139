//! Posture analysis results

use std::fmt;

use serde::{Deserialize, Serialize};

/// A violated posture rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostureIssue {
    /// Shoulder line tilted past the threshold
    ShouldersTilted,

    /// Ear line tilted past the threshold
    HeadTiltedSideways,

    /// Nose too far off the vertical above the shoulders
    HeadTiltedForward,
}

impl PostureIssue {
    /// User-facing correction hint
    pub fn message(&self) -> &'static str {
        match self {
            PostureIssue::ShouldersTilted => "Shoulders tilted - level your shoulders",
            PostureIssue::HeadTiltedSideways => "Head tilted sideways - straighten your head",
            PostureIssue::HeadTiltedForward => "Head tilted forward - pull your head back",
        }
    }
}

impl fmt::Display for PostureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Latched per-second posture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostureState {
    Good,
    Bad,
}

impl fmt::Display for PostureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostureState::Good => f.write_str("good"),
            PostureState::Bad => f.write_str("bad"),
        }
    }
}

/// Geometric posture metrics for one frame (degrees).
///
/// A metric is `None` when the keypoints it needs were not usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PostureMetrics {
    pub shoulder_angle: Option<f32>,
    pub head_side_tilt: Option<f32>,
    pub head_forward_tilt: Option<f32>,
}

impl PostureMetrics {
    /// Whether at least one metric could be computed
    pub fn any(&self) -> bool {
        self.shoulder_angle.is_some()
            || self.head_side_tilt.is_some()
            || self.head_forward_tilt.is_some()
    }
}

/// Complete per-frame verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostureVerdict {
    pub metrics: PostureMetrics,

    /// True iff no metric exceeded its threshold
    pub is_good_posture: bool,

    /// Violated rules, in shoulder / side tilt / forward tilt order
    pub issues: Vec<PostureIssue>,
}

impl PostureVerdict {
    pub fn state(&self) -> PostureState {
        if self.is_good_posture {
            PostureState::Good
        } else {
            PostureState::Bad
        }
    }

    /// Issue hints as display strings
    pub fn issue_messages(&self) -> Vec<&'static str> {
        self.issues.iter().map(PostureIssue::message).collect()
    }
}
