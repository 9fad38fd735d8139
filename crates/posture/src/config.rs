//! Posture thresholds

use serde::{Deserialize, Serialize};

use crate::PostureError;

/// Posture analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostureConfig {
    /// Minimum keypoint confidence for a landmark to be used
    pub detection_confidence: f32,

    /// Shoulder tilt threshold (degrees)
    pub shoulder_angle_threshold: f32,

    /// Head side tilt threshold (degrees)
    pub head_side_tilt_threshold: f32,

    /// Head forward tilt threshold (degrees)
    pub head_forward_tilt_threshold: f32,

    /// Height of the vertical reference point above mid-shoulder (pixels)
    pub vertical_reference_px: f32,
}

impl Default for PostureConfig {
    fn default() -> Self {
        Self {
            detection_confidence: 0.6,
            shoulder_angle_threshold: 30.0,
            head_side_tilt_threshold: 40.0,
            head_forward_tilt_threshold: 40.0,
            vertical_reference_px: 100.0,
        }
    }
}

impl PostureConfig {
    /// Create strict config (lower thresholds)
    pub fn strict() -> Self {
        Self {
            shoulder_angle_threshold: 27.0,
            head_side_tilt_threshold: 35.0,
            head_forward_tilt_threshold: 30.0,
            ..Default::default()
        }
    }

    /// Create lenient config (higher thresholds)
    pub fn lenient() -> Self {
        Self {
            shoulder_angle_threshold: 35.0,
            head_side_tilt_threshold: 50.0,
            head_forward_tilt_threshold: 55.0,
            ..Default::default()
        }
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), PostureError> {
        check_range("detection_confidence", self.detection_confidence, 0.0, 1.0)?;
        check_range("shoulder_angle_threshold", self.shoulder_angle_threshold, 0.0, 360.0)?;
        check_range("head_side_tilt_threshold", self.head_side_tilt_threshold, 0.0, 360.0)?;
        check_range("head_forward_tilt_threshold", self.head_forward_tilt_threshold, 0.0, 180.0)?;
        check_range("vertical_reference_px", self.vertical_reference_px, f32::EPSILON, f32::MAX)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), PostureError> {
    // NaN fails both comparisons, so test containment rather than exclusion
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PostureError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PostureConfig::default().validate().is_ok());
        assert!(PostureConfig::strict().validate().is_ok());
        assert!(PostureConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_confidence_out_of_range() {
        let config = PostureConfig {
            detection_confidence: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PostureError::OutOfRange { field: "detection_confidence", .. })
        ));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = PostureConfig {
            head_side_tilt_threshold: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
