//! Skeletal keypoint types produced by the pose model

use serde::{Deserialize, Serialize};

/// Landmark names emitted by single-pose models (COCO ordering)
pub mod names {
    pub const NOSE: &str = "nose";
    pub const LEFT_EYE: &str = "left_eye";
    pub const RIGHT_EYE: &str = "right_eye";
    pub const LEFT_EAR: &str = "left_ear";
    pub const RIGHT_EAR: &str = "right_ear";
    pub const LEFT_SHOULDER: &str = "left_shoulder";
    pub const RIGHT_SHOULDER: &str = "right_shoulder";
    pub const LEFT_ELBOW: &str = "left_elbow";
    pub const RIGHT_ELBOW: &str = "right_elbow";
    pub const LEFT_WRIST: &str = "left_wrist";
    pub const RIGHT_WRIST: &str = "right_wrist";
    pub const LEFT_HIP: &str = "left_hip";
    pub const RIGHT_HIP: &str = "right_hip";
    pub const LEFT_KNEE: &str = "left_knee";
    pub const RIGHT_KNEE: &str = "right_knee";
    pub const LEFT_ANKLE: &str = "left_ankle";
    pub const RIGHT_ANKLE: &str = "right_ankle";

    /// All seventeen landmarks in model output order
    pub const ALL: [&str; 17] = [
        NOSE,
        LEFT_EYE,
        RIGHT_EYE,
        LEFT_EAR,
        RIGHT_EAR,
        LEFT_SHOULDER,
        RIGHT_SHOULDER,
        LEFT_ELBOW,
        RIGHT_ELBOW,
        LEFT_WRIST,
        RIGHT_WRIST,
        LEFT_HIP,
        RIGHT_HIP,
        LEFT_KNEE,
        RIGHT_KNEE,
        LEFT_ANKLE,
        RIGHT_ANKLE,
    ];
}

/// 2D point in image space (pixels, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(&self, other: &Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Named, confidence-scored body landmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub name: String,
    pub x: f32,
    pub y: f32,
    /// Detection confidence (0-1)
    pub score: f32,
}

impl Keypoint {
    pub fn new(name: impl Into<String>, x: f32, y: f32, score: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            score,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether the model is confident enough in this landmark
    pub fn is_usable(&self, min_confidence: f32) -> bool {
        self.score >= min_confidence
    }
}

/// Keypoints for one detected subject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub keypoints: Vec<Keypoint>,
    /// Overall pose score, when the model provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Pose {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self {
            keypoints,
            score: None,
        }
    }

    /// First keypoint with the given name
    pub fn keypoint(&self, name: &str) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.name == name)
    }

    /// Keypoints that pass the confidence threshold
    pub fn usable(&self, min_confidence: f32) -> impl Iterator<Item = &Keypoint> {
        self.keypoints
            .iter()
            .filter(move |kp| kp.is_usable(min_confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_and_distance() {
        let a = Point::new(100.0, 100.0);
        let b = Point::new(200.0, 100.0);
        assert_eq!(a.midpoint(&b), Point::new(150.0, 100.0));
        assert!((a.distance(&b) - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_usable_filter() {
        let pose = Pose::new(vec![
            Keypoint::new(names::NOSE, 10.0, 10.0, 0.9),
            Keypoint::new(names::LEFT_EAR, 5.0, 10.0, 0.3),
            Keypoint::new(names::RIGHT_EAR, 15.0, 10.0, 0.6),
        ]);

        let usable: Vec<_> = pose.usable(0.6).map(|kp| kp.name.as_str()).collect();
        assert_eq!(usable, vec![names::NOSE, names::RIGHT_EAR]);
    }

    #[test]
    fn test_keypoint_deserialize() {
        let json = r#"{"name":"nose","x":1.5,"y":2.0,"score":0.8}"#;
        let kp: Keypoint = serde_json::from_str(json).unwrap();
        assert_eq!(kp, Keypoint::new("nose", 1.5, 2.0, 0.8));
    }
}
