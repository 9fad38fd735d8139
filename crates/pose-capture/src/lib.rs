//! Pose Capture Library for Posture Monitoring
//!
//! Provides the data model shared by the posture pipeline and the seams to
//! the external collaborators that produce it:
//! - Webcam video source (one-time async acquisition)
//! - Pose estimation model (async, per frame, may fail)
//! - Mock and replay implementations for running without hardware

pub mod frame;
pub mod keypoint;
pub mod mock;
pub mod replay;
pub mod source;

pub use frame::VideoFrame;
pub use keypoint::{Keypoint, Point, Pose};
pub use mock::{MockCamera, MockPoseEstimator};
pub use replay::ReplayPoseEstimator;
pub use source::{BoxFuture, PoseEstimator, VideoSource};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capture error types
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to open camera: {0}")]
    Open(String),

    #[error("Failed to load pose model: {0}")]
    ModelLoad(String),

    #[error("Pose estimation failed: {0}")]
    Estimation(String),

    #[error("Malformed pose data: {0}")]
    Malformed(String),

    #[error("Model not loaded")]
    ModelNotLoaded,
}

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Requested capture width
    pub width: u32,
    /// Requested capture height
    pub height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
        }
    }
}
