//! Collaborator traits for the video source and pose model

use std::future::Future;
use std::pin::Pin;

use crate::{CaptureError, Pose, VideoFrame};

/// Boxed future returned by the async trait methods below
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Live camera feed.
///
/// `open()` is called once at session start; failure there is fatal for the
/// session. After that the session reads whatever frame is current on each
/// detection pass.
pub trait VideoSource: Send {
    /// Human-readable source name (e.g. "webcam", "mock")
    fn name(&self) -> &str;

    /// Acquire the camera stream.
    fn open(&mut self) -> BoxFuture<'_, Result<(), CaptureError>>;

    /// Latest frame, or `None` before the first frame arrives.
    fn current_frame(&mut self) -> Option<VideoFrame>;
}

/// Third-party pose model.
pub trait PoseEstimator: Send {
    /// Human-readable model name
    fn name(&self) -> &str;

    /// Load model weights. Called once after the camera is open.
    fn load(&mut self) -> BoxFuture<'_, Result<(), CaptureError>>;

    /// Estimate zero or more poses in a frame.
    fn estimate_poses<'a>(
        &'a mut self,
        frame: &'a VideoFrame,
    ) -> BoxFuture<'a, Result<Vec<Pose>, CaptureError>>;
}
