//! Mock camera and pose model for running without hardware

use tokio::time::Instant;
use tracing::info;

use crate::keypoint::names;
use crate::source::{BoxFuture, PoseEstimator, VideoSource};
use crate::{CaptureConfig, CaptureError, Keypoint, Pose, VideoFrame};

/// Camera that produces blank frames at whatever rate it is polled
pub struct MockCamera {
    config: CaptureConfig,
    opened_at: Option<Instant>,
    sequence: u32,
}

impl MockCamera {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            opened_at: None,
            sequence: 0,
        }
    }
}

impl Default for MockCamera {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}

impl VideoSource for MockCamera {
    fn name(&self) -> &str {
        "mock"
    }

    fn open(&mut self) -> BoxFuture<'_, Result<(), CaptureError>> {
        Box::pin(async move {
            info!(
                "Opening mock camera {}x{}",
                self.config.width, self.config.height
            );
            self.opened_at = Some(Instant::now());
            Ok(())
        })
    }

    fn current_frame(&mut self) -> Option<VideoFrame> {
        let opened_at = self.opened_at?;
        self.sequence = self.sequence.wrapping_add(1);
        Some(VideoFrame::blank(
            self.config.width,
            self.config.height,
            opened_at.elapsed().as_millis() as u64,
            self.sequence,
        ))
    }
}

/// Phase of the synthetic subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockPhase {
    Upright,
    Slouched,
    Away,
}

/// Pose model that replays a fixed cycle of upright, slouched and absent
/// subjects, switching phase every `phase_frames` estimates.
pub struct MockPoseEstimator {
    cycle: Vec<MockPhase>,
    phase_frames: u32,
    estimates: u32,
    loaded: bool,
}

impl MockPoseEstimator {
    pub fn new(phase_frames: u32) -> Self {
        Self::with_cycle(
            vec![MockPhase::Upright, MockPhase::Slouched, MockPhase::Away],
            phase_frames,
        )
    }

    pub fn with_cycle(cycle: Vec<MockPhase>, phase_frames: u32) -> Self {
        Self {
            cycle,
            phase_frames: phase_frames.max(1),
            estimates: 0,
            loaded: false,
        }
    }

    /// Phase that the next estimate will use
    pub fn current_phase(&self) -> Option<MockPhase> {
        if self.cycle.is_empty() {
            return None;
        }
        let idx = (self.estimates / self.phase_frames) as usize % self.cycle.len();
        Some(self.cycle[idx])
    }

    /// Subject facing the camera with level shoulders and head
    pub fn upright_pose() -> Pose {
        Pose::new(vec![
            Keypoint::new(names::NOSE, 300.0, 140.0, 0.9),
            Keypoint::new(names::LEFT_EYE, 315.0, 128.0, 0.9),
            Keypoint::new(names::RIGHT_EYE, 285.0, 128.0, 0.9),
            Keypoint::new(names::LEFT_EAR, 340.0, 150.0, 0.8),
            Keypoint::new(names::RIGHT_EAR, 260.0, 150.0, 0.8),
            Keypoint::new(names::LEFT_SHOULDER, 380.0, 250.0, 0.85),
            Keypoint::new(names::RIGHT_SHOULDER, 220.0, 250.0, 0.85),
        ])
    }

    /// Subject leaning to one side with the head dropped over a shoulder
    pub fn slouched_pose() -> Pose {
        Pose::new(vec![
            Keypoint::new(names::NOSE, 360.0, 190.0, 0.9),
            Keypoint::new(names::LEFT_EYE, 372.0, 176.0, 0.9),
            Keypoint::new(names::RIGHT_EYE, 345.0, 182.0, 0.9),
            Keypoint::new(names::LEFT_EAR, 395.0, 175.0, 0.8),
            Keypoint::new(names::RIGHT_EAR, 325.0, 215.0, 0.8),
            Keypoint::new(names::LEFT_SHOULDER, 380.0, 250.0, 0.85),
            Keypoint::new(names::RIGHT_SHOULDER, 220.0, 290.0, 0.85),
        ])
    }
}

impl Default for MockPoseEstimator {
    fn default() -> Self {
        // ~20s per phase at 10 fps
        Self::new(200)
    }
}

impl PoseEstimator for MockPoseEstimator {
    fn name(&self) -> &str {
        "mock"
    }

    fn load(&mut self) -> BoxFuture<'_, Result<(), CaptureError>> {
        Box::pin(async move {
            info!("Loading mock pose model ({} frames per phase)", self.phase_frames);
            self.loaded = true;
            Ok(())
        })
    }

    fn estimate_poses<'a>(
        &'a mut self,
        _frame: &'a VideoFrame,
    ) -> BoxFuture<'a, Result<Vec<Pose>, CaptureError>> {
        Box::pin(async move {
            if !self.loaded {
                return Err(CaptureError::ModelNotLoaded);
            }
            let phase = self.current_phase();
            self.estimates = self.estimates.wrapping_add(1);

            Ok(match phase {
                Some(MockPhase::Upright) => vec![Self::upright_pose()],
                Some(MockPhase::Slouched) => vec![Self::slouched_pose()],
                Some(MockPhase::Away) | None => vec![],
            })
        })
    }
}
