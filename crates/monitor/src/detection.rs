//! Frame-rate-limited detection loop

use std::time::Duration;

use pose_capture::{PoseEstimator, VideoSource};
use posture::{PostureAnalyzer, PostureState, PostureVerdict};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::DetectionConfig;

/// Result of one invocation of the loop
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    /// Too soon after the previous pass
    Skipped,
    /// The video source had no frame yet
    NoFrame,
    /// Nobody in the frame
    NoPose,
    /// First pose analyzed
    Analyzed(PostureVerdict),
    /// Estimation failed or returned unusable data
    Failed(String),
}

/// Detection loop state: pacing plus the latched posture state.
///
/// The owner calls [`DetectionLoop::tick`] on every frame-presentation
/// callback; a pass only runs when more than `1 / fps_limit` has elapsed
/// since the previous one. Failures never stop the loop.
pub struct DetectionLoop {
    analyzer: PostureAnalyzer,
    min_frame_interval: Duration,
    last_frame: Option<Instant>,
    last_state: Option<PostureState>,
    passes: u64,
    failures: u64,
}

impl DetectionLoop {
    pub fn new(config: &DetectionConfig, analyzer: PostureAnalyzer) -> Self {
        Self {
            analyzer,
            min_frame_interval: config.min_frame_interval(),
            last_frame: None,
            last_state: None,
            passes: 0,
            failures: 0,
        }
    }

    /// Whether enough time has passed for another pass
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_frame
            .map_or(true, |last| now.duration_since(last) > self.min_frame_interval)
    }

    /// Run one pass if due.
    pub async fn tick(
        &mut self,
        now: Instant,
        video: &mut dyn VideoSource,
        estimator: &mut dyn PoseEstimator,
    ) -> PassOutcome {
        if !self.is_due(now) {
            return PassOutcome::Skipped;
        }
        self.last_frame = Some(now);
        self.passes += 1;
        metrics::counter!("posture_detection_passes_total").increment(1);

        let outcome = self.pass(video, estimator).await;
        match &outcome {
            PassOutcome::Analyzed(verdict) => self.last_state = Some(verdict.state()),
            PassOutcome::NoPose => self.last_state = None,
            PassOutcome::Failed(reason) => {
                self.failures += 1;
                metrics::counter!("posture_detection_errors_total").increment(1);
                warn!("Error during detection: {}", reason);
            }
            PassOutcome::NoFrame | PassOutcome::Skipped => {}
        }
        outcome
    }

    async fn pass(
        &self,
        video: &mut dyn VideoSource,
        estimator: &mut dyn PoseEstimator,
    ) -> PassOutcome {
        let Some(frame) = video.current_frame() else {
            debug!("No frame available from {}", video.name());
            return PassOutcome::NoFrame;
        };

        let poses = match estimator.estimate_poses(&frame).await {
            Ok(poses) => poses,
            Err(e) => return PassOutcome::Failed(e.to_string()),
        };

        // Single-subject: extra poses are ignored
        let Some(pose) = poses.first() else {
            return PassOutcome::NoPose;
        };

        if let Some(bad) = pose
            .keypoints
            .iter()
            .find(|kp| !(kp.x.is_finite() && kp.y.is_finite() && kp.score.is_finite()))
        {
            return PassOutcome::Failed(format!("non-finite keypoint '{}'", bad.name));
        }

        PassOutcome::Analyzed(self.analyzer.analyze(pose))
    }

    /// Latched state from the latest successful pass
    pub fn last_state(&self) -> Option<PostureState> {
        self.last_state
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }
}
