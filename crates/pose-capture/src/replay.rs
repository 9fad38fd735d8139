//! Replay of recorded pose model output
//!
//! Each non-empty line of the input is a JSON array of keypoints for the
//! single subject in that frame; `[]` means nobody was detected. Lines are
//! replayed in order, one per estimate, wrapping at the end.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::source::{BoxFuture, PoseEstimator};
use crate::{CaptureError, Keypoint, Pose, VideoFrame};

/// Pose model stand-in fed from a JSON-lines recording
pub struct ReplayPoseEstimator {
    path: Option<PathBuf>,
    lines: Vec<String>,
    cursor: usize,
}

impl ReplayPoseEstimator {
    /// Replay from a file, read on `load()`
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            lines: Vec::new(),
            cursor: 0,
        }
    }

    /// Replay from an in-memory recording
    pub fn from_lines(contents: &str) -> Self {
        Self {
            path: None,
            lines: split_lines(contents),
            cursor: 0,
        }
    }

    /// Number of recorded frames
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn parse_line(line: &str) -> Result<Vec<Pose>, CaptureError> {
        let keypoints: Vec<Keypoint> =
            serde_json::from_str(line).map_err(|e| CaptureError::Malformed(e.to_string()))?;

        if keypoints.is_empty() {
            Ok(vec![])
        } else {
            Ok(vec![Pose::new(keypoints)])
        }
    }
}

fn split_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

impl PoseEstimator for ReplayPoseEstimator {
    fn name(&self) -> &str {
        "replay"
    }

    fn load(&mut self) -> BoxFuture<'_, Result<(), CaptureError>> {
        Box::pin(async move {
            if let Some(path) = &self.path {
                info!("Loading pose recording from {}", path.display());
                let contents = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| CaptureError::ModelLoad(format!("{}: {}", path.display(), e)))?;
                self.lines = split_lines(&contents);
                self.cursor = 0;
            }

            if self.lines.is_empty() {
                return Err(CaptureError::ModelLoad("pose recording is empty".into()));
            }

            info!("Pose recording loaded: {} frames", self.lines.len());
            Ok(())
        })
    }

    fn estimate_poses<'a>(
        &'a mut self,
        _frame: &'a VideoFrame,
    ) -> BoxFuture<'a, Result<Vec<Pose>, CaptureError>> {
        Box::pin(async move {
            if self.lines.is_empty() {
                return Err(CaptureError::ModelNotLoaded);
            }

            let idx = self.cursor;
            self.cursor = (self.cursor + 1) % self.lines.len();
            debug!("Replaying pose frame {}", idx);

            Self::parse_line(&self.lines[idx])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDING: &str = r#"
[{"name":"nose","x":300,"y":140,"score":0.9}]
[]
not json
"#;

    #[tokio::test]
    async fn test_replay_in_order_and_wraps() {
        let mut model = ReplayPoseEstimator::from_lines(RECORDING);
        model.load().await.unwrap();
        assert_eq!(model.len(), 3);

        let frame = VideoFrame::blank(1, 1, 0, 0);
        let first = model.estimate_poses(&frame).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].keypoints[0].name, "nose");

        assert!(model.estimate_poses(&frame).await.unwrap().is_empty());

        assert!(matches!(
            model.estimate_poses(&frame).await,
            Err(CaptureError::Malformed(_))
        ));

        // Wrapped back to the first line
        assert_eq!(model.estimate_poses(&frame).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_recording_fails_load() {
        let mut model = ReplayPoseEstimator::from_lines("\n\n");
        assert!(matches!(model.load().await, Err(CaptureError::ModelLoad(_))));
    }

    #[tokio::test]
    async fn test_missing_file_fails_load() {
        let mut model = ReplayPoseEstimator::from_path("/nonexistent/poses.jsonl");
        assert!(matches!(model.load().await, Err(CaptureError::ModelLoad(_))));
    }
}
