//! Per-frame posture analyzer

use std::collections::HashMap;

use pose_capture::keypoint::names;
use pose_capture::{Point, Pose};
use tracing::trace;

use crate::geometry::{
    angle_from_horizontal, three_point_angle, vertical_above, EAR_BASELINE_DEG,
    SHOULDER_BASELINE_DEG,
};
use crate::{PostureConfig, PostureIssue, PostureMetrics, PostureVerdict};

/// Stateless posture analyzer
#[derive(Debug, Clone, Default)]
pub struct PostureAnalyzer {
    config: PostureConfig,
}

impl PostureAnalyzer {
    pub fn new(config: PostureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PostureConfig {
        &self.config
    }

    /// Compute metrics for a pose and classify it against the thresholds
    pub fn analyze(&self, pose: &Pose) -> PostureVerdict {
        let metrics = self.metrics(pose);
        let verdict = self.judge(metrics);
        trace!(?metrics, good = verdict.is_good_posture, "Posture analyzed");
        verdict
    }

    /// Geometric metrics from the usable keypoints of a pose
    pub fn metrics(&self, pose: &Pose) -> PostureMetrics {
        // Later duplicates win, matching a name-keyed map built in order
        let usable: HashMap<&str, Point> = pose
            .usable(self.config.detection_confidence)
            .map(|kp| (kp.name.as_str(), kp.point()))
            .collect();

        let left_shoulder = usable.get(names::LEFT_SHOULDER).copied();
        let right_shoulder = usable.get(names::RIGHT_SHOULDER).copied();
        let left_ear = usable.get(names::LEFT_EAR).copied();
        let right_ear = usable.get(names::RIGHT_EAR).copied();
        let nose = usable.get(names::NOSE).copied();

        let shoulders = left_shoulder.zip(right_shoulder);

        let shoulder_angle =
            shoulders.map(|(l, r)| angle_from_horizontal(SHOULDER_BASELINE_DEG, l, r));

        let head_side_tilt = left_ear
            .zip(right_ear)
            .map(|(l, r)| angle_from_horizontal(EAR_BASELINE_DEG, l, r));

        let head_forward_tilt = match (shoulders, nose) {
            (Some((l, r)), Some(nose)) => {
                let mid = l.midpoint(&r);
                let vertical = vertical_above(mid, self.config.vertical_reference_px);
                three_point_angle(Some(vertical), Some(mid), Some(nose))
            }
            _ => None,
        };

        PostureMetrics {
            shoulder_angle,
            head_side_tilt,
            head_forward_tilt,
        }
    }

    /// Apply thresholds. Missing metrics never count against the user.
    pub fn judge(&self, metrics: PostureMetrics) -> PostureVerdict {
        let checks = [
            (
                metrics.shoulder_angle,
                self.config.shoulder_angle_threshold,
                PostureIssue::ShouldersTilted,
            ),
            (
                metrics.head_side_tilt,
                self.config.head_side_tilt_threshold,
                PostureIssue::HeadTiltedSideways,
            ),
            (
                metrics.head_forward_tilt,
                self.config.head_forward_tilt_threshold,
                PostureIssue::HeadTiltedForward,
            ),
        ];

        let issues: Vec<PostureIssue> = checks
            .into_iter()
            .filter(|(value, threshold, _)| value.is_some_and(|v| v > *threshold))
            .map(|(_, _, issue)| issue)
            .collect();

        PostureVerdict {
            metrics,
            is_good_posture: issues.is_empty(),
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pose_capture::Keypoint;
    use proptest::prelude::*;

    fn kp(name: &str, x: f32, y: f32) -> Keypoint {
        Keypoint::new(name, x, y, 0.9)
    }

    fn upright() -> Pose {
        Pose::new(vec![
            kp(names::NOSE, 300.0, 140.0),
            kp(names::LEFT_EAR, 340.0, 150.0),
            kp(names::RIGHT_EAR, 260.0, 150.0),
            kp(names::LEFT_SHOULDER, 380.0, 250.0),
            kp(names::RIGHT_SHOULDER, 220.0, 250.0),
        ])
    }

    #[test]
    fn test_upright_is_good() {
        let verdict = PostureAnalyzer::default().analyze(&upright());
        assert!(verdict.is_good_posture);
        assert!(verdict.issues.is_empty());

        let m = verdict.metrics;
        assert!((m.shoulder_angle.unwrap() - 25.0).abs() < 1e-3);
        assert!((m.head_side_tilt.unwrap() - 30.0).abs() < 1e-3);
        assert!(m.head_forward_tilt.unwrap() < 1e-3);
    }

    #[test]
    fn test_level_shoulders_in_image_order_exceed_threshold() {
        // Left shoulder on the image left: the 205° offset is not cancelled
        let pose = Pose::new(vec![
            kp(names::LEFT_SHOULDER, 100.0, 100.0),
            kp(names::RIGHT_SHOULDER, 200.0, 100.0),
        ]);
        let verdict = PostureAnalyzer::default().analyze(&pose);
        assert!((verdict.metrics.shoulder_angle.unwrap() - 205.0).abs() < 1e-3);
        assert_eq!(verdict.issues, vec![PostureIssue::ShouldersTilted]);
    }

    #[test]
    fn test_mock_slouch_flags_shoulders_and_head() {
        let verdict = PostureAnalyzer::default()
            .analyze(&pose_capture::MockPoseEstimator::slouched_pose());
        assert!(!verdict.is_good_posture);
        assert_eq!(
            verdict.issues,
            vec![PostureIssue::ShouldersTilted, PostureIssue::HeadTiltedSideways]
        );
    }

    #[test]
    fn test_forward_tilt() {
        let mut pose = upright();
        // Nose far to the side of the mid-shoulder vertical
        pose.keypoints[0] = kp(names::NOSE, 420.0, 180.0);
        let verdict = PostureAnalyzer::default().analyze(&pose);
        assert!(verdict.metrics.head_forward_tilt.unwrap() > 40.0);
        assert!(verdict.issues.contains(&PostureIssue::HeadTiltedForward));
    }

    #[test]
    fn test_low_confidence_keypoints_ignored() {
        let mut pose = upright();
        pose.keypoints[3].score = 0.59;
        let verdict = PostureAnalyzer::default().analyze(&pose);
        assert!(verdict.metrics.shoulder_angle.is_none());
        assert!(verdict.metrics.head_forward_tilt.is_none());
        assert!(verdict.metrics.head_side_tilt.is_some());

        // Exactly at the threshold counts as usable
        pose.keypoints[3].score = 0.6;
        let verdict = PostureAnalyzer::default().analyze(&pose);
        assert!(verdict.metrics.shoulder_angle.is_some());
    }

    #[test]
    fn test_empty_pose_is_good() {
        let verdict = PostureAnalyzer::default().analyze(&Pose::default());
        assert!(verdict.is_good_posture);
        assert!(!verdict.metrics.any());
    }

    #[test]
    fn test_issue_order_is_fixed() {
        let analyzer = PostureAnalyzer::default();
        let verdict = analyzer.judge(PostureMetrics {
            shoulder_angle: Some(90.0),
            head_side_tilt: Some(90.0),
            head_forward_tilt: Some(90.0),
        });
        assert_eq!(
            verdict.issues,
            vec![
                PostureIssue::ShouldersTilted,
                PostureIssue::HeadTiltedSideways,
                PostureIssue::HeadTiltedForward,
            ]
        );
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let analyzer = PostureAnalyzer::default();
        let verdict = analyzer.judge(PostureMetrics {
            shoulder_angle: Some(30.0),
            head_side_tilt: Some(40.0),
            head_forward_tilt: Some(40.0),
        });
        assert!(verdict.is_good_posture);
    }

    fn arb_keypoint(name: &'static str) -> impl Strategy<Value = Keypoint> {
        (0.0f32..640.0, 0.0f32..480.0, 0.0f32..=1.0)
            .prop_map(move |(x, y, score)| Keypoint::new(name, x, y, score))
    }

    fn arb_pose_without_shoulders() -> impl Strategy<Value = Pose> {
        (
            arb_keypoint(names::NOSE),
            arb_keypoint(names::LEFT_EAR),
            arb_keypoint(names::RIGHT_EAR),
            arb_keypoint(names::LEFT_EYE),
        )
            .prop_map(|(a, b, c, d)| Pose::new(vec![a, b, c, d]))
    }

    fn arb_full_pose() -> impl Strategy<Value = Pose> {
        (
            arb_keypoint(names::NOSE),
            arb_keypoint(names::LEFT_EAR),
            arb_keypoint(names::RIGHT_EAR),
            arb_keypoint(names::LEFT_SHOULDER),
            arb_keypoint(names::RIGHT_SHOULDER),
        )
            .prop_map(|(a, b, c, d, e)| Pose::new(vec![a, b, c, d, e]))
    }

    proptest! {
        #[test]
        fn prop_no_shoulders_no_shoulder_issue(pose in arb_pose_without_shoulders()) {
            let verdict = PostureAnalyzer::default().analyze(&pose);
            prop_assert!(verdict.metrics.shoulder_angle.is_none());
            prop_assert!(verdict.metrics.head_forward_tilt.is_none());
            prop_assert!(!verdict.issues.contains(&PostureIssue::ShouldersTilted));
        }

        #[test]
        fn prop_excess_metric_yields_one_issue(
            shoulder in 0.0f32..360.0,
            side in 0.0f32..360.0,
            forward in 0.0f32..180.0,
            t_shoulder in 0.0f32..90.0,
            t_side in 0.0f32..90.0,
            t_forward in 0.0f32..90.0,
        ) {
            let analyzer = PostureAnalyzer::new(PostureConfig {
                shoulder_angle_threshold: t_shoulder,
                head_side_tilt_threshold: t_side,
                head_forward_tilt_threshold: t_forward,
                ..Default::default()
            });
            let verdict = analyzer.judge(PostureMetrics {
                shoulder_angle: Some(shoulder),
                head_side_tilt: Some(side),
                head_forward_tilt: Some(forward),
            });

            for (value, threshold, issue) in [
                (shoulder, t_shoulder, PostureIssue::ShouldersTilted),
                (side, t_side, PostureIssue::HeadTiltedSideways),
                (forward, t_forward, PostureIssue::HeadTiltedForward),
            ] {
                let count = verdict.issues.iter().filter(|i| **i == issue).count();
                if value > threshold {
                    prop_assert!(!verdict.is_good_posture);
                    prop_assert_eq!(count, 1);
                } else {
                    prop_assert_eq!(count, 0);
                }
            }
        }

        #[test]
        fn prop_analyze_is_idempotent(pose in arb_full_pose()) {
            let analyzer = PostureAnalyzer::default();
            let first = analyzer.analyze(&pose);
            let second = analyzer.analyze(&pose);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_forward_tilt_never_nan(pose in arb_full_pose()) {
            let verdict = PostureAnalyzer::default().analyze(&pose);
            if let Some(angle) = verdict.metrics.head_forward_tilt {
                prop_assert!(!angle.is_nan());
                prop_assert!((0.0..=180.001).contains(&angle));
            }
        }
    }
}
