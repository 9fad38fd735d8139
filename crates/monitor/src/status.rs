//! User-facing session status

use std::fmt;

use posture::PostureIssue;

/// What the status line should show
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MonitorStatus {
    /// Acquiring the camera
    #[default]
    Starting,
    /// Camera open, model loading
    LoadingModel,
    /// Model loaded, no verdict yet
    Detecting,
    GoodPosture,
    FixPosture { issues: Vec<PostureIssue> },
    NoPoseDetected,
    /// Transient detection failure; the loop keeps running
    DetectionError(String),
    /// Startup failed; the session is over
    Failed(String),
    Stopped,
}

impl MonitorStatus {
    /// Whether the status signals a problem to the user
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            MonitorStatus::FixPosture { .. }
                | MonitorStatus::DetectionError(_)
                | MonitorStatus::Failed(_)
        )
    }
}

impl fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorStatus::Starting => f.write_str("Starting camera..."),
            MonitorStatus::LoadingModel => f.write_str("Loading pose detection model..."),
            MonitorStatus::Detecting => f.write_str("Models loaded. Detecting..."),
            MonitorStatus::GoodPosture => f.write_str("GOOD POSTURE"),
            MonitorStatus::FixPosture { issues } if issues.is_empty() => f.write_str("FIX POSTURE"),
            MonitorStatus::FixPosture { issues } => {
                let hints: Vec<&str> = issues.iter().map(PostureIssue::message).collect();
                write!(f, "FIX POSTURE ({})", hints.join("; "))
            }
            MonitorStatus::NoPoseDetected => f.write_str("No pose detected"),
            MonitorStatus::DetectionError(_) => f.write_str("Detection error"),
            MonitorStatus::Failed(reason) => write!(f, "Error: {}", reason),
            MonitorStatus::Stopped => f.write_str("Stopped"),
        }
    }
}
