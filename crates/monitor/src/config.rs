//! Layered monitor configuration
//!
//! Built-in defaults, then an optional TOML file, then `POSTURE_*`
//! environment variables (`__` separates nested keys, e.g.
//! `POSTURE_AGGREGATOR__SOUND_COOLDOWN_MS=5000`).

use std::path::Path;
use std::time::Duration;

use alerting::AggregatorConfig;
use break_reminder::ReminderConfig;
use pose_capture::CaptureConfig;
use posture::PostureConfig;
use serde::{Deserialize, Serialize};

use crate::MonitorError;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "POSTURE";

/// `POSTURE_<SECTION>__<KEY>` variables; the prefix is joined with a single
/// underscore, nested keys with a double one
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Detection loop pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Maximum detection passes per second
    pub fps_limit: u32,
    /// Frame-presentation callback period (ms)
    pub refresh_interval_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            fps_limit: 10,
            refresh_interval_ms: 16,
        }
    }
}

impl DetectionConfig {
    /// Minimum wall-clock spacing between passes
    pub fn min_frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps_limit.max(1) as u64)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

/// Logging output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete monitor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub capture: CaptureConfig,
    pub posture: PostureConfig,
    pub aggregator: AggregatorConfig,
    pub reminder: ReminderConfig,
    pub detection: DetectionConfig,
    pub logging: LoggingConfig,
}

impl MonitorConfig {
    /// Load defaults, the optional file, and environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, MonitorError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, MonitorError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: MonitorConfig = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the session cannot run with
    pub fn validate(&self) -> Result<(), MonitorError> {
        self.posture
            .validate()
            .map_err(|e| MonitorError::InvalidConfig(e.to_string()))?;
        self.reminder
            .validate()
            .map_err(|e| MonitorError::InvalidConfig(e.to_string()))?;

        if self.detection.fps_limit == 0 {
            return Err(MonitorError::InvalidConfig("detection.fps_limit must be positive".into()));
        }

        let periods = [
            ("detection.refresh_interval_ms", self.detection.refresh_interval_ms),
            ("aggregator.window_ms", self.aggregator.window_ms),
            ("aggregator.check_interval_ms", self.aggregator.check_interval_ms),
            ("aggregator.sample_period_ms", self.aggregator.sample_period_ms),
        ];
        for (field, value) in periods {
            if value == 0 {
                return Err(MonitorError::InvalidConfig(format!("{} must be positive", field)));
            }
        }

        Ok(())
    }
}
