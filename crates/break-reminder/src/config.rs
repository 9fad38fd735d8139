//! Break reminder configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const MINUTE_MS: u64 = 60_000;

/// Reminder interval validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReminderError {
    #[error("Reminder interval {value_ms}ms is out of range [{min_ms}ms, {max_ms}ms]")]
    OutOfRange {
        value_ms: u64,
        min_ms: u64,
        max_ms: u64,
    },

    #[error("Reminder interval {value_ms}ms is not a multiple of {step_ms}ms")]
    OffStep { value_ms: u64, step_ms: u64 },

    #[error("Snooze duration must be positive")]
    ZeroSnooze,
}

/// Break reminder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Whether reminders start armed
    pub enabled: bool,
    /// Time between reminders (ms, default: 60 minutes)
    pub interval_ms: u64,
    /// Smallest selectable interval (ms)
    pub min_interval_ms: u64,
    /// Largest selectable interval (ms)
    pub max_interval_ms: u64,
    /// Interval granularity (ms)
    pub step_ms: u64,
    /// Snooze duration (ms, default: 5 minutes)
    pub snooze_ms: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 60 * MINUTE_MS,
            min_interval_ms: 5 * MINUTE_MS,
            max_interval_ms: 60 * MINUTE_MS,
            step_ms: 5 * MINUTE_MS,
            snooze_ms: 5 * MINUTE_MS,
        }
    }
}

impl ReminderConfig {
    /// Check a user-selected interval against the stepped range
    pub fn validate_interval(&self, interval_ms: u64) -> Result<(), ReminderError> {
        if interval_ms < self.min_interval_ms || interval_ms > self.max_interval_ms {
            return Err(ReminderError::OutOfRange {
                value_ms: interval_ms,
                min_ms: self.min_interval_ms,
                max_ms: self.max_interval_ms,
            });
        }
        if self.step_ms > 0 && (interval_ms - self.min_interval_ms) % self.step_ms != 0 {
            return Err(ReminderError::OffStep {
                value_ms: interval_ms,
                step_ms: self.step_ms,
            });
        }
        Ok(())
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), ReminderError> {
        if self.snooze_ms == 0 {
            return Err(ReminderError::ZeroSnooze);
        }
        self.validate_interval(self.interval_ms)
    }

    /// Interval for a slider position in minutes
    pub fn interval_from_minutes(&self, minutes: u64) -> Result<Duration, ReminderError> {
        let interval_ms = minutes.saturating_mul(MINUTE_MS);
        self.validate_interval(interval_ms)?;
        Ok(Duration::from_millis(interval_ms))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn snooze(&self) -> Duration {
        Duration::from_millis(self.snooze_ms)
    }
}
