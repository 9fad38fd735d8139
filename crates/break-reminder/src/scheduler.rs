//! Break Scheduler Implementation

use std::time::Duration;

use alerting::{BreakNotice, NotificationSink, SoundSink};
use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::ReminderConfig;

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    /// No pending reminder
    Idle,
    /// One reminder pending
    Armed {
        /// Monotonic deadline
        fire_at: Instant,
        /// Wall-clock time shown to the user
        wall_fire_at: DateTime<Local>,
    },
}

/// Point-in-time view of the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderSnapshot {
    pub enabled: bool,
    pub interval_ms: u64,
    /// Time until the pending reminder, if armed
    pub next_fire_in_ms: Option<u64>,
    pub display: String,
}

/// Self-rescheduling one-shot break reminder.
///
/// The scheduler owns no task: the owner awaits [`sleep_until_due`] on
/// [`BreakScheduler::deadline`] and calls [`BreakScheduler::on_fire`] when it
/// elapses. Every (re)arm replaces the pending deadline.
pub struct BreakScheduler {
    config: ReminderConfig,
    enabled: bool,
    interval: Duration,
    state: ReminderState,
    notice: BreakNotice,
    fire_count: usize,
}

impl BreakScheduler {
    /// Create an idle scheduler. `notice` is the richest reminder variant the
    /// notification sink supports.
    pub fn new(config: ReminderConfig, notice: BreakNotice) -> Self {
        info!(
            "Break scheduler created: interval={}min, notice={:?}",
            config.interval_ms / 60_000,
            notice
        );
        Self {
            enabled: false,
            interval: config.interval(),
            state: ReminderState::Idle,
            notice,
            fire_count: 0,
            config,
        }
    }

    /// Turn reminders on with `interval` and arm the first one.
    pub fn enable(&mut self, interval: Duration) {
        self.enabled = true;
        self.interval = interval;
        info!(
            "Break reminder enabled with {} minute interval",
            interval.as_secs() / 60
        );
        self.arm(interval);
    }

    /// Turn reminders off and cancel the pending one.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.cancel();
        info!("Break reminder disabled");
    }

    /// Toggle from the UI switch, using the configured interval
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enable(self.interval);
        } else {
            self.disable();
        }
    }

    /// Change the interval. While enabled the remaining time is discarded and
    /// the reminder re-arms immediately with the new interval.
    pub fn change_interval(&mut self, interval: Duration) {
        self.interval = interval;
        debug!("Break interval changed to {:?}", interval);
        if self.enabled {
            self.arm(interval);
        }
    }

    /// Postpone the reminder by the snooze duration. The configured interval
    /// is unchanged for later cycles.
    pub fn snooze(&mut self) {
        info!(
            "Reminder snoozed for {} minutes",
            self.config.snooze_ms / 60_000
        );
        self.arm(self.config.snooze());
    }

    /// User took the break: restart a full interval.
    pub fn acknowledge(&mut self) {
        info!("Reminder acknowledged, resetting timer");
        self.arm(self.interval);
    }

    /// Notification dismissed without action: the pending timer continues.
    pub fn close(&self) {
        debug!("Reminder closed, continuing timer");
    }

    /// Reminder elapsed: play the sound, send the notification, and re-arm
    /// for another interval. Returns whether the notification was accepted.
    pub fn on_fire(&mut self, notifier: &dyn NotificationSink, sound: &dyn SoundSink) -> bool {
        self.state = ReminderState::Idle;
        if !self.enabled {
            debug!("Break reminder fired while disabled, ignoring");
            return false;
        }

        self.fire_count += 1;
        info!("Sending break reminder (#{})", self.fire_count);

        sound.play();
        let minutes = self.interval.as_secs() / 60;
        let sent = self.notice.send(notifier, minutes);
        if !sent {
            warn!("Break reminder notification was not delivered");
        }

        self.arm(self.interval);
        sent
    }

    /// Pending deadline, if armed
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            ReminderState::Armed { fire_at, .. } => Some(fire_at),
            ReminderState::Idle => None,
        }
    }

    pub fn state(&self) -> ReminderState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, ReminderState::Armed { .. })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn notice(&self) -> BreakNotice {
        self.notice
    }

    pub fn fire_count(&self) -> usize {
        self.fire_count
    }

    /// Status line: "Next at HH:MM" when armed, "Off" when disabled
    pub fn display(&self) -> String {
        match self.state {
            ReminderState::Armed { wall_fire_at, .. } => {
                format!("Next at {}", wall_fire_at.format("%H:%M"))
            }
            ReminderState::Idle if self.enabled => "On".to_string(),
            ReminderState::Idle => "Off".to_string(),
        }
    }

    pub fn snapshot(&self) -> ReminderSnapshot {
        ReminderSnapshot {
            enabled: self.enabled,
            interval_ms: self.interval.as_millis() as u64,
            next_fire_in_ms: self.deadline().map(|d| {
                d.saturating_duration_since(Instant::now()).as_millis() as u64
            }),
            display: self.display(),
        }
    }

    fn arm(&mut self, after: Duration) {
        self.cancel();
        if !self.enabled {
            return;
        }

        let wall_fire_at = Local::now()
            + chrono::Duration::from_std(after).unwrap_or_else(|_| chrono::Duration::zero());
        self.state = ReminderState::Armed {
            fire_at: Instant::now() + after,
            wall_fire_at,
        };
        info!(
            "Setting break reminder for {} minutes from now ({})",
            after.as_secs() / 60,
            self.display()
        );
    }

    fn cancel(&mut self) {
        self.state = ReminderState::Idle;
    }
}

/// Resolve at `deadline`, or never when there is none
pub async fn sleep_until_due(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
