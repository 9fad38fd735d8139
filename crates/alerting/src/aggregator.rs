//! Posture Aggregator Implementation

use posture::PostureState;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::window::{PostureSample, SampleWindow, WindowTotals};

/// Aggregator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Length of the trailing sample window (ms, default: 30s)
    pub window_ms: u64,
    /// How often the window is evaluated (ms, default: 30s)
    pub check_interval_ms: u64,
    /// Minimum spacing between alerts (ms, default: 10s)
    pub sound_cooldown_ms: u64,
    /// Sampling cadence (ms, default: 1s)
    pub sample_period_ms: u64,
    /// Delay between the alert sound and the notification (ms)
    pub notification_delay_ms: u64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            window_ms: 30_000,
            check_interval_ms: 30_000,
            sound_cooldown_ms: 10_000,
            sample_period_ms: 1_000,
            notification_delay_ms: 300,
        }
    }
}

/// Outcome of one window evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertDecision {
    /// Bad posture dominated the window: alert now
    Fire(WindowTotals),
    /// Bad posture dominated but the last alert was too recent
    CoolingDown(WindowTotals),
    /// Good posture held at least half the window
    PostureOk(WindowTotals),
    /// Nothing sampled in the window
    NoData,
}

impl AlertDecision {
    pub fn should_fire(&self) -> bool {
        matches!(self, AlertDecision::Fire(_))
    }

    pub fn totals(&self) -> WindowTotals {
        match self {
            AlertDecision::Fire(t) | AlertDecision::CoolingDown(t) | AlertDecision::PostureOk(t) => *t,
            AlertDecision::NoData => WindowTotals::default(),
        }
    }
}

/// Majority vote over a trailing window, gated by a cooldown
pub struct PostureAggregator {
    config: AggregatorConfig,
    window: SampleWindow,
    /// Session clock of the last alert
    last_fired_ms: Option<u64>,
    fire_count: usize,
}

impl PostureAggregator {
    /// Create a new aggregator
    pub fn new(config: AggregatorConfig) -> Self {
        info!("Creating posture aggregator with config: {:?}", config);
        Self {
            window: SampleWindow::new(config.window_ms),
            config,
            last_fired_ms: None,
            fire_count: 0,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Latch the current posture state into the window.
    ///
    /// `None` (no subject, or not yet analyzed) adds nothing but still ages
    /// out old samples.
    pub fn record_sample(&mut self, now_ms: u64, state: Option<PostureState>) {
        if let Some(state) = state {
            self.window.push(PostureSample {
                timestamp_ms: now_ms,
                state,
                duration_sec: 1,
            });
        }
        self.window.evict(now_ms);
    }

    /// Evaluate the window and record a fire when one is due
    pub fn evaluate(&mut self, now_ms: u64) -> AlertDecision {
        if self.window.is_empty() {
            debug!("Posture check: no samples in window");
            return AlertDecision::NoData;
        }

        let totals = self.window.totals();
        info!(
            "Last {}s: good posture={}s, bad posture={}s",
            self.config.window_ms / 1000,
            totals.good_secs,
            totals.bad_secs
        );

        if !totals.bad_majority() {
            return AlertDecision::PostureOk(totals);
        }

        if let Some(last) = self.last_fired_ms {
            if now_ms.saturating_sub(last) <= self.config.sound_cooldown_ms {
                debug!("Posture alert suppressed: in cooldown period");
                return AlertDecision::CoolingDown(totals);
            }
        }

        self.last_fired_ms = Some(now_ms);
        self.fire_count += 1;
        info!("Bad posture detected (alert #{})", self.fire_count);
        AlertDecision::Fire(totals)
    }

    /// Current window totals without evaluating
    pub fn totals(&self) -> WindowTotals {
        self.window.totals()
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    pub fn fire_count(&self) -> usize {
        self.fire_count
    }

    /// Drop all samples and cooldown state
    pub fn clear(&mut self) {
        self.window.clear();
        self.last_fired_ms = None;
        self.fire_count = 0;
    }
}

impl Default for PostureAggregator {
    fn default() -> Self {
        Self::new(AggregatorConfig::default())
    }
}
