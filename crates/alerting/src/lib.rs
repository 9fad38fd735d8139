//! Alerting System
//!
//! Smooths per-frame posture verdicts over a trailing time window and
//! decides when a bad-posture alert is due, with a minimum refire spacing.
//! Also declares the notification and sound sinks alerts are delivered to.

mod aggregator;
pub mod messages;
mod notifier;
mod window;

pub use aggregator::{AggregatorConfig, AlertDecision, PostureAggregator};
pub use notifier::{BreakNotice, Notification, NotificationSink, SoundSink};
pub use window::{PostureSample, SampleWindow, WindowTotals};
