//! Break Reminder Scheduler
//!
//! One-shot timer that re-arms itself after every fire, with snooze,
//! acknowledge and live interval changes.

mod config;
mod scheduler;

pub use config::{ReminderConfig, ReminderError};
pub use scheduler::{sleep_until_due, BreakScheduler, ReminderSnapshot, ReminderState};
