//! Notification and sound sinks

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::messages;

/// Desktop notification payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Whether the host should suppress its own notification sound
    pub silent: bool,
}

impl Notification {
    /// Posture alert with a random body. Silent: the alert sound already played.
    pub fn posture() -> Self {
        Self {
            title: messages::POSTURE_TITLE.to_string(),
            body: pick(&messages::POSTURE_MESSAGES),
            silent: true,
        }
    }

    /// Break reminder with a random body
    pub fn break_reminder() -> Self {
        Self {
            title: messages::BREAK_TITLE.to_string(),
            body: pick(&messages::BREAK_MESSAGES),
            silent: true,
        }
    }

    /// Break reminder naming the configured interval
    pub fn break_reminder_with_interval(interval_minutes: u64) -> Self {
        Self {
            title: messages::break_title_with_interval(interval_minutes),
            body: pick(&messages::BREAK_MESSAGES),
            silent: false,
        }
    }
}

fn pick(options: &[&str]) -> String {
    options
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
        .to_string()
}

/// Host notification channel.
///
/// All operations are best-effort: they report success and never fail
/// across this boundary.
pub trait NotificationSink: Send + Sync {
    /// Posture alert
    fn send_posture(&self) -> bool;

    /// Break reminder without interval information
    fn send_break(&self) -> bool;

    /// Whether `send_break_with_interval` is supported
    fn supports_break_interval(&self) -> bool {
        false
    }

    /// Break reminder naming the configured interval
    fn send_break_with_interval(&self, _interval_minutes: u64) -> bool {
        self.send_break()
    }
}

/// Alert sound. Fire-and-forget; failures are logged by the implementation.
pub trait SoundSink: Send + Sync {
    fn play(&self);
}

/// Which break reminder variant a sink gets, fixed when the scheduler is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakNotice {
    WithInterval,
    Plain,
}

impl BreakNotice {
    /// Richest variant the sink supports
    pub fn for_sink(sink: &dyn NotificationSink) -> Self {
        if sink.supports_break_interval() {
            BreakNotice::WithInterval
        } else {
            BreakNotice::Plain
        }
    }

    /// Send the reminder through `sink`
    pub fn send(&self, sink: &dyn NotificationSink, interval_minutes: u64) -> bool {
        match self {
            BreakNotice::WithInterval => sink.send_break_with_interval(interval_minutes),
            BreakNotice::Plain => sink.send_break(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        rich: bool,
        sent: Mutex<Vec<String>>,
    }

    impl NotificationSink for Recorder {
        fn send_posture(&self) -> bool {
            self.sent.lock().unwrap().push("posture".into());
            true
        }

        fn send_break(&self) -> bool {
            self.sent.lock().unwrap().push("break".into());
            true
        }

        fn supports_break_interval(&self) -> bool {
            self.rich
        }

        fn send_break_with_interval(&self, interval_minutes: u64) -> bool {
            self.sent.lock().unwrap().push(format!("break:{}", interval_minutes));
            true
        }
    }

    #[test]
    fn test_break_notice_prefers_interval_variant() {
        let sink = Recorder {
            rich: true,
            ..Default::default()
        };
        let notice = BreakNotice::for_sink(&sink);
        assert_eq!(notice, BreakNotice::WithInterval);
        assert!(notice.send(&sink, 45));
        assert_eq!(*sink.sent.lock().unwrap(), vec!["break:45".to_string()]);
    }

    #[test]
    fn test_break_notice_falls_back_to_plain() {
        let sink = Recorder::default();
        let notice = BreakNotice::for_sink(&sink);
        assert_eq!(notice, BreakNotice::Plain);
        notice.send(&sink, 45);
        assert_eq!(*sink.sent.lock().unwrap(), vec!["break".to_string()]);
    }

    #[test]
    fn test_notification_bodies_come_from_catalogue() {
        let posture = Notification::posture();
        assert!(posture.silent);
        assert!(messages::POSTURE_MESSAGES.contains(&posture.body.as_str()));

        let reminder = Notification::break_reminder_with_interval(30);
        assert_eq!(reminder.title, "Posture Monitor - 30min Break");
        assert!(!reminder.silent);
        assert!(messages::BREAK_MESSAGES.contains(&reminder.body.as_str()));
    }

    #[test]
    fn test_catalogues_have_ten_distinct_messages() {
        for catalogue in [&messages::POSTURE_MESSAGES, &messages::BREAK_MESSAGES] {
            let unique: std::collections::HashSet<_> = catalogue.iter().collect();
            assert_eq!(unique.len(), 10);
        }
        assert_eq!(
            messages::POSTURE_MESSAGES[0],
            "Quack! Straighten up! Slouching isn't stylish!"
        );
    }
}
