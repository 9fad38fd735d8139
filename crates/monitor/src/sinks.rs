//! Notification and sound sinks for terminal sessions

use std::io::Write;

use alerting::{Notification, NotificationSink, SoundSink};
use tracing::{info, warn};

/// Renders notifications into the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    fn show(&self, notification: Notification) -> bool {
        info!(
            title = %notification.title,
            silent = notification.silent,
            "Notification: {}",
            notification.body
        );
        true
    }
}

impl NotificationSink for LogNotifier {
    fn send_posture(&self) -> bool {
        self.show(Notification::posture())
    }

    fn send_break(&self) -> bool {
        self.show(Notification::break_reminder())
    }

    fn supports_break_interval(&self) -> bool {
        true
    }

    fn send_break_with_interval(&self, interval_minutes: u64) -> bool {
        info!("Custom break reminder ({} min) notification sent", interval_minutes);
        self.show(Notification::break_reminder_with_interval(interval_minutes))
    }
}

/// Rings the terminal bell on stderr
#[derive(Debug, Default)]
pub struct TerminalBell;

impl SoundSink for TerminalBell {
    fn play(&self) {
        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            warn!("Error playing sound: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::BreakNotice;

    #[test]
    fn test_log_notifier_supports_interval() {
        let notifier = LogNotifier;
        assert_eq!(BreakNotice::for_sink(&notifier), BreakNotice::WithInterval);
        assert!(notifier.send_posture());
        assert!(notifier.send_break_with_interval(25));
    }
}
