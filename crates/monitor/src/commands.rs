//! Terminal command parsing
//!
//! One command per line:
//!
//! | line            | effect                               |
//! |-----------------|--------------------------------------|
//! | `on` / `off`    | break reminder switch                |
//! | `interval <m>`  | reminder interval in minutes         |
//! | `snooze`        | snooze the pending break             |
//! | `ack`           | acknowledge the break                |
//! | `close`         | dismiss the break notification       |
//! | `status`        | print the reminder state             |
//! | `quit`          | stop the session                     |

use break_reminder::{ReminderConfig, ReminderError};
use thiserror::Error;

use crate::session::SessionCommand;

/// Command parse errors
#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try on, off, interval <min>, snooze, ack, close, status, quit)")]
    Unknown(String),

    #[error("Missing minutes for 'interval'")]
    MissingMinutes,

    #[error("Invalid minutes '{0}'")]
    InvalidMinutes(String),

    #[error(transparent)]
    Interval(#[from] ReminderError),
}

/// Parsed terminal input
#[derive(Debug)]
pub enum Input {
    Session(SessionCommand),
    ReminderStatus,
}

/// Parse one input line
pub fn parse_command(line: &str, reminder: &ReminderConfig) -> Result<Input, CommandError> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_ascii_lowercase();

    let command = match verb.as_str() {
        "on" => SessionCommand::SetReminder(true),
        "off" => SessionCommand::SetReminder(false),
        "snooze" => SessionCommand::SnoozeReminder,
        "ack" | "acknowledge" => SessionCommand::AcknowledgeReminder,
        "close" => SessionCommand::CloseReminder,
        "quit" | "exit" => SessionCommand::Shutdown,
        "status" => return Ok(Input::ReminderStatus),
        "interval" => {
            let raw = parts.next().ok_or(CommandError::MissingMinutes)?;
            let minutes: u64 = raw
                .parse()
                .map_err(|_| CommandError::InvalidMinutes(raw.to_string()))?;
            SessionCommand::ChangeInterval(reminder.interval_from_minutes(minutes)?)
        }
        _ => return Err(CommandError::Unknown(line.trim().to_string())),
    };

    Ok(Input::Session(command))
}
