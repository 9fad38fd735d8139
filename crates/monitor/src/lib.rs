//! Posture Monitor
//!
//! Wires the pose source, posture analyzer, alert aggregator and break
//! reminder into one session, plus the terminal front end around it.

use std::sync::Arc;

use alerting::{NotificationSink, SoundSink};
use pose_capture::{CaptureError, PoseEstimator, VideoSource};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod commands;
pub mod config;
pub mod detection;
pub mod session;
pub mod sinks;
pub mod status;

pub use commands::{parse_command, CommandError, Input};
pub use crate::config::{DetectionConfig, LoggingConfig, MonitorConfig};
pub use detection::{DetectionLoop, PassOutcome};
pub use session::{Session, SessionCommand, SessionHandle, SessionReport};
pub use sinks::{LogNotifier, TerminalBell};
pub use status::MonitorStatus;

/// Monitor errors
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Camera or model could not be acquired at startup
    #[error("Acquisition failed: {0}")]
    Acquisition(CaptureError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Session task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Install the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<(), MonitorError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| MonitorError::Logging(format!("unknown level '{}'", config.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| MonitorError::Logging(e.to_string()))
}

/// Run a session with the terminal front end until shutdown.
///
/// Commands are read line by line from stdin; Ctrl-C or `quit` stops the
/// session. Status changes are logged as they happen.
pub async fn run(
    config: MonitorConfig,
    video: Box<dyn VideoSource>,
    estimator: Box<dyn PoseEstimator>,
    notifier: Arc<dyn NotificationSink>,
    sound: Arc<dyn SoundSink>,
) -> Result<SessionReport, MonitorError> {
    let reminder_config = config.reminder.clone();
    let (session, handle) = Session::new(config, video, estimator, notifier, sound);
    let session_task = tokio::spawn(session.run());

    let mut status = handle.subscribe();
    tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let current = status.borrow_and_update().clone();
            if current.is_alert() {
                warn!("Status: {}", current);
            } else {
                info!("Status: {}", current);
            }
        }
    });

    // Blocking stdin reads stay off the runtime
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let input = handle.clone();
    tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line, &reminder_config) {
                Ok(Input::Session(command)) => {
                    if !input.send(command).await {
                        break;
                    }
                }
                Ok(Input::ReminderStatus) => match input.reminder_status().await {
                    Some(snapshot) => info!(
                        "Break reminder: {} ({} min)",
                        snapshot.display,
                        snapshot.interval_ms / 60_000
                    ),
                    None => break,
                },
                Err(e) => warn!("{}", e),
            }
        }
    });

    let shutdown = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping");
            shutdown.shutdown().await;
        }
    });

    session_task.await?
}
