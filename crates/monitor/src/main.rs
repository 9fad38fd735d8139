//! Posture Monitor - Main Entry Point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use monitor::{init_logging, run, LogNotifier, MonitorConfig, TerminalBell};
use pose_capture::{MockCamera, MockPoseEstimator, PoseEstimator, ReplayPoseEstimator};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "posture-monitor", version, about = "Webcam posture monitor with break reminders")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay recorded keypoints (one JSON array per frame) instead of the mock model
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Frames per mock phase (upright, slouched, away)
    #[arg(long, default_value_t = 200)]
    mock_phase_frames: u32,

    /// Enable the break reminder
    #[arg(long)]
    break_reminder: bool,

    /// Break reminder interval in minutes (5-60, multiples of 5)
    #[arg(long)]
    break_minutes: Option<u64>,

    /// Log level override
    #[arg(long)]
    log_level: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        MonitorConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if cli.break_reminder {
        config.reminder.enabled = true;
    }
    if let Some(minutes) = cli.break_minutes {
        let interval = config
            .reminder
            .interval_from_minutes(minutes)
            .context("Invalid --break-minutes")?;
        config.reminder.interval_ms = interval.as_millis() as u64;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json_logs {
        config.logging.json = true;
    }

    init_logging(&config.logging)?;

    info!("=== Posture Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let camera = MockCamera::new(config.capture.clone());
    let estimator: Box<dyn PoseEstimator> = match cli.replay {
        Some(path) => {
            info!("Replaying keypoints from {}", path.display());
            Box::new(ReplayPoseEstimator::from_path(path))
        }
        None => Box::new(MockPoseEstimator::new(cli.mock_phase_frames)),
    };

    let report = run(
        config,
        Box::new(camera),
        estimator,
        Arc::new(LogNotifier),
        Arc::new(TerminalBell),
    )
    .await?;

    info!(
        "Session summary: {} detection passes, {} errors, {} posture alerts, {} break reminders",
        report.detection_passes,
        report.detection_errors,
        report.posture_alerts,
        report.break_reminders
    );

    Ok(())
}
