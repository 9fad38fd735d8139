//! Posture monitoring session
//!
//! A single task owns every piece of mutable state (latched posture, sample
//! window, reminder timer) and multiplexes the periodic activities with
//! `select!`, so each handler runs to completion before the next starts and
//! a detection pass is never re-entered.

use std::sync::Arc;
use std::time::Duration;

use alerting::{BreakNotice, NotificationSink, PostureAggregator, SoundSink};
use break_reminder::{sleep_until_due, BreakScheduler, ReminderSnapshot};
use pose_capture::{PoseEstimator, VideoSource};
use posture::PostureAnalyzer;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::config::MonitorConfig;
use crate::detection::{DetectionLoop, PassOutcome};
use crate::status::MonitorStatus;
use crate::MonitorError;

/// User events and control requests
#[derive(Debug)]
pub enum SessionCommand {
    /// Break reminder switch
    SetReminder(bool),
    /// Break reminder slider; re-arms immediately when enabled
    ChangeInterval(Duration),
    SnoozeReminder,
    AcknowledgeReminder,
    CloseReminder,
    /// Current reminder state
    ReminderStatus(oneshot::Sender<ReminderSnapshot>),
    Shutdown,
}

/// Counters reported when the session ends
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub detection_passes: u64,
    pub detection_errors: u64,
    pub posture_alerts: usize,
    pub break_reminders: usize,
}

/// External control surface of a running session
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    status: watch::Receiver<MonitorStatus>,
}

impl SessionHandle {
    /// Send a command; `false` if the session has ended
    pub async fn send(&self, command: SessionCommand) -> bool {
        self.commands.send(command).await.is_ok()
    }

    pub async fn shutdown(&self) -> bool {
        self.send(SessionCommand::Shutdown).await
    }

    /// Ask the session for the reminder state
    pub async fn reminder_status(&self) -> Option<ReminderSnapshot> {
        let (tx, rx) = oneshot::channel();
        if !self.send(SessionCommand::ReminderStatus(tx)).await {
            return None;
        }
        rx.await.ok()
    }

    pub fn status(&self) -> MonitorStatus {
        self.status.borrow().clone()
    }

    /// Receiver that observes every status change
    pub fn subscribe(&self) -> watch::Receiver<MonitorStatus> {
        self.status.clone()
    }
}

/// One monitoring session, from camera acquisition to shutdown
pub struct Session {
    config: MonitorConfig,
    video: Box<dyn VideoSource>,
    estimator: Box<dyn PoseEstimator>,
    detection: DetectionLoop,
    aggregator: PostureAggregator,
    scheduler: BreakScheduler,
    notifier: Arc<dyn NotificationSink>,
    sound: Arc<dyn SoundSink>,
    status: watch::Sender<MonitorStatus>,
    commands: mpsc::Receiver<SessionCommand>,
    epoch: Instant,
    /// Posture notification waiting for the alert sound to start
    pending_posture_notice: Option<Instant>,
}

impl Session {
    /// Build a session and its handle
    pub fn new(
        config: MonitorConfig,
        video: Box<dyn VideoSource>,
        estimator: Box<dyn PoseEstimator>,
        notifier: Arc<dyn NotificationSink>,
        sound: Arc<dyn SoundSink>,
    ) -> (Self, SessionHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (status_tx, status_rx) = watch::channel(MonitorStatus::Starting);

        let analyzer = PostureAnalyzer::new(config.posture.clone());
        let notice = BreakNotice::for_sink(notifier.as_ref());

        let session = Self {
            detection: DetectionLoop::new(&config.detection, analyzer),
            aggregator: PostureAggregator::new(config.aggregator.clone()),
            scheduler: BreakScheduler::new(config.reminder.clone(), notice),
            config,
            video,
            estimator,
            notifier,
            sound,
            status: status_tx,
            commands: command_rx,
            epoch: Instant::now(),
            pending_posture_notice: None,
        };

        let handle = SessionHandle {
            commands: command_tx,
            status: status_rx,
        };

        (session, handle)
    }

    /// Acquire the camera and model, then run until shutdown.
    ///
    /// Acquisition failures end the session with an error; everything after
    /// that is recovered locally.
    pub async fn run(mut self) -> Result<SessionReport, MonitorError> {
        if let Err(e) = self.acquire().await {
            error!("Error initializing: {}", e);
            self.publish(MonitorStatus::Failed(e.to_string()));
            return Err(e);
        }

        if self.config.reminder.enabled {
            self.scheduler.enable(self.config.reminder.interval());
        }

        self.epoch = Instant::now();
        let agg = self.config.aggregator.clone();
        let sample_period = Duration::from_millis(agg.sample_period_ms);
        let check_period = Duration::from_millis(agg.check_interval_ms);

        let mut frame_tick = interval(self.config.detection.refresh_interval());
        frame_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut sample_tick = interval_at(self.epoch + sample_period, sample_period);
        let mut check_tick = interval_at(self.epoch + check_period, check_period);

        info!("Posture session running");

        loop {
            let reminder_due = self.scheduler.deadline();
            let notice_due = self.pending_posture_notice;

            // Polled in declaration order: a sample due together with a
            // check is recorded before the check evaluates the window.
            tokio::select! {
                biased;

                _ = frame_tick.tick() => {
                    self.on_frame().await;
                }
                _ = sample_tick.tick() => {
                    let state = self.detection.last_state();
                    self.aggregator.record_sample(self.now_ms(), state);
                }
                _ = check_tick.tick() => {
                    self.check_posture();
                }
                _ = sleep_until_due(notice_due) => {
                    self.pending_posture_notice = None;
                    debug!("Sending posture notification");
                    if !self.notifier.send_posture() {
                        warn!("Posture notification was not delivered");
                    }
                }
                _ = sleep_until_due(reminder_due) => {
                    metrics::counter!("posture_break_reminders_total").increment(1);
                    self.scheduler.on_fire(self.notifier.as_ref(), self.sound.as_ref());
                }
                command = self.commands.recv() => {
                    match command {
                        Some(SessionCommand::Shutdown) | None => break,
                        Some(command) => self.on_command(command),
                    }
                }
            }
        }

        self.publish(MonitorStatus::Stopped);
        let report = SessionReport {
            detection_passes: self.detection.passes(),
            detection_errors: self.detection.failures(),
            posture_alerts: self.aggregator.fire_count(),
            break_reminders: self.scheduler.fire_count(),
        };
        info!("Posture session stopped: {:?}", report);
        Ok(report)
    }

    async fn acquire(&mut self) -> Result<(), MonitorError> {
        self.publish(MonitorStatus::Starting);
        self.video
            .open()
            .await
            .map_err(MonitorError::Acquisition)?;

        self.publish(MonitorStatus::LoadingModel);
        self.estimator
            .load()
            .await
            .map_err(MonitorError::Acquisition)?;

        info!(
            "Video source '{}' and pose model '{}' ready",
            self.video.name(),
            self.estimator.name()
        );
        self.publish(MonitorStatus::Detecting);
        Ok(())
    }

    async fn on_frame(&mut self) {
        let outcome = self
            .detection
            .tick(Instant::now(), self.video.as_mut(), self.estimator.as_mut())
            .await;

        match outcome {
            PassOutcome::Analyzed(verdict) if verdict.is_good_posture => {
                self.publish(MonitorStatus::GoodPosture);
            }
            PassOutcome::Analyzed(verdict) => {
                self.publish(MonitorStatus::FixPosture {
                    issues: verdict.issues,
                });
            }
            PassOutcome::NoPose => self.publish(MonitorStatus::NoPoseDetected),
            PassOutcome::Failed(reason) => self.publish(MonitorStatus::DetectionError(reason)),
            PassOutcome::Skipped | PassOutcome::NoFrame => {}
        }
    }

    fn check_posture(&mut self) {
        let now_ms = self.now_ms();
        if !self.aggregator.evaluate(now_ms).should_fire() {
            return;
        }

        metrics::counter!("posture_alerts_total").increment(1);
        info!("Bad posture detected - playing sound and sending notification");
        self.sound.play();
        let delay = Duration::from_millis(self.config.aggregator.notification_delay_ms);
        self.pending_posture_notice = Some(Instant::now() + delay);
    }

    fn on_command(&mut self, command: SessionCommand) {
        debug!("Session command: {:?}", command);
        match command {
            SessionCommand::SetReminder(enabled) => self.scheduler.set_enabled(enabled),
            SessionCommand::ChangeInterval(interval) => self.scheduler.change_interval(interval),
            SessionCommand::SnoozeReminder => self.scheduler.snooze(),
            SessionCommand::AcknowledgeReminder => self.scheduler.acknowledge(),
            SessionCommand::CloseReminder => self.scheduler.close(),
            SessionCommand::ReminderStatus(reply) => {
                let _ = reply.send(self.scheduler.snapshot());
            }
            SessionCommand::Shutdown => {}
        }
    }

    fn publish(&self, status: MonitorStatus) {
        self.status.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}
