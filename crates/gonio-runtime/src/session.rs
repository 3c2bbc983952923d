//! Tracking session - the external-facing orchestrator
//!
//! The session owns the configuration snapshot, the pause flag, and the
//! host bridge. Frame processing is strictly serialized: one callback per
//! analyzed frame, no two evaluations concurrent. Configuration updates
//! publish a new snapshot; the frame loop clones the current snapshot
//! once at entry, so an update is visible to the next frame, atomically,
//! never partially to the one in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use gonio_bridge::{HostBridge, HostCommand, HostNotification};
use gonio_core::{FocusPoint, LandmarkFrame, TrackError, TrackResult, TrackingConfig};
use gonio_eval::evaluate_frame;

use crate::{await_ready, FrameReceiver, PoseEstimator, READY_POLL_ATTEMPTS, READY_POLL_INTERVAL};

/// Immutable configuration snapshot: what one frame evaluation sees.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub config: TrackingConfig,
    pub focus_points: Vec<FocusPoint>,
}

/// Runtime counters for a tracking session.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    pub frames_evaluated: u64,
    pub frames_paused: u64,
    pub frames_dropped: u64,
    pub results_posted: u64,
    pub config_updates: u64,
    pub config_rejected: u64,
    pub last_eval_duration: Duration,
}

/// A tracking session over one camera feed.
pub struct TrackingSession<B: HostBridge> {
    bridge: B,
    snapshot: RwLock<Arc<SessionSnapshot>>,
    paused: AtomicBool,
    running: AtomicBool,
    stats: Mutex<SessionStats>,
}

impl<B: HostBridge> TrackingSession<B> {
    /// Create a session with explicit startup configuration.
    pub fn new(
        config: TrackingConfig,
        focus_points: Vec<FocusPoint>,
        bridge: B,
    ) -> TrackResult<Self> {
        config.validate()?;
        Ok(TrackingSession {
            bridge,
            snapshot: RwLock::new(Arc::new(SessionSnapshot {
                config,
                focus_points,
            })),
            paused: AtomicBool::new(false),
            running: AtomicBool::new(true),
            stats: Mutex::new(SessionStats::default()),
        })
    }

    /// Create a session with default configuration and no custom rules
    /// (the built-in elbow pair applies).
    pub fn with_defaults(bridge: B) -> Self {
        TrackingSession {
            bridge,
            snapshot: RwLock::new(Arc::new(SessionSnapshot::default())),
            paused: AtomicBool::new(false),
            running: AtomicBool::new(true),
            stats: Mutex::new(SessionStats::default()),
        }
    }

    /// The host bridge this session posts to.
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Current configuration snapshot.
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.snapshot.read().clone()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Copy of the runtime counters.
    pub fn stats(&self) -> SessionStats {
        self.stats.lock().clone()
    }

    /// Apply an inbound host command.
    ///
    /// A configuration update that fails validation is rejected with a
    /// warning; the previous snapshot stays in effect.
    pub fn apply_command(&self, command: HostCommand) -> TrackResult<()> {
        match command {
            HostCommand::SetTracking { data } => {
                let current = self.snapshot();
                let config = current.config.merged(&data);
                if let Err(err) = config.validate() {
                    warn!(%err, "rejecting tracking configuration update");
                    self.stats.lock().config_rejected += 1;
                    return Err(err);
                }

                let focus_points = data
                    .focus_points
                    .unwrap_or_else(|| current.focus_points.clone());

                *self.snapshot.write() = Arc::new(SessionSnapshot {
                    config,
                    focus_points,
                });
                self.stats.lock().config_updates += 1;
                debug!("tracking configuration updated");
                Ok(())
            }
            HostCommand::PauseTracking { pause } => {
                self.paused.store(pause, Ordering::Relaxed);
                debug!(pause, "tracking pause toggled");
                Ok(())
            }
            HostCommand::StartCamera => {
                self.running.store(true, Ordering::Relaxed);
                Ok(())
            }
            HostCommand::StopCamera => {
                self.running.store(false, Ordering::Relaxed);
                Ok(())
            }
        }
    }

    /// Process one frame from the estimator.
    ///
    /// Evaluates against the snapshot captured at entry and posts two
    /// notifications: the selected result, then the raw landmark
    /// passthrough. At most once per frame, never batched.
    pub fn process_frame(&self, frame: LandmarkFrame) {
        if !self.running.load(Ordering::Relaxed) {
            self.stats.lock().frames_dropped += 1;
            return;
        }
        if self.paused.load(Ordering::Relaxed) {
            self.stats.lock().frames_paused += 1;
            return;
        }

        let snapshot = self.snapshot();
        let started = Instant::now();
        let report = evaluate_frame(&frame, &snapshot.focus_points, &snapshot.config);
        let elapsed = started.elapsed();

        self.bridge
            .post(HostNotification::TrackingResult { data: report });
        self.bridge.post(HostNotification::PoseData { data: frame });

        let mut stats = self.stats.lock();
        stats.frames_evaluated += 1;
        stats.results_posted += 2;
        stats.last_eval_duration = elapsed;
    }

    /// Wait for the estimator, start the camera feed, and announce
    /// readiness to the host. Failures are reported once over the bridge
    /// and returned; there is no automatic retry beyond the bounded
    /// readiness polling.
    pub async fn start(&self, estimator: &mut dyn PoseEstimator) -> TrackResult<()> {
        let ready = await_ready(estimator, READY_POLL_ATTEMPTS, READY_POLL_INTERVAL).await;
        match ready.and_then(|()| estimator.start()) {
            Ok(()) => {
                self.running.store(true, Ordering::Relaxed);
                self.bridge.post(HostNotification::Loaded);
                Ok(())
            }
            Err(err) => {
                self.bridge.post(HostNotification::CameraError {
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Stop the camera feed and stop processing frames.
    pub fn stop(&self, estimator: &mut dyn PoseEstimator) {
        estimator.stop();
        self.running.store(false, Ordering::Relaxed);
    }

    /// Consume frames until the estimator side closes the channel.
    /// A closed channel is normal shutdown, not an error.
    pub async fn run(&self, frames: &mut FrameReceiver) -> TrackResult<()> {
        loop {
            match frames.next().await {
                Ok(frame) => self.process_frame(frame),
                Err(TrackError::FrameSourceClosed) => return Ok(()),
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_channel;
    use gonio_core::{Comparison, Landmark, TrackingUpdate};

    /// Bridge that records every posted notification.
    #[derive(Default)]
    struct RecordingBridge {
        posts: Mutex<Vec<HostNotification>>,
    }

    impl RecordingBridge {
        fn posts(&self) -> Vec<HostNotification> {
            self.posts.lock().clone()
        }
    }

    impl HostBridge for RecordingBridge {
        fn post(&self, notification: HostNotification) {
            self.posts.lock().push(notification);
        }
    }

    struct StubEstimator {
        ready: bool,
        started: bool,
    }

    impl PoseEstimator for StubEstimator {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn start(&mut self) -> TrackResult<()> {
            self.started = true;
            Ok(())
        }

        fn stop(&mut self) {
            self.started = false;
        }
    }

    /// Frame whose left elbow reads 180 degrees.
    fn extended_left_arm() -> LandmarkFrame {
        let mut frame = LandmarkFrame::new();
        frame.set(11, Landmark::new(0.2, 0.2));
        frame.set(13, Landmark::new(0.2, 0.4));
        frame.set(15, Landmark::new(0.2, 0.6));
        frame
    }

    #[test]
    fn test_frame_emits_result_then_passthrough() {
        let session = TrackingSession::with_defaults(RecordingBridge::default());
        let frame = extended_left_arm();

        session.process_frame(frame.clone());

        let posts = session.bridge().posts();
        assert_eq!(posts.len(), 2);
        let HostNotification::TrackingResult { data } = &posts[0] else {
            panic!("first notification must be the tracking result");
        };
        assert!(data.conditions_met); // 180 > 150
        assert_eq!(
            posts[1],
            HostNotification::PoseData { data: frame },
            "passthrough must be the unmodified landmark sequence"
        );

        let stats = session.stats();
        assert_eq!(stats.frames_evaluated, 1);
        assert_eq!(stats.results_posted, 2);
    }

    #[test]
    fn test_pause_suppresses_processing() {
        let session = TrackingSession::with_defaults(RecordingBridge::default());

        session
            .apply_command(HostCommand::PauseTracking { pause: true })
            .unwrap();
        session.process_frame(extended_left_arm());
        assert!(session.bridge().posts().is_empty());
        assert_eq!(session.stats().frames_paused, 1);

        session
            .apply_command(HostCommand::PauseTracking { pause: false })
            .unwrap();
        session.process_frame(extended_left_arm());
        assert_eq!(session.bridge().posts().len(), 2);
    }

    #[test]
    fn test_stop_camera_drops_frames() {
        let session = TrackingSession::with_defaults(RecordingBridge::default());

        session.apply_command(HostCommand::StopCamera).unwrap();
        session.process_frame(extended_left_arm());
        assert!(session.bridge().posts().is_empty());
        assert_eq!(session.stats().frames_dropped, 1);

        session.apply_command(HostCommand::StartCamera).unwrap();
        session.process_frame(extended_left_arm());
        assert_eq!(session.stats().frames_evaluated, 1);
    }

    #[test]
    fn test_config_update_applies_to_next_frame() {
        let session = TrackingSession::with_defaults(RecordingBridge::default());

        session.process_frame(extended_left_arm());

        // Flip the operator and lower the threshold so the same pose
        // stops satisfying the condition.
        session
            .apply_command(HostCommand::SetTracking {
                data: TrackingUpdate {
                    angle_true: Some(90.0),
                    cond_true: Some(Comparison::LessThan),
                    ..TrackingUpdate::default()
                },
            })
            .unwrap();

        session.process_frame(extended_left_arm());

        let posts = session.bridge().posts();
        let HostNotification::TrackingResult { data: before } = &posts[0] else {
            panic!("expected tracking result");
        };
        let HostNotification::TrackingResult { data: after } = &posts[2] else {
            panic!("expected tracking result");
        };
        assert!(before.conditions_met); // 180 > 150
        assert!(!after.conditions_met); // 180 is not < 90
        assert_eq!(after.threshold, 90.0);
        assert_eq!(session.stats().config_updates, 1);
    }

    #[test]
    fn test_invalid_update_rejected_keeps_previous() {
        let session = TrackingSession::with_defaults(RecordingBridge::default());

        let result = session.apply_command(HostCommand::SetTracking {
            data: TrackingUpdate {
                angle_true: Some(720.0),
                ..TrackingUpdate::default()
            },
        });
        assert!(matches!(result, Err(TrackError::ThresholdOutOfRange(_))));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.config.angle_true, 150.0);
        assert_eq!(session.stats().config_rejected, 1);
        assert_eq!(session.stats().config_updates, 0);
    }

    #[test]
    fn test_focus_points_replaced_wholesale() {
        let session = TrackingSession::new(
            TrackingConfig::default(),
            vec![FocusPoint::named(11, 13, 15, "left-elbow")],
            RecordingBridge::default(),
        )
        .unwrap();

        session
            .apply_command(HostCommand::SetTracking {
                data: TrackingUpdate {
                    focus_points: Some(vec![
                        FocusPoint::named(23, 25, 27, "left-knee"),
                        FocusPoint::named(24, 26, 28, "right-knee"),
                    ]),
                    ..TrackingUpdate::default()
                },
            })
            .unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.focus_points.len(), 2);
        assert_eq!(snapshot.focus_points[0].label(), "left-knee");
    }

    #[tokio::test]
    async fn test_run_consumes_until_source_closes() {
        let session = TrackingSession::with_defaults(RecordingBridge::default());
        let (tx, mut rx) = frame_channel();

        tx.publish(extended_left_arm());
        drop(tx);

        session.run(&mut rx).await.unwrap();
        assert_eq!(session.bridge().posts().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_posts_loaded_handshake() {
        let session = TrackingSession::with_defaults(RecordingBridge::default());
        let mut estimator = StubEstimator {
            ready: true,
            started: false,
        };

        session.start(&mut estimator).await.unwrap();
        assert!(estimator.started);
        assert_eq!(session.bridge().posts(), vec![HostNotification::Loaded]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_failure_reported_over_bridge() {
        let session = TrackingSession::with_defaults(RecordingBridge::default());
        let mut estimator = StubEstimator {
            ready: false,
            started: false,
        };

        let err = session.start(&mut estimator).await.unwrap_err();
        assert!(matches!(err, TrackError::EstimatorNotReady { .. }));
        assert!(!estimator.started);

        let posts = session.bridge().posts();
        assert_eq!(posts.len(), 1);
        assert!(matches!(posts[0], HostNotification::CameraError { .. }));
    }
}
