//! Estimator boundary - readiness polling for the external pose library
//!
//! Pose estimation is delegated entirely to an external collaborator.
//! The engine only needs to know when it is ready and how to start and
//! stop the camera feed behind it.

use std::time::Duration;

use tracing::debug;

use gonio_core::{TrackError, TrackResult};

/// Bounded readiness polling: attempts before giving up.
pub const READY_POLL_ATTEMPTS: u32 = 20;

/// Interval between readiness polls.
pub const READY_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// The external pose estimation library behind the camera feed.
pub trait PoseEstimator: Send {
    /// The estimator has loaded its model and can accept frames.
    fn is_ready(&self) -> bool;

    /// Start the camera feed driving the estimator.
    fn start(&mut self) -> TrackResult<()>;

    /// Stop the camera feed.
    fn stop(&mut self);
}

/// Poll the estimator until it reports ready, up to `attempts` polls
/// spaced `interval` apart. Exhaustion is an error; there is no retry
/// beyond this bounded loop.
pub async fn await_ready(
    estimator: &dyn PoseEstimator,
    attempts: u32,
    interval: Duration,
) -> TrackResult<()> {
    for attempt in 1..=attempts {
        if estimator.is_ready() {
            return Ok(());
        }
        debug!(attempt, max = attempts, "waiting for pose estimator");
        tokio::time::sleep(interval).await;
    }

    Err(TrackError::EstimatorNotReady { attempts })
}
