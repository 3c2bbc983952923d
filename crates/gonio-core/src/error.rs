//! Error types for the GONIO engine

use thiserror::Error;

/// Engine errors.
///
/// Absent landmarks and malformed rules are not errors anywhere in the
/// engine; they are silently skipped by the evaluator. These variants
/// cover the configuration and session boundaries.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("threshold out of range: {0} (expected finite degrees in [0, 360])")]
    ThresholdOutOfRange(f64),

    #[error("pose estimator not ready after {attempts} attempts")]
    EstimatorNotReady { attempts: u32 },

    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("tracking session is not running")]
    SessionNotRunning,

    #[error("frame source closed")]
    FrameSourceClosed,
}

/// Result type for engine operations.
pub type TrackResult<T> = Result<T, TrackError>;
