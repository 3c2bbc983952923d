//! GONIO Runtime - Tracking session orchestration
//!
//! The runtime ties the engine together:
//! 1. Wait for the external pose estimator (bounded polling)
//! 2. Consume frames, latest-wins, at the estimator's cadence
//! 3. Capture an immutable configuration snapshot per frame
//! 4. Evaluate the frame's focus points
//! 5. Post the result and the raw landmark passthrough to the host
//!
//! Configuration updates arrive asynchronously from the host bridge and
//! publish a whole new snapshot; the next frame observes it atomically.

pub mod estimator;
pub mod frame;
pub mod session;

pub use estimator::*;
pub use frame::*;
pub use session::*;
