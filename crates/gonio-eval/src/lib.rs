//! GONIO Evaluator - Angle conditions over landmark frames
//!
//! The evaluator is a pure per-call function over an immutable
//! configuration snapshot: given one frame of landmarks and the current
//! rule list, it produces exactly one reportable result. It has no
//! failure mode that aborts a frame.

pub mod evaluator;
pub mod result;

pub use evaluator::*;
pub use result::*;
