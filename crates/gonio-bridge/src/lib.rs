//! GONIO Bridge - Message passing with the embedding application
//!
//! The engine talks to its host through JSON envelopes: inbound commands
//! (configuration updates, lifecycle, pause) and outbound notifications
//! (per-frame tracking results, raw landmark passthrough, status). The
//! transport itself belongs to the host; this crate ends at serialized
//! JSON handed to a sink.

pub mod bridge;
pub mod error;
pub mod message;

pub use bridge::*;
pub use error::*;
pub use message::*;
