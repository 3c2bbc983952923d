//! GONIO Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the GONIO engine:
//! - Landmarks and the fixed pose joint index space
//! - Three-point angle geometry
//! - Focus-point rules and comparison operators
//! - Tracking configuration and its update overlay
//! - Error types

pub mod angle;
pub mod config;
pub mod error;
pub mod joint;
pub mod landmark;
pub mod rule;

pub use angle::*;
pub use config::*;
pub use error::*;
pub use joint::*;
pub use landmark::*;
pub use rule::*;
