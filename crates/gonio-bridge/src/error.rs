//! Bridge error types

use thiserror::Error;

/// Errors at the host message boundary.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("invalid host message: {0}")]
    InvalidMessage(#[from] serde_json::Error),

    #[error("host channel closed")]
    ChannelClosed,
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
