//! Bridge delivery - handing notifications to the host transport

use tokio::sync::mpsc;
use tracing::warn;

use crate::{encode_notification, BridgeError, BridgeResult, HostNotification};

/// Delivery seam between the engine and the host transport.
///
/// Delivery is fire-and-forget: the frame loop never blocks on the host,
/// and a failed post is logged, not surfaced. Per frame the engine posts
/// at most one tracking result followed by one landmark passthrough;
/// posts are never batched or throttled.
pub trait HostBridge: Send + Sync {
    fn post(&self, notification: HostNotification);
}

/// Channel-backed bridge: serializes each notification to a JSON line
/// and queues it for whatever transport the host wired up.
pub struct ChannelBridge {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelBridge {
    /// Create a bridge and the receiving end for the host transport.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelBridge { tx }, rx)
    }

    /// Post with an observable outcome, for callers that need to know
    /// whether the host is still attached.
    pub fn try_post(&self, notification: HostNotification) -> BridgeResult<()> {
        let json = encode_notification(&notification)?;
        self.tx.send(json).map_err(|_| BridgeError::ChannelClosed)
    }
}

impl HostBridge for ChannelBridge {
    fn post(&self, notification: HostNotification) {
        match self.try_post(notification) {
            Ok(()) => {}
            Err(BridgeError::ChannelClosed) => {
                warn!("host side of the bridge is gone, dropping notification");
            }
            Err(err) => {
                warn!(%err, "failed to encode host notification");
            }
        }
    }
}
