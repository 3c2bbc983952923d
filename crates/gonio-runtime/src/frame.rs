//! Frame channel - latest-frame-wins delivery from the estimator
//!
//! One producer (the external pose estimator's per-frame callback), one
//! consumer (the session loop), capacity 1. Frame processing must keep
//! pace with camera cadence, so an unconsumed frame is overwritten, not
//! queued.

use tokio::sync::watch;

use gonio_core::{LandmarkFrame, TrackError, TrackResult};

/// Create a frame channel pair.
pub fn frame_channel() -> (FrameSender, FrameReceiver) {
    let (tx, rx) = watch::channel(None);
    (FrameSender { tx }, FrameReceiver { rx })
}

/// Producer half, held by the estimator callback.
pub struct FrameSender {
    tx: watch::Sender<Option<LandmarkFrame>>,
}

impl FrameSender {
    /// Publish a frame, replacing any unconsumed one.
    pub fn publish(&self, frame: LandmarkFrame) {
        // A closed receiver means the session is gone; the estimator
        // keeps its own cadence either way.
        let _ = self.tx.send(Some(frame));
    }
}

/// Consumer half, held by the session loop.
pub struct FrameReceiver {
    rx: watch::Receiver<Option<LandmarkFrame>>,
}

impl FrameReceiver {
    /// Wait for the next frame. Intermediate frames published while the
    /// consumer was busy are dropped; only the latest is returned.
    pub async fn next(&mut self) -> TrackResult<LandmarkFrame> {
        loop {
            self.rx
                .changed()
                .await
                .map_err(|_| TrackError::FrameSourceClosed)?;

            let latest = self.rx.borrow_and_update().as_ref().cloned();
            if let Some(frame) = latest {
                return Ok(frame);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gonio_core::Landmark;

    fn frame_with(index: usize, x: f64) -> LandmarkFrame {
        let mut frame = LandmarkFrame::new();
        frame.set(index, Landmark::new(x, 0.5));
        frame
    }

    #[tokio::test]
    async fn test_latest_frame_wins() {
        let (tx, mut rx) = frame_channel();

        tx.publish(frame_with(0, 0.1));
        tx.publish(frame_with(0, 0.2));
        tx.publish(frame_with(0, 0.3));

        // The stale frames were overwritten; only the last survives.
        let frame = rx.next().await.unwrap();
        assert_eq!(frame.get(0).unwrap().x, 0.3);
    }

    #[tokio::test]
    async fn test_closed_sender_surfaces() {
        let (tx, mut rx) = frame_channel();
        drop(tx);
        assert!(matches!(
            rx.next().await,
            Err(TrackError::FrameSourceClosed)
        ));
    }

    #[tokio::test]
    async fn test_sequential_frames_all_seen_when_consumed() {
        let (tx, mut rx) = frame_channel();

        tx.publish(frame_with(0, 0.1));
        assert_eq!(rx.next().await.unwrap().get(0).unwrap().x, 0.1);

        tx.publish(frame_with(0, 0.2));
        assert_eq!(rx.next().await.unwrap().get(0).unwrap().x, 0.2);
    }
}
