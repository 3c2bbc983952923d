//! Landmark types - detected joint positions for a single frame
//!
//! Landmarks are produced once per analyzed video frame by the external
//! pose estimator and discarded after the frame is processed. Coordinates
//! are normalized to the frame dimensions.

use serde::{Deserialize, Serialize};

use crate::{PoseJoint, POSE_LANDMARK_COUNT};

/// A single detected body-joint position, normalized to the video frame.
///
/// `x` and `y` are in [0, 1] relative to frame width/height. `z` is depth
/// relative to the hip midpoint and may be absent on the wire; `visibility`
/// is the estimator's confidence that the joint is visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Landmark {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Landmark {
            x,
            y,
            z,
            visibility: 1.0,
        }
    }
}

/// One frame's worth of landmarks: a fixed-size ordered sequence where
/// slot `i` is a specific named joint (see [`PoseJoint`]) and entries may
/// be absent when the estimator did not detect the joint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame {
    slots: Vec<Option<Landmark>>,
}

impl LandmarkFrame {
    /// Empty frame: all slots absent.
    pub fn new() -> Self {
        LandmarkFrame {
            slots: vec![None; POSE_LANDMARK_COUNT],
        }
    }

    /// Build a frame from raw slots as delivered by the estimator.
    /// Short sequences are accepted; out-of-range lookups read as absent.
    pub fn from_slots(slots: Vec<Option<Landmark>>) -> Self {
        LandmarkFrame { slots }
    }

    /// Landmark at a raw slot index, flattening absent and out-of-range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Landmark for a named joint.
    #[inline]
    pub fn joint(&self, joint: PoseJoint) -> Option<&Landmark> {
        self.get(joint.index())
    }

    /// Set a slot, growing the frame if the estimator model is larger
    /// than expected.
    pub fn set(&mut self, index: usize, landmark: Landmark) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(landmark);
    }

    /// Mark a slot absent.
    pub fn clear(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Raw slots, for passthrough to the host.
    pub fn slots(&self) -> &[Option<Landmark>] {
        &self.slots
    }
}
