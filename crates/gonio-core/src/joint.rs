//! Pose joint index space
//!
//! The pose estimator emits a fixed-size ordered sequence of landmarks,
//! one slot per body joint. Index values follow the 33-point full-body
//! topology used by the estimator; they are part of the host contract
//! and must never be renumbered.

/// Number of landmark slots in a frame.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Named joint for each landmark slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseJoint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseJoint {
    /// Landmark slot index for this joint.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<PoseJoint> for usize {
    #[inline]
    fn from(joint: PoseJoint) -> usize {
        joint.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_joint_indices() {
        // The default elbow rule depends on these exact slots.
        assert_eq!(PoseJoint::LeftShoulder.index(), 11);
        assert_eq!(PoseJoint::RightShoulder.index(), 12);
        assert_eq!(PoseJoint::LeftElbow.index(), 13);
        assert_eq!(PoseJoint::RightElbow.index(), 14);
        assert_eq!(PoseJoint::LeftWrist.index(), 15);
        assert_eq!(PoseJoint::RightWrist.index(), 16);
    }

    #[test]
    fn test_last_joint_in_range() {
        assert_eq!(PoseJoint::RightFootIndex.index(), POSE_LANDMARK_COUNT - 1);
    }
}
