//! Focus-point evaluation and first-success selection

use tracing::{debug, warn};

use gonio_core::{angle_at, FocusPoint, LandmarkFrame, PoseJoint, TrackingConfig};

use crate::{FrameReport, RuleOutcome};

/// Default rule when no focus points are configured: left elbow angle,
/// vertex at the elbow.
pub const DEFAULT_LEFT_TRIPLE: [PoseJoint; 3] =
    [PoseJoint::LeftShoulder, PoseJoint::LeftElbow, PoseJoint::LeftWrist];

/// Mirrored fallback when the left arm is not detected.
pub const DEFAULT_RIGHT_TRIPLE: [PoseJoint; 3] = [
    PoseJoint::RightShoulder,
    PoseJoint::RightElbow,
    PoseJoint::RightWrist,
];

/// Evaluate one rule against one frame.
///
/// Returns `None` when the rule is malformed (fewer than three indices)
/// or any referenced landmark is absent. The rule's own threshold and
/// operator win; omitted ones fall back to the config's "true" values.
pub fn evaluate_rule(
    frame: &LandmarkFrame,
    rule: &FocusPoint,
    config: &TrackingConfig,
) -> Option<RuleOutcome> {
    let [i1, i2, i3] = rule.triple()?;

    let angle = angle_at(frame.get(i1), frame.get(i2), frame.get(i3))?;

    let threshold = rule.threshold.unwrap_or(config.angle_true);
    let condition = rule.condition.unwrap_or(config.cond_true);

    Some(RuleOutcome {
        angle,
        conditions_met: condition.holds(angle, threshold),
        point_indices: [i1, i2, i3],
        name: rule.label().to_string(),
    })
}

/// Evaluate a frame against the configured rule list and select the
/// reportable result.
///
/// Selection policy: the first rule in input order whose angle
/// computation succeeded wins; later results are computed and discarded,
/// never aggregated. An empty rule list falls back to the built-in elbow
/// pair. When nothing produces an angle the report is the degenerate
/// zero result, never an error.
pub fn evaluate_frame(
    frame: &LandmarkFrame,
    rules: &[FocusPoint],
    config: &TrackingConfig,
) -> FrameReport {
    let selected = if rules.is_empty() {
        default_elbow_outcome(frame, config)
    } else {
        rules
            .iter()
            .filter_map(|rule| evaluate_rule(frame, rule, config))
            .next()
    };

    match selected {
        Some(outcome) => {
            debug!(
                name = %outcome.name,
                angle = outcome.angle,
                conditions_met = outcome.conditions_met,
                "selected rule outcome"
            );
            FrameReport::from_outcome(outcome, config)
        }
        None => {
            warn!("no valid angle could be computed this frame");
            FrameReport::degenerate(config)
        }
    }
}

/// Built-in fallback: the left elbow angle (shoulder, elbow, wrist),
/// then the right elbow at the mirrored indices, preferring left.
fn default_elbow_outcome(frame: &LandmarkFrame, config: &TrackingConfig) -> Option<RuleOutcome> {
    let left = elbow_angle(frame, DEFAULT_LEFT_TRIPLE);
    let right = elbow_angle(frame, DEFAULT_RIGHT_TRIPLE);

    let (angle, triple) = match (left, right) {
        (Some(angle), _) => (angle, DEFAULT_LEFT_TRIPLE),
        (None, Some(angle)) => (angle, DEFAULT_RIGHT_TRIPLE),
        (None, None) => return None,
    };

    Some(RuleOutcome {
        angle,
        conditions_met: config.cond_true.holds(angle, config.angle_true),
        point_indices: triple.map(PoseJoint::index),
        name: "elbow".to_string(),
    })
}

fn elbow_angle(frame: &LandmarkFrame, triple: [PoseJoint; 3]) -> Option<f64> {
    angle_at(
        frame.joint(triple[0]),
        frame.joint(triple[1]),
        frame.joint(triple[2]),
    )
}
