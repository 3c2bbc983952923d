//! Evaluation results - per-rule outcomes and the per-frame report

use serde::{Deserialize, Serialize};

use gonio_core::TrackingConfig;

/// Outcome of evaluating a single focus-point rule.
///
/// Ephemeral: computed per frame, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    /// Computed angle in degrees, in [0, 180].
    pub angle: f64,
    /// Whether the rule's condition held.
    pub conditions_met: bool,
    /// The three landmark indices used.
    pub point_indices: [usize; 3],
    /// The rule's name label.
    pub name: String,
}

/// The reportable per-frame result sent to the host.
///
/// When no rule produced an angle the report degenerates to
/// `conditionsMet = false` with a zero angle and no name or indices;
/// the threshold field always carries the session's "true" threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    #[serde(rename = "conditionsMet")]
    pub conditions_met: bool,
    pub angle: f64,
    pub threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "pointIndices", default, skip_serializing_if = "Option::is_none")]
    pub point_indices: Option<[usize; 3]>,
}

impl FrameReport {
    /// Report for a selected rule outcome.
    pub fn from_outcome(outcome: RuleOutcome, config: &TrackingConfig) -> Self {
        FrameReport {
            conditions_met: outcome.conditions_met,
            angle: outcome.angle,
            threshold: config.angle_true,
            name: Some(outcome.name),
            point_indices: Some(outcome.point_indices),
        }
    }

    /// Degenerate report: no rule produced an angle this frame.
    pub fn degenerate(config: &TrackingConfig) -> Self {
        FrameReport {
            conditions_met: false,
            angle: 0.0,
            threshold: config.angle_true,
            name: None,
            point_indices: None,
        }
    }
}
