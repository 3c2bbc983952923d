//! Tracking configuration - global defaults and their update overlay

use serde::{Deserialize, Serialize};

use crate::{Comparison, FocusPoint, TrackError, TrackResult};

/// Global tracking defaults.
///
/// Set once at session start, replaceable at any time via a configuration
/// update. Thresholds are degrees and must be finite values in [0, 360].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Expected number of angle rules.
    #[serde(rename = "num_angle")]
    pub num_angle: u32,
    /// Threshold for the "false" state.
    #[serde(rename = "angleFalse")]
    pub angle_false: f64,
    /// Threshold for the "true" state; also the fallback threshold for
    /// rules that omit their own.
    #[serde(rename = "angleTrue")]
    pub angle_true: f64,
    /// Operator for the "false" state.
    #[serde(rename = "condFalse")]
    pub cond_false: Comparison,
    /// Operator for the "true" state; also the fallback operator for
    /// rules that omit their own.
    #[serde(rename = "condTrue")]
    pub cond_true: Comparison,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        TrackingConfig {
            num_angle: 1,
            angle_false: 120.0,
            angle_true: 150.0,
            cond_false: Comparison::LessThan,
            cond_true: Comparison::GreaterThan,
        }
    }
}

impl TrackingConfig {
    /// Check the threshold invariants.
    pub fn validate(&self) -> TrackResult<()> {
        for threshold in [self.angle_true, self.angle_false] {
            if !threshold.is_finite() || !(0.0..=360.0).contains(&threshold) {
                return Err(TrackError::ThresholdOutOfRange(threshold));
            }
        }
        Ok(())
    }

    /// Field-wise overlay: fields present in `update` win, everything
    /// else keeps its current value.
    pub fn merged(&self, update: &TrackingUpdate) -> TrackingConfig {
        TrackingConfig {
            num_angle: update.num_angle.unwrap_or(self.num_angle),
            angle_false: update.angle_false.unwrap_or(self.angle_false),
            angle_true: update.angle_true.unwrap_or(self.angle_true),
            cond_false: update.cond_false.unwrap_or(self.cond_false),
            cond_true: update.cond_true.unwrap_or(self.cond_true),
        }
    }
}

/// Partial configuration update from the host.
///
/// A present `focus_points` list replaces the session's rule list
/// wholesale; an absent one leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingUpdate {
    #[serde(rename = "num_angle", default, skip_serializing_if = "Option::is_none")]
    pub num_angle: Option<u32>,
    #[serde(rename = "angleFalse", default, skip_serializing_if = "Option::is_none")]
    pub angle_false: Option<f64>,
    #[serde(rename = "angleTrue", default, skip_serializing_if = "Option::is_none")]
    pub angle_true: Option<f64>,
    #[serde(rename = "condFalse", default, skip_serializing_if = "Option::is_none")]
    pub cond_false: Option<Comparison>,
    #[serde(rename = "condTrue", default, skip_serializing_if = "Option::is_none")]
    pub cond_true: Option<Comparison>,
    #[serde(rename = "focusPoints", default, skip_serializing_if = "Option::is_none")]
    pub focus_points: Option<Vec<FocusPoint>>,
}
