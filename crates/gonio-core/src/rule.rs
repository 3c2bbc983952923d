//! Focus-point rules - named angle conditions over landmark triples

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minimum number of point indices a rule needs to define an angle.
pub const MIN_RULE_POINTS: usize = 3;

/// Threshold comparison operator.
///
/// The host contract restricts operators to `">"` and `"<"`. Anything else
/// arriving on the wire lands in [`Comparison::Unsupported`], whose
/// condition never holds; a malformed operator is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    LessThan,
    Unsupported,
}

impl Comparison {
    /// Whether `angle` satisfies this comparison against `threshold`.
    #[inline]
    pub fn holds(self, angle: f64, threshold: f64) -> bool {
        match self {
            Comparison::GreaterThan => angle > threshold,
            Comparison::LessThan => angle < threshold,
            Comparison::Unsupported => false,
        }
    }

    /// Wire symbol for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::GreaterThan => ">",
            Comparison::LessThan => "<",
            Comparison::Unsupported => "?",
        }
    }

    /// Parse a wire symbol; unknown symbols become `Unsupported`.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            ">" => Comparison::GreaterThan,
            "<" => Comparison::LessThan,
            _ => Comparison::Unsupported,
        }
    }
}

impl Serialize for Comparison {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Comparison {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        Ok(Comparison::from_symbol(&symbol))
    }
}

/// A configurable rule naming three landmark indices and a threshold
/// condition to evaluate the angle at the middle index against.
///
/// `threshold` and `condition` fall back to the session's global "true"
/// threshold and operator when omitted. Rules live for the duration of a
/// tracking session and may be replaced wholesale by a configuration
/// update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusPoint {
    /// Landmark slot indices; the angle vertex is `points[1]`.
    pub points: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Comparison>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FocusPoint {
    pub fn new(p1: usize, p2: usize, p3: usize) -> Self {
        FocusPoint {
            points: vec![p1, p2, p3],
            threshold: None,
            condition: None,
            name: None,
        }
    }

    pub fn named(p1: usize, p2: usize, p3: usize, name: impl Into<String>) -> Self {
        FocusPoint {
            name: Some(name.into()),
            ..FocusPoint::new(p1, p2, p3)
        }
    }

    /// The first three point indices, or `None` when the rule is
    /// malformed (fewer than three indices).
    pub fn triple(&self) -> Option<[usize; 3]> {
        if self.points.len() < MIN_RULE_POINTS {
            return None;
        }
        Some([self.points[0], self.points[1], self.points[2]])
    }

    /// Label for reports; unnamed rules report as `"unnamed"`.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}
