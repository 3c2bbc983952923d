//! Three-point angle geometry
//!
//! The single geometric primitive of the engine: the angle at a vertex
//! subtended by rays to two other points, in degrees.

use crate::Landmark;

/// Angle at vertex `p2` subtended by rays to `p1` and `p3`, in degrees.
///
/// Computed as the absolute difference of the two ray directions
/// (arctangent form, not law of cosines), then reflected into [0, 180]:
/// a raw magnitude above 180 reports as `360 - raw`. Comparisons near the
/// 180 degree boundary depend on this exact normalization.
///
/// Returns `None` when any point is absent; never panics.
pub fn angle_at(
    p1: Option<&Landmark>,
    p2: Option<&Landmark>,
    p3: Option<&Landmark>,
) -> Option<f64> {
    let (p1, p2, p3) = (p1?, p2?, p3?);

    let radians = (p3.y - p2.y).atan2(p3.x - p2.x) - (p1.y - p2.y).atan2(p1.x - p2.x);
    let raw = radians.to_degrees().abs();

    Some(if raw > 180.0 { 360.0 - raw } else { raw })
}
