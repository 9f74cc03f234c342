//! Magnitude-based heuristics.
//!
//! Kept pure and behind [`CoordinateHeuristics`] so callers can substitute
//! their own calibration.

use crate::region::Region;
use crate::types::{AxisOrder, CoordinateSystem, GeoPoint, RawPoint};

/// Largest valid absolute longitude.
pub const MAX_LONGITUDE: f64 = 180.0;
/// Largest valid absolute latitude.
pub const MAX_LATITUDE: f64 = 90.0;

/// Decisions the resolver delegates.
pub trait CoordinateHeuristics {
    /// Classifies the encoding of the pair from one sample.
    fn classify_system(&self, sample: RawPoint) -> CoordinateSystem;

    /// Decides which axis is latitude from one geographic sample.
    fn axis_order(&self, sample: RawPoint) -> AxisOrder;

    /// Converts a projected pair to degrees.
    fn project(&self, raw: RawPoint) -> GeoPoint;

    /// Whether a resolved point is plausible.
    fn accepts(&self, point: GeoPoint) -> bool;
}

/// Projected when either component exceeds its geographic bound
/// (X is the longitude-like axis, Y the latitude-like one).
pub fn classify_system(sample: RawPoint) -> CoordinateSystem {
    if sample.x.abs() > MAX_LONGITUDE || sample.y.abs() > MAX_LATITUDE {
        CoordinateSystem::Projected
    } else {
        CoordinateSystem::Geographic
    }
}

/// Axis order from the first coordinate: latitude band first, then
/// longitude band.
pub fn detect_axis_order(x: f64, region: &Region) -> AxisOrder {
    if region.latitude.contains(x) {
        AxisOrder::LatLon
    } else if region.longitude.contains(x) {
        AxisOrder::LonLat
    } else {
        AxisOrder::Indeterminate
    }
}

impl CoordinateHeuristics for Region {
    fn classify_system(&self, sample: RawPoint) -> CoordinateSystem {
        classify_system(sample)
    }

    fn axis_order(&self, sample: RawPoint) -> AxisOrder {
        detect_axis_order(sample.x, self)
    }

    fn project(&self, raw: RawPoint) -> GeoPoint {
        self.projection.to_geographic(raw.x, raw.y)
    }

    fn accepts(&self, point: GeoPoint) -> bool {
        self.contains(point)
    }
}
