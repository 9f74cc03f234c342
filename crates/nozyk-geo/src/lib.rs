//! Coordinate resolution for GPS columns.
//!
//! Source data mixes projected grid coordinates and plain decimal degrees
//! without saying which. The resolver infers the encoding and axis order
//! from magnitudes and a regional calibration, then produces one
//! latitude/longitude pair per usable row.

pub mod detect;
pub mod region;
pub mod resolve;
pub mod types;

pub use detect::{CoordinateHeuristics, classify_system, detect_axis_order};
pub use region::{AffineApproximation, Band, Region};
pub use resolve::{resolve_coordinates, resolve_coordinates_with};
pub use types::{
    AxisOrder, CoordinateSystem, GeoAdvisory, GeoPoint, GeoResolution, RawPoint, ResolvedCoordinates,
    ResolvedPoint,
};
