use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw coordinate pair as read from the X/Y columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Encoding of a coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Planar grid metres.
    Projected,
    /// Decimal degrees.
    Geographic,
}

/// Which raw axis holds latitude in a geographic pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrder {
    /// X is latitude, Y is longitude.
    LatLon,
    /// X is longitude, Y is latitude.
    LonLat,
    /// Neither band matched; resolved as `LonLat`.
    Indeterminate,
}

impl AxisOrder {
    /// Maps a raw pair to a geographic point.
    pub fn apply(self, raw: RawPoint) -> GeoPoint {
        match self {
            AxisOrder::LatLon => GeoPoint {
                latitude: raw.x,
                longitude: raw.y,
            },
            AxisOrder::LonLat | AxisOrder::Indeterminate => GeoPoint {
                latitude: raw.y,
                longitude: raw.x,
            },
        }
    }
}

/// Non-fatal findings reported alongside a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoAdvisory {
    /// Rows dropped because a coordinate was missing or not a finite number.
    DroppedRows { missing: usize, unparseable: usize },
    /// Axis order could not be inferred from the first sample.
    AmbiguousAxisOrder,
    /// Rows outside the regional bounds were discarded.
    OutOfRegionRows { dropped: usize },
    /// No row fell inside the region; all rows were kept.
    NoRowsInRegion,
}

impl fmt::Display for GeoAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoAdvisory::DroppedRows {
                missing,
                unparseable,
            } => write!(
                f,
                "dropped {missing} rows with missing and {unparseable} with unparseable coordinates"
            ),
            GeoAdvisory::AmbiguousAxisOrder => {
                f.write_str("axis order is ambiguous; assuming X=longitude, Y=latitude")
            }
            GeoAdvisory::OutOfRegionRows { dropped } => {
                write!(f, "dropped {dropped} rows outside the region")
            }
            GeoAdvisory::NoRowsInRegion => {
                f.write_str("no rows inside the region; keeping all rows unfiltered")
            }
        }
    }
}

/// A dataset row with its resolved position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPoint {
    /// Index of the row in the input dataset.
    pub row: usize,
    pub position: GeoPoint,
}

/// Successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCoordinates {
    pub points: Vec<ResolvedPoint>,
    /// Mean latitude/longitude of `points`.
    pub center: GeoPoint,
    pub system: CoordinateSystem,
    /// Axis order for geographic input; `None` for projected input.
    pub axis_order: Option<AxisOrder>,
    pub advisories: Vec<GeoAdvisory>,
}

/// Outcome of coordinate resolution.
///
/// `NoGeoData` is a terminal, non-error outcome distinct from an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeoResolution {
    Resolved(ResolvedCoordinates),
    NoGeoData,
}

impl GeoResolution {
    pub fn resolved(&self) -> Option<&ResolvedCoordinates> {
        match self {
            GeoResolution::Resolved(resolved) => Some(resolved),
            GeoResolution::NoGeoData => None,
        }
    }
}
