//! Regional calibration: plausible coordinate bands and the affine
//! approximation used for projected grid coordinates.

use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

/// Closed numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive membership; NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Linear scale-and-offset approximation of one projected grid zone.
///
/// `longitude = lon_origin + (x - x_origin) / metres_per_degree_lon` and
/// `latitude = lat_origin + (y - y_origin) / metres_per_degree_lat`.
/// This is not a map projection; it is only accurate near the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineApproximation {
    pub x_origin: f64,
    pub y_origin: f64,
    pub lon_origin: f64,
    pub lat_origin: f64,
    pub metres_per_degree_lon: f64,
    pub metres_per_degree_lat: f64,
}

impl AffineApproximation {
    pub fn to_geographic(&self, x: f64, y: f64) -> GeoPoint {
        GeoPoint {
            latitude: self.lat_origin + (y - self.y_origin) / self.metres_per_degree_lat,
            longitude: self.lon_origin + (x - self.x_origin) / self.metres_per_degree_lon,
        }
    }
}

/// Region the data is expected to come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub name: String,
    pub latitude: Band,
    pub longitude: Band,
    pub projection: AffineApproximation,
}

impl Region {
    /// Poland: latitude 49–55, longitude 14–24, grid zone with central
    /// meridian 15°E.
    pub fn poland() -> Self {
        Self {
            name: "Poland".to_string(),
            latitude: Band::new(49.0, 55.0),
            longitude: Band::new(14.0, 24.0),
            projection: AffineApproximation {
                x_origin: 500_000.0,
                y_origin: 5_000_000.0,
                lon_origin: 15.0,
                lat_origin: 52.0,
                metres_per_degree_lon: 68_600.0,
                metres_per_degree_lat: 111_200.0,
            },
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        self.latitude.contains(point.latitude) && self.longitude.contains(point.longitude)
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::poland()
    }
}
