//! Coordinate resolution for one pair of X/Y columns.

use tracing::{debug, info, warn};

use nozyk_model::{CellValue, Dataset};

use crate::detect::{CoordinateHeuristics, MAX_LATITUDE, MAX_LONGITUDE};
use crate::region::Region;
use crate::types::{
    AxisOrder, CoordinateSystem, GeoAdvisory, GeoPoint, GeoResolution, RawPoint, ResolvedCoordinates,
    ResolvedPoint,
};

/// Resolves the coordinate columns against the default region.
pub fn resolve_coordinates(dataset: &Dataset, x_column: &str, y_column: &str) -> GeoResolution {
    resolve_coordinates_with(dataset, x_column, y_column, &Region::default())
}

/// Resolves the coordinate columns with caller-supplied heuristics.
///
/// Rows with a missing or unparseable component are dropped. The encoding
/// and axis order are inferred from the first remaining row. Points outside
/// the accepted region are discarded unless none would remain. In that case
/// every point is re-read in the default order (x longitude, y latitude),
/// points outside the degree ranges are dropped and
/// [`GeoAdvisory::NoRowsInRegion`] is reported.
pub fn resolve_coordinates_with<H>(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
    heuristics: &H,
) -> GeoResolution
where
    H: CoordinateHeuristics + ?Sized,
{
    let (Some(x_index), Some(y_index)) = (dataset.column_index(x_column), dataset.column_index(y_column))
    else {
        debug!(x_column, y_column, "coordinate columns not present");
        return GeoResolution::NoGeoData;
    };

    let mut advisories = Vec::new();
    let samples = collect_samples(dataset, x_index, y_index, &mut advisories);
    let Some(&(_, first)) = samples.first() else {
        info!(x_column, y_column, "no parseable coordinates");
        return GeoResolution::NoGeoData;
    };

    let system = heuristics.classify_system(first);
    let mut axis_order = match system {
        CoordinateSystem::Projected => None,
        CoordinateSystem::Geographic => {
            let order = heuristics.axis_order(first);
            if order == AxisOrder::Indeterminate {
                warn!(x = first.x, y = first.y, "cannot infer axis order from first sample");
                advisories.push(GeoAdvisory::AmbiguousAxisOrder);
            }
            Some(order)
        }
    };

    let assigned = assign(&samples, axis_order, heuristics);
    let (inside, outside): (Vec<ResolvedPoint>, Vec<ResolvedPoint>) = assigned
        .into_iter()
        .partition(|point| heuristics.accepts(point.position));
    let points = if inside.is_empty() {
        warn!(rows = outside.len(), "no coordinates inside the region, keeping all");
        advisories.push(GeoAdvisory::NoRowsInRegion);
        // Nothing fits the region: fall back to x=longitude, y=latitude.
        if axis_order == Some(AxisOrder::LatLon) {
            axis_order = Some(AxisOrder::LonLat);
        }
        let fallback = assign(&samples, axis_order, heuristics);
        let total = fallback.len();
        let valid: Vec<ResolvedPoint> = fallback
            .into_iter()
            .filter(|point| is_valid_geographic(point.position))
            .collect();
        if valid.len() < total {
            debug!(dropped = total - valid.len(), "dropped points outside valid degree ranges");
        }
        valid
    } else {
        if !outside.is_empty() {
            debug!(dropped = outside.len(), "dropped coordinates outside the region");
            advisories.push(GeoAdvisory::OutOfRegionRows {
                dropped: outside.len(),
            });
        }
        inside
    };

    let Some(center) = mean_position(&points) else {
        info!(x_column, y_column, "no coordinates within valid degree ranges");
        return GeoResolution::NoGeoData;
    };
    info!(
        points = points.len(),
        system = ?system,
        axis_order = ?axis_order,
        "resolved coordinates"
    );
    GeoResolution::Resolved(ResolvedCoordinates {
        points,
        center,
        system,
        axis_order,
        advisories,
    })
}

/// Projects or orders every sample.
fn assign<H>(samples: &[(usize, RawPoint)], axis_order: Option<AxisOrder>, heuristics: &H) -> Vec<ResolvedPoint>
where
    H: CoordinateHeuristics + ?Sized,
{
    samples
        .iter()
        .map(|&(row, raw)| ResolvedPoint {
            row,
            position: match axis_order {
                None => heuristics.project(raw),
                Some(order) => order.apply(raw),
            },
        })
        .collect()
}

fn collect_samples(
    dataset: &Dataset,
    x_index: usize,
    y_index: usize,
    advisories: &mut Vec<GeoAdvisory>,
) -> Vec<(usize, RawPoint)> {
    let mut missing = 0;
    let mut unparseable = 0;
    let mut samples = Vec::with_capacity(dataset.row_count());
    for (row_index, row) in dataset.rows().iter().enumerate() {
        let x = row.get(x_index).unwrap_or(&CellValue::Empty);
        let y = row.get(y_index).unwrap_or(&CellValue::Empty);
        if x.is_empty() || y.is_empty() {
            missing += 1;
            continue;
        }
        match (x.to_f64(), y.to_f64()) {
            (Some(x), Some(y)) => samples.push((row_index, RawPoint { x, y })),
            _ => unparseable += 1,
        }
    }
    if missing > 0 || unparseable > 0 {
        debug!(missing, unparseable, "dropped rows without usable coordinates");
        advisories.push(GeoAdvisory::DroppedRows {
            missing,
            unparseable,
        });
    }
    samples
}

fn is_valid_geographic(point: GeoPoint) -> bool {
    point.latitude.abs() <= MAX_LATITUDE && point.longitude.abs() <= MAX_LONGITUDE
}

fn mean_position(points: &[ResolvedPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }
    let count = points.len() as f64;
    let (lat_sum, lon_sum) = points.iter().fold((0.0, 0.0), |(lat, lon), point| {
        (lat + point.position.latitude, lon + point.position.longitude)
    });
    Some(GeoPoint {
        latitude: lat_sum / count,
        longitude: lon_sum / count,
    })
}

impl ResolvedCoordinates {
    /// Tabular view: source row index, latitude and longitude.
    pub fn to_dataset(&self) -> nozyk_model::Result<Dataset> {
        Dataset::from_rows(
            ["row", "latitude", "longitude"],
            self.points
                .iter()
                .map(|point| {
                    vec![
                        CellValue::Number(point.row as f64),
                        CellValue::Number(point.position.latitude),
                        CellValue::Number(point.position.longitude),
                    ]
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_points() {
        let points = [
            ResolvedPoint {
                row: 0,
                position: GeoPoint {
                    latitude: 50.0,
                    longitude: 16.0,
                },
            },
            ResolvedPoint {
                row: 1,
                position: GeoPoint {
                    latitude: 52.0,
                    longitude: 18.0,
                },
            },
        ];
        assert_eq!(
            mean_position(&points),
            Some(GeoPoint {
                latitude: 51.0,
                longitude: 17.0
            })
        );
        assert_eq!(mean_position(&[]), None);
    }

    #[test]
    fn degree_ranges_are_inclusive() {
        assert!(is_valid_geographic(GeoPoint {
            latitude: -90.0,
            longitude: 180.0
        }));
        assert!(!is_valid_geographic(GeoPoint {
            latitude: 90.5,
            longitude: 0.0
        }));
    }
}
