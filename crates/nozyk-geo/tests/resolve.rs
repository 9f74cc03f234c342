use nozyk_geo::{
    AxisOrder, CoordinateHeuristics, CoordinateSystem, GeoAdvisory, GeoPoint, GeoResolution, RawPoint,
    Region, resolve_coordinates, resolve_coordinates_with,
};
use nozyk_model::{CellValue, Dataset};
use proptest::prelude::*;

fn gps(rows: Vec<(CellValue, CellValue)>) -> Dataset {
    Dataset::from_rows(
        ["GPSX", "GPSY"],
        rows.into_iter().map(|(x, y)| vec![x, y]).collect(),
    )
    .unwrap()
}

fn numbers(pairs: &[(f64, f64)]) -> Dataset {
    gps(pairs
        .iter()
        .map(|&(x, y)| (CellValue::Number(x), CellValue::Number(y)))
        .collect())
}

fn resolved(dataset: &Dataset) -> nozyk_geo::ResolvedCoordinates {
    match resolve_coordinates(dataset, "GPSX", "GPSY") {
        GeoResolution::Resolved(resolved) => resolved,
        GeoResolution::NoGeoData => panic!("expected resolved coordinates"),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn latitude_first_pair() {
    let result = resolved(&numbers(&[(52.0, 17.0)]));
    assert_eq!(result.system, CoordinateSystem::Geographic);
    assert_eq!(result.axis_order, Some(AxisOrder::LatLon));
    assert_eq!(
        result.points[0].position,
        GeoPoint {
            latitude: 52.0,
            longitude: 17.0
        }
    );
    assert!(result.advisories.is_empty());
}

#[test]
fn longitude_first_pair() {
    let result = resolved(&numbers(&[(17.0, 52.0)]));
    assert_eq!(result.axis_order, Some(AxisOrder::LonLat));
    assert_eq!(result.points[0].position.latitude, 52.0);
    assert_eq!(result.points[0].position.longitude, 17.0);
}

#[test]
fn projected_pair_uses_affine_approximation() {
    let result = resolved(&numbers(&[(500_000.0, 5_000_000.0)]));
    assert_eq!(result.system, CoordinateSystem::Projected);
    assert_eq!(result.axis_order, None);
    let position = result.points[0].position;
    assert!(close(position.longitude, 15.0));
    assert!(close(position.latitude, 52.0));
}

#[test]
fn missing_columns_mean_no_geodata() {
    let dataset = Dataset::from_rows(["Driver ID:"], vec![vec![CellValue::text("X")]]).unwrap();
    assert_eq!(
        resolve_coordinates(&dataset, "GPSX", "GPSY"),
        GeoResolution::NoGeoData
    );
}

#[test]
fn only_unusable_rows_mean_no_geodata() {
    let dataset = gps(vec![
        (CellValue::Empty, CellValue::Number(17.0)),
        (CellValue::text("n/a"), CellValue::Number(52.0)),
    ]);
    assert_eq!(
        resolve_coordinates(&dataset, "GPSX", "GPSY"),
        GeoResolution::NoGeoData
    );
}

#[test]
fn unusable_rows_are_dropped_and_reported() {
    let dataset = gps(vec![
        (CellValue::Number(52.0), CellValue::Number(17.0)),
        (CellValue::Empty, CellValue::Number(17.0)),
        (CellValue::text("abc"), CellValue::Number(17.0)),
        (CellValue::text("51,5"), CellValue::text("16.5")),
    ]);
    let result = resolved(&dataset);
    let rows: Vec<usize> = result.points.iter().map(|point| point.row).collect();
    assert_eq!(rows, vec![0, 3]);
    assert!(result.advisories.contains(&GeoAdvisory::DroppedRows {
        missing: 1,
        unparseable: 1
    }));
    assert!(close(result.center.latitude, 51.75));
    assert!(close(result.center.longitude, 16.75));
}

#[test]
fn out_of_region_rows_are_filtered() {
    let result = resolved(&numbers(&[(52.0, 17.0), (52.0, 30.0), (50.0, 19.0)]));
    let rows: Vec<usize> = result.points.iter().map(|point| point.row).collect();
    assert_eq!(rows, vec![0, 2]);
    assert!(result
        .advisories
        .contains(&GeoAdvisory::OutOfRegionRows { dropped: 1 }));
    assert!(close(result.center.latitude, 51.0));
    assert!(close(result.center.longitude, 18.0));
}

#[test]
fn ambiguous_axis_order_defaults_to_lon_lat() {
    let result = resolved(&numbers(&[(2.35, 48.85)]));
    assert_eq!(result.axis_order, Some(AxisOrder::Indeterminate));
    assert_eq!(result.points[0].position.longitude, 2.35);
    assert_eq!(result.points[0].position.latitude, 48.85);
    assert!(result.advisories.contains(&GeoAdvisory::AmbiguousAxisOrder));
    // Paris is outside the region; nothing passes, so everything is kept.
    assert!(result.advisories.contains(&GeoAdvisory::NoRowsInRegion));
    assert_eq!(result.points.len(), 1);
}

#[test]
fn latitude_first_outside_region_falls_back_to_lon_lat() {
    // 52 falls in the latitude band, but (52, 30) is outside Poland.
    let result = resolved(&numbers(&[(52.0, 30.0)]));
    assert_eq!(result.axis_order, Some(AxisOrder::LonLat));
    assert_eq!(result.points.len(), 1);
    assert_eq!(result.points[0].position.longitude, 52.0);
    assert_eq!(result.points[0].position.latitude, 30.0);
    assert!(result.advisories.contains(&GeoAdvisory::NoRowsInRegion));
    assert!(!result.advisories.contains(&GeoAdvisory::AmbiguousAxisOrder));
}

#[test]
fn fallback_drops_points_beyond_degree_ranges() {
    // Read as x=longitude, y=latitude the second pair has latitude 120.
    let result = resolved(&numbers(&[(52.0, 30.0), (53.0, 120.0)]));
    assert_eq!(result.points.len(), 1);
    assert_eq!(result.points[0].row, 0);
    assert!(close(result.center.longitude, 52.0));
}

#[test]
fn boundary_values_are_inside_the_bands() {
    let result = resolved(&numbers(&[(49.0, 24.0), (55.0, 14.0)]));
    assert_eq!(result.axis_order, Some(AxisOrder::LatLon));
    assert_eq!(result.points.len(), 2);
}

#[test]
fn to_dataset_lists_row_and_position() {
    let table = resolved(&numbers(&[(52.0, 17.0)])).to_dataset().unwrap();
    assert_eq!(table.columns(), ["row", "latitude", "longitude"]);
    assert_eq!(table.value(0, "latitude"), Some(&CellValue::Number(52.0)));
}

/// Treats every pair as geographic, latitude first, everywhere accepted.
struct LatitudeFirst;

impl CoordinateHeuristics for LatitudeFirst {
    fn classify_system(&self, _sample: RawPoint) -> CoordinateSystem {
        CoordinateSystem::Geographic
    }

    fn axis_order(&self, _sample: RawPoint) -> AxisOrder {
        AxisOrder::LatLon
    }

    fn project(&self, raw: RawPoint) -> GeoPoint {
        GeoPoint {
            latitude: raw.x,
            longitude: raw.y,
        }
    }

    fn accepts(&self, _point: GeoPoint) -> bool {
        true
    }
}

#[test]
fn heuristics_are_injectable() {
    let dataset = numbers(&[(-33.9, 151.2)]);
    let result = resolve_coordinates_with(&dataset, "GPSX", "GPSY", &LatitudeFirst);
    let resolved = result.resolved().unwrap();
    assert_eq!(resolved.points[0].position.latitude, -33.9);
    assert_eq!(resolved.points[0].position.longitude, 151.2);
    assert!(resolved.advisories.is_empty());
}

#[test]
fn custom_region_changes_axis_bands() {
    let mut region = Region::poland();
    region.latitude = nozyk_geo::Band::new(-40.0, -30.0);
    region.longitude = nozyk_geo::Band::new(140.0, 155.0);
    let dataset = numbers(&[(151.2, -33.9)]);
    let result = resolve_coordinates_with(&dataset, "GPSX", "GPSY", &region);
    let resolved = result.resolved().unwrap();
    assert_eq!(resolved.axis_order, Some(AxisOrder::LonLat));
    assert_eq!(resolved.points[0].position.latitude, -33.9);
}

proptest! {
    #[test]
    fn resolved_points_stay_within_degree_ranges(
        pairs in prop::collection::vec((-1.0e7f64..1.0e7, -1.0e7f64..1.0e7), 1..20)
    ) {
        if let GeoResolution::Resolved(result) = resolve_coordinates(&numbers(&pairs), "GPSX", "GPSY") {
            for point in &result.points {
                prop_assert!(point.position.latitude.abs() <= 90.0);
                prop_assert!(point.position.longitude.abs() <= 180.0);
            }
            prop_assert!(!result.points.is_empty());
        }
    }

    #[test]
    fn non_finite_values_never_resolve(x in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)]) {
        let dataset = numbers(&[(x, 17.0)]);
        prop_assert_eq!(resolve_coordinates(&dataset, "GPSX", "GPSY"), GeoResolution::NoGeoData);
    }
}
