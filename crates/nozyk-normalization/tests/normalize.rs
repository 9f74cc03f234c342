//! Property and scenario tests for the normalization pass.

use chrono::NaiveDate;
use proptest::prelude::*;

use nozyk_model::{CellKind, CellValue, Dataset};
use nozyk_normalization::{
    DEFAULT_FORCED_TEXT_COLUMNS, NormalizationOptions, normalize, normalize_with, value_kinds,
};

const COLUMNS: [&str; 5] = ["DATA", "TIME", "Postal", "Street Num", "Notes"];

fn cell_strategy() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        "[A-Z0-9 ]{0,6}".prop_map(CellValue::text),
        (-100_000i64..100_000i64).prop_map(|n| CellValue::Number(n as f64 / 4.0)),
        any::<bool>().prop_map(CellValue::Bool),
        (0u32..3650).prop_map(|offset| {
            let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            CellValue::DateTime(
                (base + chrono::Duration::days(i64::from(offset)))
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            )
        }),
    ]
}

fn numeric_cell_strategy() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        (0i64..200_000i64).prop_map(|n| CellValue::Number(n as f64 / 4.0)),
    ]
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    let row = (
        numeric_cell_strategy(),
        numeric_cell_strategy(),
        cell_strategy(),
        cell_strategy(),
        cell_strategy(),
    )
        .prop_map(|(a, b, c, d, e)| vec![a, b, c, d, e]);
    prop::collection::vec(row, 0..12)
        .prop_map(|rows| Dataset::from_rows(COLUMNS, rows).expect("valid dataset"))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(dataset in dataset_strategy()) {
        let once = normalize(dataset);
        let twice = normalize(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn forced_columns_are_always_text(dataset in dataset_strategy()) {
        let normalized = normalize(dataset);
        for name in DEFAULT_FORCED_TEXT_COLUMNS {
            let Some(index) = normalized.column_index(name) else { continue };
            let kinds = value_kinds(normalized.column_values(index));
            prop_assert!(kinds.iter().all(|kind| *kind == CellKind::Text));
        }
    }

    #[test]
    fn every_column_has_at_most_one_kind(dataset in dataset_strategy()) {
        let normalized = normalize(dataset);
        for index in 0..normalized.column_count() {
            prop_assert!(value_kinds(normalized.column_values(index)).len() <= 1);
        }
    }
}

#[test]
fn delivery_sheet_scenario() {
    let raw = Dataset::from_rows(
        ["Driver ID:", "DATA", "TIME", "Street Num", "Exception info"],
        vec![
            vec![
                CellValue::text("PLWRO00123"),
                CellValue::Number(45353.0),
                CellValue::Number(0.375),
                CellValue::Number(12.0),
                CellValue::text("DR RELEASED"),
            ],
            vec![
                CellValue::text("PLWRO00123"),
                CellValue::Number(45354.0),
                CellValue::Empty,
                CellValue::text("12A"),
                CellValue::Empty,
            ],
        ],
    )
    .unwrap();

    let (normalized, report) = normalize_with(raw, &NormalizationOptions::default());

    assert_eq!(
        normalized.value(0, "DATA").and_then(CellValue::date),
        NaiveDate::from_ymd_opt(2024, 3, 2)
    );
    assert_eq!(
        normalized.value(1, "DATA").and_then(CellValue::date),
        NaiveDate::from_ymd_opt(2024, 3, 3)
    );
    assert_eq!(normalized.value(0, "TIME").map(CellValue::to_text), Some("09:00:00".to_string()));
    assert_eq!(normalized.value(0, "Street Num"), Some(&CellValue::text("12")));
    assert_eq!(normalized.value(1, "Street Num"), Some(&CellValue::text("12A")));
    assert_eq!(report.fallback_count(), 0);
}

#[test]
fn custom_forced_columns_replace_defaults() {
    let raw = Dataset::from_rows(
        ["Postal", "Route"],
        vec![vec![CellValue::Number(50001.0), CellValue::Number(7.0)]],
    )
    .unwrap();
    let options = NormalizationOptions::new().with_forced_text_columns(["Route"]);
    let (normalized, _) = normalize_with(raw, &options);
    assert_eq!(normalized.value(0, "Postal"), Some(&CellValue::Number(50001.0)));
    assert_eq!(normalized.value(0, "Route"), Some(&CellValue::text("7")));
}
