use std::collections::BTreeSet;

use nozyk_model::Dataset;

/// Indices from `rows` whose composite key over `key_columns` has not been
/// seen before, in input order.
///
/// Empty cells compare equal to each other, so rows differing only in which
/// cells are blank still collapse.
pub(crate) fn unique_rows_by_keys<I>(dataset: &Dataset, key_columns: &[usize], rows: I) -> Vec<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut seen = BTreeSet::new();
    let mut keep = Vec::new();
    for idx in rows {
        let Some(row) = dataset.rows().get(idx) else {
            continue;
        };
        let mut composite = String::new();
        for (pos, &column) in key_columns.iter().enumerate() {
            if pos > 0 {
                composite.push('|');
            }
            if let Some(cell) = row.get(column) {
                composite.push_str(cell.dedupe_key().trim());
            }
        }
        if seen.insert(composite) {
            keep.push(idx);
        }
    }
    keep
}
