//! Header row normalization.

use std::collections::BTreeSet;

/// Trims a header value and collapses internal whitespace runs to one space.
pub fn normalize_header(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a header row into unique, non-empty column names.
///
/// Blank headers become `Unnamed: <i>` (0-based position); repeated names
/// get `.1`, `.2`, … appended in order of appearance.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let named: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            let name = normalize_header(value.as_ref());
            if name.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                name
            }
        })
        .collect();

    let mut taken: BTreeSet<String> = BTreeSet::new();
    let mut columns = Vec::with_capacity(named.len());
    for name in named {
        let mut candidate = name.clone();
        let mut suffix = 0;
        while taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{name}.{suffix}");
        }
        taken.insert(candidate.clone());
        columns.push(candidate);
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header_collapses_whitespace() {
        assert_eq!(normalize_header("  City \t Name "), "City Name");
        assert_eq!(normalize_header("Driver ID:"), "Driver ID:");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn test_blank_and_duplicate_headers() {
        let columns = normalize_headers(["Postal", "", "Postal", "Postal.1", " Postal "]);
        assert_eq!(
            columns,
            vec!["Postal", "Unnamed: 1", "Postal.1", "Postal.1.1", "Postal.2"]
        );
    }
}
