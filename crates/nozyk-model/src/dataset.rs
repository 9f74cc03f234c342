use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{ModelError, Result};

/// One row of a [`Dataset`], positionally aligned with the dataset columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// An ordered table of rows sharing one set of uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Creates an empty dataset with the given column names.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = BTreeSet::new();
        for name in &columns {
            if name.is_empty() {
                return Err(ModelError::EmptyColumnName);
            }
            if !seen.insert(name.as_str()) {
                return Err(ModelError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Creates a dataset from rows of cells.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<CellValue>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dataset = Self::new(columns)?;
        for cells in rows {
            dataset.push_row(cells)?;
        }
        Ok(dataset)
    }

    /// Appends a row; its width must match the column count.
    pub fn push_row(&mut self, cells: Vec<CellValue>) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(ModelError::RowWidth {
                expected: self.columns.len(),
                actual: cells.len(),
            });
        }
        self.rows.push(Row::new(cells));
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Looks up a column index, failing with [`ModelError::ColumnNotFound`].
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ModelError::ColumnNotFound(name.to_string()))
    }

    /// Value of `column` in row `row`.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// Iterates the values of the column at `index`.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Replaces every value of the column at `index`.
    ///
    /// `values` must hold exactly one value per row.
    pub fn replace_column(&mut self, index: usize, values: Vec<CellValue>) -> Result<()> {
        if index >= self.columns.len() {
            return Err(ModelError::ColumnNotFound(format!("#{index}")));
        }
        if values.len() != self.rows.len() {
            return Err(ModelError::RowWidth {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.cells[index] = value;
        }
        Ok(())
    }

    /// Keeps only the rows for which `keep` returns true, preserving order.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Builds a new dataset holding the rows at `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&idx| self.rows.get(idx).cloned())
                .collect(),
        }
    }

    /// First `count` rows, for previews.
    pub fn head(&self, count: usize) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(count).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_rows(
            ["A", "B"],
            vec![
                vec![CellValue::Number(1.0), CellValue::text("x")],
                vec![CellValue::Number(2.0), CellValue::Empty],
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_and_empty_columns() {
        assert_eq!(
            Dataset::new(["A", "A"]).unwrap_err(),
            ModelError::DuplicateColumn("A".to_string())
        );
        assert_eq!(Dataset::new([""]).unwrap_err(), ModelError::EmptyColumnName);
    }

    #[test]
    fn push_row_checks_width() {
        let mut dataset = Dataset::new(["A", "B"]).unwrap();
        let err = dataset.push_row(vec![CellValue::Empty]).unwrap_err();
        assert_eq!(
            err,
            ModelError::RowWidth {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn value_lookup_by_name() {
        let dataset = sample();
        assert_eq!(dataset.value(1, "A"), Some(&CellValue::Number(2.0)));
        assert_eq!(dataset.value(0, "C"), None);
        assert_eq!(dataset.value(5, "A"), None);
    }

    #[test]
    fn replace_column_requires_one_value_per_row() {
        let mut dataset = sample();
        assert!(dataset.replace_column(0, vec![CellValue::Empty]).is_err());
        dataset
            .replace_column(1, vec![CellValue::text("a"), CellValue::text("b")])
            .unwrap();
        assert_eq!(dataset.value(1, "B"), Some(&CellValue::text("b")));
    }

    #[test]
    fn select_rows_keeps_columns_and_order() {
        let dataset = sample();
        let picked = dataset.select_rows(&[1, 0]);
        assert_eq!(picked.columns(), dataset.columns());
        assert_eq!(picked.value(0, "A"), Some(&CellValue::Number(2.0)));
        assert_eq!(picked.value(1, "A"), Some(&CellValue::Number(1.0)));
    }
}
