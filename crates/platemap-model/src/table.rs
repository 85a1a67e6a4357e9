//! Untyped tabular input.
//!
//! A [`RawTable`] is the generic named-column structure handed over by a
//! file-reading collaborator. It makes no schema promises beyond having
//! named columns; all interpretation happens in the inference engine.

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// An external table: named columns over rows of tagged cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Creates an empty table with the given column names.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Missing);
        self.rows.push(row);
    }

    /// Column names in table order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds a column by name, case-insensitively and ignoring surrounding
    /// whitespace.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.columns
            .iter()
            .position(|column| column.trim().eq_ignore_ascii_case(wanted))
    }

    /// Returns a cell; out-of-range coordinates read as missing.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&CellValue::Missing)
    }

    /// Iterates one column top to bottom.
    pub fn column_cells(&self, column: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().map(move |row| {
            row.get(column).unwrap_or(&CellValue::Missing)
        })
    }

    /// The first non-missing cell of a column, used for format sampling.
    #[must_use]
    pub fn first_non_missing(&self, column: usize) -> Option<&CellValue> {
        self.column_cells(column).find(|cell| !cell.is_missing())
    }

    /// True when every non-missing cell of the column is numeric and at
    /// least one such cell exists.
    #[must_use]
    pub fn column_is_numeric(&self, column: usize) -> bool {
        let mut seen = false;
        for cell in self.column_cells(column) {
            match cell {
                CellValue::Number(_) => seen = true,
                CellValue::Missing => {}
                CellValue::Text(_) => return false,
            }
        }
        seen
    }
}
