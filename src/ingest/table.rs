//! Already-split tabular input.

use serde::{Deserialize, Serialize};

/// A grid of optional string cells, as produced by a CSV or spreadsheet reader.
///
/// Rows may have different lengths; a cell past the end of its row reads as empty.
///
/// # Example
///
/// ```
/// use attendance_engine::ingest::RawTable;
///
/// let table = RawTable::from_rows(&[&["Days", "", "1 T"], &["Employee:", "", "", "7 : Asha"]]);
/// assert_eq!(table.cell(0, 2), Some("1 T"));
/// assert_eq!(table.cell(0, 1), None);
/// assert_eq!(table.cell(1, 9), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Wraps rows of cells.
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    /// Builds a table from string slices, treating empty strings as empty cells.
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| (!cell.is_empty()).then(|| (*cell).to_string()))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of a row.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// The trimmed content of a cell, or `None` when the cell is absent or blank.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)?
            .get(col)?
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Index of the first row at or after `from` whose first cell equals `marker`.
    pub fn find_row(&self, marker: &str, from: usize) -> Option<usize> {
        (from..self.rows.len()).find(|&row| self.cell(row, 0) == Some(marker))
    }

    /// Indices of every row whose first cell equals `marker`.
    pub fn rows_with_marker(&self, marker: &str) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&row| self.cell(row, 0) == Some(marker))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_trims_and_blanks() {
        let table = RawTable::new(vec![vec![
            Some("  Days ".to_string()),
            Some("   ".to_string()),
            None,
        ]]);
        assert_eq!(table.cell(0, 0), Some("Days"));
        assert_eq!(table.cell(0, 1), None);
        assert_eq!(table.cell(0, 2), None);
        assert_eq!(table.cell(3, 0), None);
    }

    #[test]
    fn test_find_rows_by_marker() {
        let table = RawTable::from_rows(&[
            &["Days"],
            &["Employee:"],
            &["Status"],
            &["Employee:"],
        ]);
        assert_eq!(table.find_row("Employee:", 0), Some(1));
        assert_eq!(table.find_row("Employee:", 2), Some(3));
        assert_eq!(table.find_row("InTime", 0), None);
        assert_eq!(table.rows_with_marker("Employee:"), vec![1, 3]);
    }

    #[test]
    fn test_widths() {
        let table = RawTable::from_rows(&[&["a", "b"], &["c", "d", "e"]]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.row_len(0), 2);
        assert_eq!(table.width(), 3);
        assert!(!table.is_empty());
    }
}
