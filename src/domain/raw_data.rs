// ============================================================
// Layer 3 — RawData Domain Type
// ============================================================
// A table of string cells exactly as the importer read it.
// No column is interpreted yet: the preprocessor decides which
// column is the text and which is the label.
//
// An empty cell (after trimming) counts as a missing value.
//
// Reference: Rust Book §8 (Vectors and Strings)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawData {
    /// Column names in file order
    pub columns: Vec<String>,

    /// Rows of cells, each row as long as `columns`
    pub rows: Vec<Vec<String>>,
}

impl RawData {
    /// Build a table, padding short rows with empty cells and
    /// cutting long ones so every row matches the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Case-insensitive lookup of a column position
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.trim().eq_ignore_ascii_case(name))
    }

    /// True if any cell of the row is missing
    pub fn row_has_missing(row: &[String]) -> bool {
        row.iter().any(|cell| cell.trim().is_empty())
    }
}
