use std::cmp::Ordering;

use crate::error::{CerError, Result};

/// A single cell from a loaded table.
///
/// Spreadsheet and CSV sources mix textual, numeric, and absent cells freely,
/// so the variants are kept explicit and coercion to comparison text happens
/// in one place ([`crate::metrics::normalize`]) rather than implicitly at the
/// parsing boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Plain text cell.
    Text(String),
    /// Numeric cell, as parsed from the source file.
    Number(f64),
    /// Empty or absent cell.
    Missing,
}

impl CellValue {
    /// Converts the cell into its textual representation. Numbers take their
    /// decimal string form and missing cells the literal `"nan"`.
    pub fn coerce_to_text(&self) -> String {
        match self {
            CellValue::Text(value) => value.clone(),
            CellValue::Number(value) => value.to_string(),
            CellValue::Missing => "nan".to_string(),
        }
    }

    /// Whether the cell holds a bare numeric value.
    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    /// Total order used when sorting a table by column: missing cells sort
    /// before numbers, numbers before text.
    fn sort_key_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Missing, CellValue::Missing) => Ordering::Equal,
            (CellValue::Missing, _) => Ordering::Less,
            (_, CellValue::Missing) => Ordering::Greater,
            (CellValue::Number(lhs), CellValue::Number(rhs)) => {
                lhs.partial_cmp(rhs).unwrap_or(Ordering::Equal)
            }
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
            (CellValue::Text(lhs), CellValue::Text(rhs)) => lhs.cmp(rhs),
        }
    }
}

/// An in-memory table loaded from a CSV or XLSX file.
///
/// Column order and row order are preserved from the source. Every row holds
/// exactly one cell per column; short source rows are padded with
/// [`CellValue::Missing`] at load time. The first column is treated as a
/// row-identifier index during column matching, never as data.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Builds a table from a header row and cell rows, padding or truncating
    /// each row to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Missing);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Column names in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column names excluding the first (index) column.
    pub fn data_columns(&self) -> &[String] {
        if self.columns.is_empty() {
            &self.columns
        } else {
            &self.columns[1..]
        }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the values of the named column in row order.
    pub fn column(&self, name: &str) -> Result<Vec<CellValue>> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[index].clone()).collect())
    }

    /// Returns up to `limit` leading rows, for table previews.
    pub fn head(&self, limit: usize) -> &[Vec<CellValue>] {
        &self.rows[..self.rows.len().min(limit)]
    }

    /// Re-sorts the rows in place by the named column. The sort is stable so
    /// ties keep their source order.
    pub fn sort_by_column(&mut self, name: &str) -> Result<()> {
        let index = self.column_index(name)?;
        self.rows
            .sort_by(|lhs, rhs| lhs[index].sort_key_cmp(&rhs[index]));
        Ok(())
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| CerError::ColumnNotFound(name.to_string()))
    }
}
