use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{CerError, Result};
use crate::model::{CellValue, Table};

/// Reads the first worksheet of an XLSX workbook into a [`Table`].
///
/// The first row of the sheet is taken as the header row. Cell variants are
/// mapped onto the [`CellValue`] union so numeric cells stay numeric until
/// normalization decides how to render them.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CerError::InvalidWorkbook("workbook has no sheets".into()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| CerError::InvalidWorkbook(format!("missing sheet '{sheet_name}'")))?
        .map_err(CerError::from)?;

    let mut rows_iter = range.rows();
    let columns: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row.iter().map(header_to_string).collect(),
        None => Vec::new(),
    };

    let rows: Vec<Vec<CellValue>> = rows_iter
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    Ok(Table::new(columns, rows))
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Text(value.to_string()),
        DataType::Empty => CellValue::Missing,
        other => CellValue::Text(other.to_string()),
    }
}

fn header_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
