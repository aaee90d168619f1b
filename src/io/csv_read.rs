use std::path::Path;

use crate::error::Result;
use crate::model::{CellValue, Table};

/// Reads a CSV file with a header row into a [`Table`].
///
/// Fields are typed at the boundary: empty fields become
/// [`CellValue::Missing`], fields that parse as a number become
/// [`CellValue::Number`], everything else stays text. The reader is flexible
/// so ragged rows are accepted and padded to the header width.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(parse_field).collect());
    }

    Ok(Table::new(columns, rows))
}

fn parse_field(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Missing
    } else if let Ok(number) = field.parse::<f64>() {
        // "nan" parses as a float NaN; treat it as a missing cell instead.
        if number.is_nan() {
            CellValue::Missing
        } else {
            CellValue::Number(number)
        }
    } else {
        CellValue::Text(field.to_string())
    }
}
