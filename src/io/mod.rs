pub mod csv_read;
pub mod excel_read;

use std::path::Path;

use tracing::{debug, instrument};

use crate::error::{CerError, Result};
use crate::model::Table;

/// Loads a tabular file into a [`Table`], dispatching on the file extension.
///
/// Recognised extensions are `.csv` and `.xlsx`; anything else fails with
/// [`CerError::UnsupportedFormat`] before the file is touched.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(CerError::MissingInput(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let table = match extension.as_deref() {
        Some("csv") => csv_read::read_table(path)?,
        Some("xlsx") => excel_read::read_table(path)?,
        _ => return Err(CerError::UnsupportedFormat(path.to_path_buf())),
    };

    debug!(
        rows = table.row_count(),
        columns = table.columns().len(),
        "table loaded"
    );
    Ok(table)
}
