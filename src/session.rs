//! Explicit state for the interactive surface.
//!
//! The interactive front-end (file pickers, table preview, compute button) is
//! presentation glue; everything it can do is exposed here as operations on a
//! [`Session`] value so each step is independently testable. Failures are
//! returned as [`CerError`] values and never terminate anything: the caller
//! renders them as a status message and the session stays usable.

use std::path::Path;

use tracing::{info, instrument};

use crate::error::{CerError, Result};
use crate::io::load_table;
use crate::metrics::{self, ComputeMode};
use crate::model::{CellValue, Table};

/// Number of leading rows shown when previewing a loaded table.
pub const PREVIEW_ROWS: usize = 5;

/// A borrowed view of a table's header and leading rows, ready to render.
#[derive(Debug)]
pub struct Preview<'a> {
    pub columns: &'a [String],
    pub rows: &'a [Vec<CellValue>],
}

/// Holds the two tables an interactive comparison works on.
#[derive(Debug, Default)]
pub struct Session {
    hypotheses: Option<Table>,
    references: Option<Table>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the hypothesis (prediction) table, replacing any previous one.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load_hypotheses(&mut self, path: &Path) -> Result<()> {
        self.hypotheses = Some(load_table(path)?);
        Ok(())
    }

    /// Loads the reference (ground-truth) table, replacing any previous one.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load_references(&mut self, path: &Path) -> Result<()> {
        self.references = Some(load_table(path)?);
        Ok(())
    }

    /// First [`PREVIEW_ROWS`] rows of the hypothesis table, if loaded.
    pub fn hypothesis_preview(&self) -> Option<Preview<'_>> {
        self.hypotheses.as_ref().map(preview)
    }

    /// First [`PREVIEW_ROWS`] rows of the reference table, if loaded.
    pub fn reference_preview(&self) -> Option<Preview<'_>> {
        self.references.as_ref().map(preview)
    }

    /// Re-sorts the loaded hypothesis table in place by the named column.
    pub fn sort_hypotheses_by(&mut self, column: &str) -> Result<()> {
        self.hypotheses
            .as_mut()
            .ok_or(CerError::TablesNotLoaded)?
            .sort_by_column(column)
    }

    /// Re-sorts the loaded reference table in place by the named column.
    pub fn sort_references_by(&mut self, column: &str) -> Result<()> {
        self.references
            .as_mut()
            .ok_or(CerError::TablesNotLoaded)?
            .sort_by_column(column)
    }

    /// Computes the CER over all matched data columns of the two loaded
    /// tables.
    ///
    /// Matched columns are concatenated column-major on both sides, numeric
    /// cells are rejected, the values are normalized, and the strict CER is
    /// computed over the resulting positionally aligned sequences. If the
    /// tables share no data columns the computation stops with
    /// [`CerError::NoMatchedColumns`] so the front-end can report "no
    /// comparable data" instead of a character-count failure.
    #[instrument(level = "info", skip_all)]
    pub fn compute_cer(&self) -> Result<f64> {
        let (hypotheses, references) = match (&self.hypotheses, &self.references) {
            (Some(hypotheses), Some(references)) => (hypotheses, references),
            _ => return Err(CerError::TablesNotLoaded),
        };

        let columns: Vec<String> = metrics::matched_columns(hypotheses, references)
            .into_iter()
            .collect();
        if columns.is_empty() {
            return Err(CerError::NoMatchedColumns);
        }
        info!(matched = columns.len(), "matched data columns");

        for column in &columns {
            metrics::ensure_text_values(column, &hypotheses.column(column)?)?;
            metrics::ensure_text_values(column, &references.column(column)?)?;
        }

        let hypothesis_values: Vec<String> = metrics::concatenate_columns(hypotheses, &columns)?
            .iter()
            .map(metrics::normalize)
            .collect();
        let reference_values: Vec<String> = metrics::concatenate_columns(references, &columns)?
            .iter()
            .map(metrics::normalize)
            .collect();

        metrics::cer(&hypothesis_values, &reference_values, ComputeMode::Strict)
    }
}

fn preview(table: &Table) -> Preview<'_> {
    Preview {
        columns: table.columns(),
        rows: table.head(PREVIEW_ROWS),
    }
}

/// Renders a CER value the way the interactive surface displays it.
pub fn format_cer(value: f64) -> String {
    format!("{value:.4}")
}
