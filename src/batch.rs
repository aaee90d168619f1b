//! Batch comparison pipeline behind the command line interface.

use std::path::Path;

use tracing::{info, instrument};

use crate::error::{CerError, Result};
use crate::io::load_table;
use crate::metrics::{self, ComputeMode};

/// Loads both tables, validates the named columns, and computes the strict
/// CER over them.
///
/// Validation order matters: lengths are compared first, then raw cells are
/// checked for bare numbers. The numeric check runs on the raw values because
/// after normalization a numeric cell is indistinguishable from ordinary
/// text. Empty values are checked last, on the normalized strings, so cells
/// that trim down to nothing are caught too.
#[instrument(
    level = "info",
    skip_all,
    fields(predictions = %predictions.display(), groundtruth = %groundtruth.display())
)]
pub fn compute_batch(
    predictions: &Path,
    groundtruth: &Path,
    prediction_column: &str,
    groundtruth_column: &str,
) -> Result<f64> {
    let predictions_table = load_table(predictions)?;
    let groundtruth_table = load_table(groundtruth)?;

    let predictions = predictions_table.column(prediction_column)?;
    let groundtruth = groundtruth_table.column(groundtruth_column)?;

    if predictions.len() != groundtruth.len() {
        return Err(CerError::LengthMismatch {
            hypotheses: predictions.len(),
            references: groundtruth.len(),
        });
    }

    metrics::ensure_text_values(prediction_column, &predictions)?;
    metrics::ensure_text_values(groundtruth_column, &groundtruth)?;

    let predictions: Vec<String> = predictions.iter().map(metrics::normalize).collect();
    let groundtruth: Vec<String> = groundtruth.iter().map(metrics::normalize).collect();

    metrics::ensure_no_empty_values(prediction_column, &predictions)?;
    metrics::ensure_no_empty_values(groundtruth_column, &groundtruth)?;

    let cer = metrics::cer(&predictions, &groundtruth, ComputeMode::Strict)?;
    info!(pairs = predictions.len(), cer, "batch computation finished");
    Ok(cer)
}
