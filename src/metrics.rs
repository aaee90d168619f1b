//! Character Error Rate computation and the column alignment feeding it.
//!
//! CER is the aggregate character-level edit distance between hypothesis and
//! reference strings divided by the total reference character count across
//! all pairs. Comparison is per Unicode scalar value, never per byte, so
//! multi-byte scripts are measured the same way as ASCII.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::error::{CerError, Result};
use crate::model::{CellValue, Table};

/// Selects how [`cer`] treats pairs whose reference string is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeMode {
    /// Score every pair as given. Fails if the reference corpus ends up with
    /// zero characters, since the ratio is undefined there.
    Strict,
    /// Drop pairs whose reference is empty or whitespace-only before scoring.
    /// An empty reference makes the per-pair ratio undefined; dropping the
    /// pair keeps it out of both numerator and denominator. If nothing
    /// remains, the sentinel `1.0` (maximal error) is returned instead of
    /// invoking the distance computation on an empty batch. Treating
    /// "nothing comparable" as fully wrong is a deliberate conservative
    /// choice, not an algorithmic necessity.
    FilterEmptyReferences,
}

/// Converts a cell to its canonical comparison string: coerce to text,
/// lowercase, trim surrounding whitespace. Pure and total.
pub fn normalize(value: &CellValue) -> String {
    value.coerce_to_text().to_lowercase().trim().to_string()
}

/// Returns the column names present in both tables, excluding each table's
/// first column (treated as a row-identifier index, not data).
///
/// The result is a sorted set: the final scalar metric does not depend on
/// column order (both numerator and denominator are plain sums), but a
/// deterministic order keeps aggregation reproducible.
pub fn matched_columns(hypotheses: &Table, references: &Table) -> BTreeSet<String> {
    let reference_columns: BTreeSet<&String> = references.data_columns().iter().collect();
    hypotheses
        .data_columns()
        .iter()
        .filter(|column| reference_columns.contains(column))
        .cloned()
        .collect()
}

/// Flattens the named columns of a table into one sequence, column-major:
/// all values of the first named column in row order, then the next, and so
/// on. Fails with [`CerError::ColumnNotFound`] on an absent column.
pub fn concatenate_columns<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<Vec<CellValue>> {
    let mut values = Vec::with_capacity(columns.len() * table.row_count());
    for column in columns {
        values.extend(table.column(column.as_ref())?);
    }
    Ok(values)
}

/// Computes the aggregate Character Error Rate between positionally aligned
/// hypothesis and reference strings.
///
/// Both modes require equal-length inputs and fail with
/// [`CerError::LengthMismatch`] otherwise; silently pairing up to the shorter
/// sequence would misreport the metric without any signal to the caller.
#[instrument(level = "debug", skip_all, fields(pairs = hypotheses.len(), ?mode))]
pub fn cer(hypotheses: &[String], references: &[String], mode: ComputeMode) -> Result<f64> {
    if hypotheses.len() != references.len() {
        return Err(CerError::LengthMismatch {
            hypotheses: hypotheses.len(),
            references: references.len(),
        });
    }

    let pairs: Vec<(&str, &str)> = match mode {
        ComputeMode::Strict => hypotheses
            .iter()
            .zip(references)
            .map(|(hyp, reference)| (hyp.as_str(), reference.as_str()))
            .collect(),
        ComputeMode::FilterEmptyReferences => hypotheses
            .iter()
            .zip(references)
            .filter(|(_, reference)| !reference.trim().is_empty())
            .map(|(hyp, reference)| (hyp.as_str(), reference.as_str()))
            .collect(),
    };

    if pairs.is_empty() && mode == ComputeMode::FilterEmptyReferences {
        debug!("no scorable pairs after filtering, returning sentinel");
        return Ok(1.0);
    }

    edit_distance_ratio(&pairs)
}

/// Rejects bare numeric cells before they can reach the metric.
///
/// A numeric cell in a text column usually means an unconverted value (a
/// spreadsheet number, or a missing-value placeholder parsed as a float);
/// scoring its decimal rendering against text would silently skew the rate.
pub fn ensure_text_values(column: &str, values: &[CellValue]) -> Result<()> {
    for value in values {
        if value.is_number() {
            return Err(CerError::InvalidValue {
                column: column.to_string(),
                value: value.coerce_to_text(),
            });
        }
    }
    Ok(())
}

/// Rejects values that are empty or whitespace-only after normalization.
pub fn ensure_no_empty_values(column: &str, values: &[String]) -> Result<()> {
    if values.iter().any(|value| value.trim().is_empty()) {
        return Err(CerError::EmptyValue(column.to_string()));
    }
    Ok(())
}

/// Aggregate character-level edit distance across all pairs divided by the
/// total reference character count.
fn edit_distance_ratio(pairs: &[(&str, &str)]) -> Result<f64> {
    let mut total_edits = 0usize;
    let mut total_reference_chars = 0usize;

    for (hypothesis, reference) in pairs {
        let hyp_chars: Vec<char> = hypothesis.chars().collect();
        let ref_chars: Vec<char> = reference.chars().collect();
        total_edits += levenshtein_chars(&hyp_chars, &ref_chars);
        total_reference_chars += ref_chars.len();
    }

    if total_reference_chars == 0 {
        return Err(CerError::EmptyReferenceCorpus);
    }

    Ok(total_edits as f64 / total_reference_chars as f64)
}

/// Character-level Levenshtein edit distance with O(min(m,n)) memory.
fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = short.len();
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];

    for i in 1..=long.len() {
        curr[0] = i;
        for j in 1..=m {
            let cost = if long[i - 1] == short[j - 1] { 0 } else { 1 };
            let deletion = prev[j] + 1;
            let insertion = curr[j - 1] + 1;
            let substitution = prev[j - 1] + cost;
            curr[j] = deletion.min(insertion).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[m]
}
