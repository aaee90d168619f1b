use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, CerError>;

/// Error type covering the different failure cases that can occur when the
/// tool loads tables, aligns columns, or computes the error rate.
#[derive(Debug, Error)]
pub enum CerError {
    /// Wrapper for IO failures such as reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the CSV reader implementation.
    #[error("CSV read error: {0}")]
    CsvRead(#[from] csv::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a sheet does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a file carries an extension the loader does not recognise.
    #[error("unsupported file format '{0}': only .csv and .xlsx are supported")]
    UnsupportedFormat(PathBuf),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when a requested column is absent from a table.
    #[error("column '{0}' not found in table")]
    ColumnNotFound(String),

    /// Raised when hypothesis and reference sequences differ in length.
    #[error("length mismatch: {hypotheses} hypotheses vs {references} references")]
    LengthMismatch {
        hypotheses: usize,
        references: usize,
    },

    /// Raised when a cell holds a bare numeric value where text is required.
    #[error("invalid value in column '{column}': numeric cell '{value}' where text was expected")]
    InvalidValue { column: String, value: String },

    /// Raised when a value is empty or whitespace-only after normalization.
    #[error("empty value in column '{0}' after normalization")]
    EmptyValue(String),

    /// Raised when two tables share no data columns to compare.
    #[error("no matching data columns between the two tables")]
    NoMatchedColumns,

    /// Raised in strict mode when the reference corpus has no characters,
    /// leaving the error ratio undefined.
    #[error("reference corpus contains no characters, error rate is undefined")]
    EmptyReferenceCorpus,

    /// Raised by session operations that need both tables loaded.
    #[error("load both files first")]
    TablesNotLoaded,

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
