//! Error taxonomy for table operations

use thiserror::Error;

use crate::model::CellType;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised by table loading, saving, access, and arithmetic.
///
/// Structural failures (label mismatch, out-of-range indices, unknown
/// columns, division by zero) always abort the enclosing operation.
/// Per-cell coercion failures are the one category that batch writes
/// catch, report, and skip — see [`CoercionReport`].
#[derive(Debug, Error)]
pub enum TableError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("mismatching column labels: expected {expected:?}, found {found:?}")]
    LabelMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("number of values ({found}) does not match the expected count ({expected})")]
    RowCountMismatch { expected: usize, found: usize },

    #[error("row {index} is out of range for a table of {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("column '{0}' not found in the table")]
    ColumnNotFound(String),

    #[error("value in row {row} is 0, division by zero encountered")]
    DivisionByZero { row: usize },

    #[error("cannot coerce '{value}' to {target}")]
    TypeCoercion { value: String, target: CellType },

    #[error("column '{column}' has type {kind}, arithmetic needs a numeric column")]
    NonNumericColumn { column: String, kind: CellType },

    #[error("{0} contains no rows to derive column labels from")]
    EmptyPayload(String),

    #[error("file I/O failed")]
    Io(#[from] std::io::Error),

    #[error("delimited-text decoding failed")]
    Csv(#[from] csv::Error),

    #[error("object payload decoding failed")]
    Json(#[from] serde_json::Error),
}

/// One skipped cell from a batch write or column retyping.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionFailure {
    /// 0-based row index of the untouched cell.
    pub row: usize,
    /// Label of the column being written.
    pub column: String,
    /// Display rendering of the rejected value.
    pub value: String,
    /// Type the value failed to coerce to.
    pub target: CellType,
}

/// Outcome of a batch write: which cells were skipped and why.
///
/// A batch operation keeps going past individual coercion failures, so
/// callers inspect the report to learn about partial progress.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CoercionReport {
    pub failures: Vec<CoercionFailure>,
}

impl CoercionReport {
    /// True when every cell in the batch was written.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record(&mut self, row: usize, column: &str, value: String, target: CellType) {
        tracing::warn!(row, column, %value, %target, "cell left unmodified, coercion failed");
        self.failures.push(CoercionFailure {
            row,
            column: column.to_string(),
            value,
            target,
        });
    }
}
