//! Error types raised while building or ranking a decision matrix.

use destinate_core::RankError;
use thiserror::Error;

/// Errors raised by [`DecisionMatrix::new`](crate::DecisionMatrix::new) and
/// [`topsis`](crate::topsis()).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopsisError {
    /// The matrix declared no criteria.
    #[error("decision matrix requires at least one column")]
    NoColumns,
    /// The matrix held no alternatives.
    #[error("decision matrix requires at least one row")]
    NoRows,
    /// A row had a different width from the column list.
    #[error("row {row} has {found} values but {expected} columns are defined")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Number of declared columns.
        expected: usize,
        /// Number of values in the row.
        found: usize,
    },
    /// A cell was `NaN` or infinite.
    #[error("cell ({row}, {column}) is not finite: {value}")]
    NonFiniteCell {
        /// Zero-based row index.
        row: usize,
        /// Label of the offending column.
        column: String,
        /// Rejected value.
        value: f64,
    },
    /// The weight slice did not match the column count.
    #[error("expected {expected} weights but received {found}")]
    WeightCountMismatch {
        /// Number of declared columns.
        expected: usize,
        /// Number of weights supplied.
        found: usize,
    },
    /// A weight was non-finite or negative.
    #[error("weight for column '{column}' must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Label of the offending column.
        column: String,
        /// Rejected value.
        value: f64,
    },
}

impl From<TopsisError> for RankError {
    fn from(error: TopsisError) -> Self {
        Self::Scoring {
            reason: error.to_string(),
        }
    }
}
