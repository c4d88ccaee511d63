// src/dataset/error.rs

use thiserror::Error;

/// Why a tabular text block (or one of its cells) was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Nothing left after normalization.
    #[error("no header found")]
    EmptyInput,

    /// The header had no column tokens, or a token is not `name[R,Type]`.
    #[error("invalid header format: `{token}`")]
    MalformedHeader { token: String },

    /// A data row does not have one cell per declared column.
    /// `row` is 1-based and counts data rows only.
    #[error("row size inconsistent with header: row {row} has {found} cells, expected {expected}")]
    RowArityMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A `Number` cell that does not parse, raised by the conversion stage.
    #[error("invalid number `{value}` in column `{column}` (row {row})")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}
