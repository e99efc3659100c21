//! Diagnostics.

use std::fmt::{self, Display, Formatter};

/// The result type for table layout and all its passes.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// A fatal precondition violation.
///
/// All of these are authoring errors detected synchronously before any
/// drawing occurs; none of them is retryable. Page overflow is normal
/// control flow and never surfaces here.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LayoutError {
    /// A requested merge resolves to zero width or height after clamping
    /// to the remaining grid.
    InvalidSpan {
        /// The row the span was anchored at.
        row: usize,
        /// The column the span was anchored at.
        col: usize,
        /// The requested width in columns.
        width: usize,
        /// The requested height in rows.
        height: usize,
    },
    /// Layout was invoked before every slot in the declared grid was
    /// filled.
    IncompleteGrid {
        /// How many slots have been allocated.
        filled: usize,
        /// How many slots the declared grid has.
        expected: usize,
    },
    /// A query or allocation used a row or column outside the table's
    /// declared bounds.
    IndexOutOfRange {
        /// The offending row.
        row: usize,
        /// The offending column.
        col: usize,
    },
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidSpan { row, col, width, height } => write!(
                f,
                "span of {width}x{height} cells at row {row}, column {col} \
                 covers no area"
            ),
            Self::IncompleteGrid { filled, expected } => write!(
                f,
                "grid is incomplete: {filled} of {expected} cells allocated"
            ),
            Self::IndexOutOfRange { row, col } => {
                write!(f, "row {row}, column {col} is outside the table")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
