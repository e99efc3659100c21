//! Cell storage.

use crate::content::Content;
use crate::geom::Abs;

/// A handle to an allocated cell.
///
/// Handles are only ever produced for span anchors, so content can only
/// land on a cell that owns its area.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CellRef {
    pub(crate) row: usize,
    pub(crate) col: usize,
}

impl CellRef {
    /// The cell's row.
    pub fn row(self) -> usize {
        self.row
    }

    /// The cell's column.
    pub fn col(self) -> usize {
        self.col
    }
}

/// One slot of the table grid.
///
/// A slot's own position is the index it occupies in the row-major
/// backing store; only the link from a placeholder back to its anchor
/// needs explicit coordinates.
pub(crate) struct Cell {
    /// Whether the slot originates a span or is covered by one.
    pub kind: CellKind,
    /// This row's share of the cell, kept identical across a row by
    /// reconciliation.
    pub selfheight: Abs,
    /// The total height across every row the cell spans. Authoritative
    /// on anchors only.
    pub height: Abs,
}

/// The role a slot plays in the grid.
pub(crate) enum CellKind {
    /// The top-left originating cell of a span (possibly 1×1). Owns the
    /// content.
    Anchor {
        /// The number of rows the span covers.
        rowspan: usize,
        /// The number of columns the span covers.
        colspan: usize,
        /// The attached content, if any.
        content: Option<Box<dyn Content>>,
    },
    /// A slot covered by a span but not its origin.
    Placeholder {
        /// The row of the owning anchor.
        anchor_row: usize,
        /// The column of the owning anchor.
        anchor_col: usize,
    },
}

impl Cell {
    /// Create an anchor slot seeded with the table's line height.
    pub fn anchor(rowspan: usize, colspan: usize, line_height: Abs) -> Self {
        Self {
            kind: CellKind::Anchor { rowspan, colspan, content: None },
            selfheight: line_height,
            height: line_height,
        }
    }

    /// Create a placeholder slot covered by the span anchored at
    /// (`anchor_row`, `anchor_col`).
    pub fn placeholder(anchor_row: usize, anchor_col: usize, line_height: Abs) -> Self {
        Self {
            kind: CellKind::Placeholder { anchor_row, anchor_col },
            selfheight: line_height,
            height: line_height,
        }
    }
}
