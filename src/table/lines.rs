//! Border policy: which cell edges are visually necessary.

use super::cells::CellKind;
use super::Table;

/// Whether the cell at (`row`, `col`) draws its left edge.
///
/// Every cell in the first column does, and every span anchor bounds
/// its own merge. Of the placeholders, only those directly below their
/// anchor draw: they continue the span's left boundary. Everything else
/// is interior to a merge and stays blank.
pub(crate) fn has_vline(table: &Table, col: usize, row: usize) -> bool {
    if col == 0 {
        return true;
    }
    match table.cell(row, col).kind {
        CellKind::Anchor { .. } => true,
        CellKind::Placeholder { anchor_col, .. } => col == anchor_col,
    }
}

/// Whether the cell at (`row`, `col`) draws its top edge.
///
/// The symmetric rule: the first live row always does, anchors bound
/// their merge, and placeholders directly right of their anchor
/// continue the span's top boundary.
pub(crate) fn has_hline(table: &Table, col: usize, row: usize) -> bool {
    if row == table.first {
        return true;
    }
    match table.cell(row, col).kind {
        CellKind::Anchor { .. } => true,
        CellKind::Placeholder { anchor_row, .. } => row == anchor_row,
    }
}
