//! Height reconciliation across rows and merged spans.

use crate::geom::Abs;

use super::cells::CellKind;
use super::{Stage, Table};

impl Table {
    /// Reconcile per-cell content heights into final row and span
    /// heights.
    ///
    /// Runs before every page pass. The seeding of heights from content
    /// and the pushback of final heights into content happen only once,
    /// on the `Authoring` → `LaidOut` transition; the row and span
    /// passes are idempotent and re-run over the live rows after each
    /// page break.
    pub(crate) fn reconcile_heights(&mut self) {
        let first_run = self.stage == Stage::Authoring;
        if first_run {
            self.seed_heights();
        }
        self.even_out_rows();
        self.absorb_span_deficits();
        if first_run {
            self.push_back_heights();
            self.stage = Stage::LaidOut;
            tracing::debug!(height = self.total_height().to_pt(), "heights reconciled");
        }
    }

    /// Copy each anchor's measured content height into the grid.
    fn seed_heights(&mut self) {
        for row in self.first..self.rows {
            for col in 0..self.cols {
                let cell = self.cell_mut(row, col);
                if let CellKind::Anchor { rowspan, content: Some(content), .. } =
                    &cell.kind
                {
                    cell.height = content.height();
                    if *rowspan == 1 {
                        cell.selfheight = cell.height;
                    }
                }
            }
        }
    }

    /// Level every row to its tallest cell.
    ///
    /// Afterwards all cells of a row share the same `selfheight`, and
    /// single-row anchors mirror it into their total height.
    fn even_out_rows(&mut self) {
        for row in self.first..self.rows {
            let max = (0..self.cols)
                .map(|col| self.cell(row, col).selfheight)
                .fold(Abs::zero(), Abs::max);

            for col in 0..self.cols {
                let cell = self.cell_mut(row, col);
                cell.selfheight = max;
                if matches!(cell.kind, CellKind::Anchor { rowspan: 1, .. }) {
                    cell.height = cell.selfheight;
                }
            }
        }
    }

    /// Grow the trailing row of every span whose rows provide less room
    /// than its content needs.
    ///
    /// Spans are processed in row-major order, so a deficit absorbed
    /// into a row is visible to every span processed after it. Cells in
    /// the grown row gain the deficit exactly once; placeholders
    /// propagate it to their anchor's total height, except back into
    /// the very span being absorbed, whose height already accounts for
    /// its trailing row.
    fn absorb_span_deficits(&mut self) {
        let mut spans = vec![];
        for row in self.first..self.rows {
            for col in 0..self.cols {
                if let CellKind::Anchor { rowspan, .. } = self.cell(row, col).kind {
                    if rowspan > 1 {
                        spans.push((row, col, rowspan));
                    }
                }
            }
        }

        for (row, col, rowspan) in spans {
            let total: Abs = (row..row + rowspan)
                .map(|r| self.cell(r, col).selfheight)
                .sum();
            let height = self.cell(row, col).height;
            if total.fits(height) {
                continue;
            }

            let deficit = height - total;
            let last = row + rowspan - 1;
            tracing::trace!(
                row = last,
                deficit = deficit.to_pt(),
                "absorbing span deficit"
            );

            for x in 0..self.cols {
                let cell = self.cell_mut(last, x);
                cell.selfheight += deficit;
                let propagate = match cell.kind {
                    CellKind::Anchor { rowspan: 1, .. } => {
                        cell.height = cell.selfheight;
                        None
                    }
                    CellKind::Anchor { .. } => {
                        cell.height += deficit;
                        None
                    }
                    CellKind::Placeholder { anchor_row, anchor_col } => {
                        Some((anchor_row, anchor_col))
                    }
                };
                if let Some((r, c)) = propagate.filter(|&pos| pos != (row, col)) {
                    self.cell_mut(r, c).height += deficit;
                }
            }
        }
    }

    /// Tell each piece of content the exact height it will occupy.
    fn push_back_heights(&mut self) {
        for row in self.first..self.rows {
            for col in 0..self.cols {
                let cell = self.cell_mut(row, col);
                let height = cell.height;
                if let CellKind::Anchor { content: Some(content), .. } = &mut cell.kind {
                    content.set_height(height);
                }
            }
        }
    }
}
