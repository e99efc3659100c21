//! Geometry resolution and row-by-row pagination.

use smallvec::SmallVec;

use crate::diag::LayoutResult;
use crate::geom::{Abs, Numeric, Point, Ratio};
use crate::surface::Surface;

use super::cells::CellKind;
use super::lines;
use super::Table;

/// Lays a table out onto its surface, page by page.
///
/// The surface is borrowed for the duration of one layout invocation.
/// The cursor position at entry is the table's base; it is restored
/// around every individual cell render and finally moved past the
/// table.
pub(crate) struct TableLayouter<'a> {
    table: &'a mut Table,
    surface: &'a mut dyn Surface,
}

/// The outcome of one page pass.
struct PageBreak {
    /// How many leading rows of the live view were finished for good.
    rows_consumed: usize,
    /// Whether the pass closed the page and layout continues on the
    /// next one.
    page_closed: bool,
}

impl<'a> TableLayouter<'a> {
    pub fn new(table: &'a mut Table, surface: &'a mut dyn Surface) -> Self {
        Self { table, surface }
    }

    /// Lay out all live rows, breaking pages as needed.
    ///
    /// Each iteration reconciles heights over the live view, attempts
    /// one page, and advances the view by the rows that page finished.
    pub fn layout(mut self) -> LayoutResult<()> {
        loop {
            self.table.reconcile_heights();
            let pass = self.layout_page()?;
            if !pass.page_closed {
                return Ok(());
            }
            self.table.first += pass.rows_consumed;
            if self.table.first == self.table.rows {
                return Ok(());
            }
        }
    }

    /// Attempt to render the live view onto the current page.
    fn layout_page(&mut self) -> LayoutResult<PageBreak> {
        let origin = self.surface.cursor();
        let end_y = self.surface.page_end_y();
        let tops = self.row_tops(origin);

        for (vi, row) in (self.table.first..self.table.rows).enumerate() {
            let y1 = tops[vi];
            let y2 = y1 + self.table.cell(row, 0).selfheight;
            if y1 < end_y && y2 > end_y {
                return self.overflow_row(origin, end_y, vi, row, &tops);
            }
            self.render_row(origin, row, y1)?;
        }

        self.finish_table(origin);
        Ok(PageBreak {
            rows_consumed: self.table.rows - self.table.first,
            page_closed: false,
        })
    }

    /// Render a fully fitting row: its necessary borders, then every
    /// cell's content at its resolved position.
    fn render_row(&mut self, origin: Point, row: usize, y: Abs) -> LayoutResult<()> {
        for col in 0..self.table.cols {
            let x = self.col_x(origin, col);

            if lines::has_hline(self.table, col, row) {
                let right = x + self.track_width(col);
                self.surface.line(Point::new(x, y), Point::new(right, y));
            }

            if lines::has_vline(self.table, col, row) {
                let bottom = y + self.table.cell(row, col).selfheight;
                self.surface.line(Point::new(x, y), Point::new(x, bottom));
            }

            let cell = self.table.cell_mut(row, col);
            let CellKind::Anchor { content: Some(content), .. } = &mut cell.kind else {
                continue;
            };
            self.surface.set_cursor(Point::new(x, y));
            content.render(self.surface)?;
            self.surface.set_cursor(origin);
        }
        Ok(())
    }

    /// Handle the first row whose bottom crosses the page's printable
    /// bottom.
    fn overflow_row(
        &mut self,
        origin: Point,
        end_y: Abs,
        vi: usize,
        row: usize,
        tops: &[Abs],
    ) -> LayoutResult<PageBreak> {
        // Even the first row of a fresh page does not fit: retry the
        // whole view from the top of a new page.
        if vi == 0 {
            tracing::debug!(row, "first row exceeds the page, retrying on a fresh one");
            self.surface.add_page();
            self.table.margin.top = Abs::zero();
            let start = self.surface.page_start();
            self.surface.set_cursor(start);
            return Ok(PageBreak { rows_consumed: 0, page_closed: true });
        }

        let y = tops[vi];
        let mut split_occurred = false;
        let mut row_fully_consumed = true;

        for col in 0..self.table.cols {
            let x = self.col_x(origin, col);

            let cell = self.table.cell_mut(row, col);
            let CellKind::Anchor { rowspan, content: Some(content), .. } = &mut cell.kind
            else {
                row_fully_consumed = false;
                continue;
            };
            let rowspan = *rowspan;
            if rowspan > 1 {
                row_fully_consumed = false;
            }

            // Let the content consume as much as fits and report back.
            let before = cell.height;
            self.surface.set_cursor(Point::new(x, y));
            content.render(self.surface)?;
            let after = content.height();
            self.surface.set_cursor(origin);

            if after == before {
                // An unchanged height means nothing is left to write.
                content.clear();
                cell.height = Abs::zero();
            } else {
                cell.height = after;
            }
            if rowspan == 1 {
                cell.selfheight = cell.height;
            }

            if before > after {
                split_occurred = true;
            }
            if !cell.height.is_zero() {
                row_fully_consumed = false;
            }

            if lines::has_vline(self.table, col, row) {
                self.surface.line(Point::new(x, y), Point::new(x, end_y));
            }
        }

        // A partial write needs the row's top borders above it.
        if split_occurred {
            for col in 0..self.table.cols {
                if lines::has_hline(self.table, col, row) {
                    let x = self.col_x(origin, col);
                    let right = x + self.track_width(col);
                    self.surface.line(Point::new(x, y), Point::new(right, y));
                }
            }
        }

        // Close off the visible portion of the table on this page.
        let x0 = self.col_x(origin, 0);
        self.surface.hrule(x0, end_y, x0 + self.table.width);
        self.surface.vrule(x0 + self.table.width, tops[0], end_y);

        self.surface.add_page();
        self.table.margin.top = Abs::zero();
        self.surface.set_line_style(self.table.style);
        let start = self.surface.page_start();
        self.surface.set_cursor(start);

        let rows_consumed = vi + usize::from(row_fully_consumed);
        tracing::debug!(
            row,
            rows_consumed,
            split = split_occurred,
            "page overflow, continuing on a new page"
        );
        Ok(PageBreak { rows_consumed, page_closed: true })
    }

    /// Draw the closing borders after the last row and move the cursor
    /// past the table.
    fn finish_table(&mut self, origin: Point) {
        let height = self.table.total_height();
        let x0 = self.col_x(origin, 0);
        let y0 = origin.y + self.table.margin.top;
        self.surface.hrule(x0, y0 + height, x0 + self.table.width);
        self.surface.vrule(x0 + self.table.width, y0, y0 + height);

        let start_x = self.surface.page_start().x;
        let below = y0 + height + self.table.margin.bottom;
        self.surface.set_cursor(Point::new(start_x, below));
    }

    /// Absolute top y coordinate of every live row, plus the table's
    /// end. Row heights are uniform within a row, so column 0 is read as
    /// the row's representative.
    fn row_tops(&self, origin: Point) -> SmallVec<[Abs; 16]> {
        let mut tops = SmallVec::new();
        let mut y = origin.y + self.table.margin.top;
        tops.push(y);
        for row in self.table.first..self.table.rows {
            y += self.table.cell(row, 0).selfheight;
            tops.push(y);
        }
        tops
    }

    /// Absolute left x coordinate of the given column.
    fn col_x(&self, origin: Point, col: usize) -> Abs {
        let before: Ratio = self.table.colwidths[..col].iter().sum();
        origin.x + self.table.margin.left + before.of(self.table.width)
    }

    /// The resolved width of a single column track.
    fn track_width(&self, col: usize) -> Abs {
        self.table.colwidths[col].of(self.table.width)
    }
}
