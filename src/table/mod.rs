//! Table construction and layout.

mod cells;
mod layouter;
mod lines;
mod rowspans;

pub use self::cells::CellRef;

use crate::content::Content;
use crate::diag::{LayoutError, LayoutResult};
use crate::geom::{Abs, Ratio, Sides};
use crate::surface::{LineStyle, Surface};

use self::cells::{Cell, CellKind};
use self::layouter::TableLayouter;

/// Where a table is in its lifecycle.
///
/// Content-height seeding and pushback are only legal during the single
/// `Authoring` → `LaidOut` transition; later reconciliations re-run only
/// the row and span passes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Stage {
    Authoring,
    LaidOut,
}

/// A grid of cells, laid out row by row onto a paged surface.
///
/// Cells are declared in strict row-major order, left to right and top
/// to bottom, either one at a time with [`allocate`](Self::allocate) or
/// as merged spans with [`allocate_span`](Self::allocate_span). Content
/// is attached to the handles those return. Once every slot of the
/// declared grid is filled, [`layout`](Self::layout) reconciles row
/// heights and renders the table, splitting it across page boundaries
/// as needed.
pub struct Table {
    rows: usize,
    cols: usize,
    width: Abs,
    colwidths: Vec<Ratio>,
    line_height: Abs,
    margin: Sides<Abs>,
    style: LineStyle,
    /// Row-major backing store; `None` slots have not been authored yet.
    slots: Vec<Option<Cell>>,
    /// The next free slot, or `None` once the grid is exhausted.
    cursor: Option<(usize, usize)>,
    /// The first live row. Pagination advances this index instead of
    /// truncating the backing store.
    first: usize,
    stage: Stage,
}

impl Table {
    /// Create an empty table.
    ///
    /// The width is clamped to the surface's usable content width, and
    /// the default [`LineStyle`] is applied to the surface once, here.
    /// Columns initially share the width equally.
    pub fn new(
        cols: usize,
        rows: usize,
        width: Abs,
        line_height: Abs,
        surface: &mut dyn Surface,
    ) -> Self {
        let width = width.min(surface.content_size().width);
        let style = LineStyle::default();
        surface.set_line_style(style);

        Self {
            rows,
            cols,
            width,
            colwidths: (0..cols).map(|_| Ratio::new(1.0 / cols as f64)).collect(),
            line_height,
            margin: Sides::splat(Abs::zero()),
            style,
            slots: std::iter::repeat_with(|| None).take(rows * cols).collect(),
            cursor: (rows * cols > 0).then_some((0, 0)),
            first: 0,
            stage: Stage::Authoring,
        }
    }

    /// The number of rows the table was declared with.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns the table was declared with.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The table's width on the page.
    pub fn width(&self) -> Abs {
        self.width
    }

    /// Allocate the next 1×1 cell at the authoring cursor.
    ///
    /// Its height is seeded with the current default line height. Fails
    /// with [`IndexOutOfRange`](LayoutError::IndexOutOfRange) once the
    /// grid is exhausted.
    pub fn allocate(&mut self) -> LayoutResult<CellRef> {
        let (row, col) = self.cursor.ok_or(LayoutError::IndexOutOfRange {
            row: self.rows,
            col: self.cols,
        })?;

        self.slots[row * self.cols + col] = Some(Cell::anchor(1, 1, self.line_height));
        self.advance_cursor();

        Ok(CellRef { row, col })
    }

    /// Allocate a merged cell spanning `w` columns and `h` rows from the
    /// authoring cursor.
    ///
    /// The extent is clamped to what remains of the grid; a span that
    /// clamps to nothing fails with
    /// [`InvalidSpan`](LayoutError::InvalidSpan). Every covered slot
    /// except the anchor becomes a placeholder referencing the anchor.
    pub fn allocate_span(&mut self, w: usize, h: usize) -> LayoutResult<CellRef> {
        if w == 1 && h == 1 {
            return self.allocate();
        }

        let (row, col) = self.cursor.ok_or(LayoutError::IndexOutOfRange {
            row: self.rows,
            col: self.cols,
        })?;

        let colspan = w.min(self.cols - col);
        let rowspan = h.min(self.rows - row);
        if colspan == 0 || rowspan == 0 {
            return Err(LayoutError::InvalidSpan { row, col, width: w, height: h });
        }

        self.slots[row * self.cols + col] =
            Some(Cell::anchor(rowspan, colspan, self.line_height));
        for r in row..row + rowspan {
            for c in col..col + colspan {
                if (r, c) == (row, col) {
                    continue;
                }
                self.slots[r * self.cols + c] =
                    Some(Cell::placeholder(row, col, self.line_height));
            }
        }
        self.advance_cursor();

        tracing::trace!(row, col, rowspan, colspan, "allocated span");
        Ok(CellRef { row, col })
    }

    /// Attach content to an allocated cell.
    ///
    /// The content's measured height seeds the cell's height; for a 1×1
    /// cell it seeds the row-local height as well.
    pub fn attach(&mut self, at: CellRef, content: Box<dyn Content>) {
        let measured = content.height();
        let cell = self.cell_mut(at.row, at.col);
        let CellKind::Anchor { rowspan, colspan, content: body } = &mut cell.kind else {
            return;
        };
        let single = *rowspan == 1 && *colspan == 1;
        *body = Some(content);
        cell.height = measured;
        if single {
            cell.selfheight = measured;
        }
    }

    /// Set the default line height used to seed cells allocated from now
    /// on.
    pub fn set_line_height(&mut self, line_height: Abs) {
        self.line_height = line_height;
    }

    /// Set the table's outer margin. Negative components are clamped to
    /// zero.
    pub fn set_margin(&mut self, margin: Sides<Abs>) {
        self.margin = margin.map(|side| side.max(Abs::zero()));
    }

    /// Replace the equal-split column widths with custom fractions.
    ///
    /// The fractions are normalized to sum to one. Fails with
    /// [`IndexOutOfRange`](LayoutError::IndexOutOfRange) if the count
    /// does not match the declared columns or the fractions cannot be
    /// normalized.
    pub fn set_col_fractions(&mut self, fractions: &[f64]) -> LayoutResult<()> {
        let sum: f64 = fractions.iter().sum();
        if fractions.len() != self.cols || !sum.is_finite() || sum <= 0.0 {
            return Err(LayoutError::IndexOutOfRange {
                row: 0,
                col: fractions.len(),
            });
        }

        self.colwidths = fractions.iter().map(|&f| Ratio::new(f / sum)).collect();
        Ok(())
    }

    /// The resolved width of the cell at the given position: the table
    /// width times the sum of the fractions its span covers. Placeholder
    /// slots resolve to zero.
    pub fn col_width(&self, row: usize, col: usize) -> LayoutResult<Abs> {
        if row >= self.rows || col >= self.cols {
            return Err(LayoutError::IndexOutOfRange { row, col });
        }
        let Some(cell) = self.slot(row, col) else {
            return Err(LayoutError::IndexOutOfRange { row, col });
        };

        Ok(match cell.kind {
            CellKind::Anchor { colspan, .. } => self.colwidths[col..col + colspan]
                .iter()
                .map(|&frac| frac.of(self.width))
                .sum(),
            CellKind::Placeholder { .. } => Abs::zero(),
        })
    }

    /// The summed height of all live rows.
    pub fn total_height(&self) -> Abs {
        (self.first..self.rows)
            .filter_map(|row| self.slot(row, 0))
            .map(|cell| cell.selfheight)
            .sum()
    }

    /// Lay the table out onto the surface, appending pages as rows
    /// overflow, and leave the surface cursor below the table.
    ///
    /// Fails with [`IncompleteGrid`](LayoutError::IncompleteGrid) if any
    /// declared slot has not been allocated. Progress across pages
    /// requires that a single row fits into the page's usable height.
    #[tracing::instrument(skip_all)]
    pub fn layout(&mut self, surface: &mut dyn Surface) -> LayoutResult<()> {
        self.validate_complete()?;
        TableLayouter::new(self, surface).layout()
    }

    /// Check that every slot of the declared grid has been filled.
    fn validate_complete(&self) -> LayoutResult<()> {
        let filled = self.slots.iter().filter(|slot| slot.is_some()).count();
        if filled != self.slots.len() {
            return Err(LayoutError::IncompleteGrid {
                filled,
                expected: self.slots.len(),
            });
        }
        Ok(())
    }

    /// Move the cursor to the next empty slot in row-major order, or to
    /// the exhaustion sentinel if none remains.
    fn advance_cursor(&mut self) {
        self.cursor = self
            .slots
            .iter()
            .position(Option::is_none)
            .map(|idx| (idx / self.cols, idx % self.cols));
    }

    /// Access a slot that may not have been allocated yet.
    fn slot(&self, row: usize, col: usize) -> Option<&Cell> {
        self.slots[row * self.cols + col].as_ref()
    }

    /// Access an allocated cell.
    #[track_caller]
    pub(crate) fn cell(&self, row: usize, col: usize) -> &Cell {
        self.slots[row * self.cols + col].as_ref().expect("cell is allocated")
    }

    /// Mutably access an allocated cell.
    #[track_caller]
    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        self.slots[row * self.cols + col].as_mut().expect("cell is allocated")
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::content::Content;
    use crate::diag::LayoutResult;
    use crate::geom::{Abs, Point, Size};
    use crate::surface::{LineStyle, Surface};

    use super::Table;

    /// A surface that answers geometry queries and swallows draw calls.
    pub struct StubSurface {
        cursor: Point,
    }

    impl StubSurface {
        pub fn new() -> Self {
            Self { cursor: Point::zero() }
        }
    }

    impl Surface for StubSurface {
        fn cursor(&self) -> Point {
            self.cursor
        }

        fn set_cursor(&mut self, pos: Point) {
            self.cursor = pos;
        }

        fn content_size(&self) -> Size {
            Size::new(Abs::pt(400.0), Abs::pt(800.0))
        }

        fn page_start(&self) -> Point {
            Point::zero()
        }

        fn page_end_y(&self) -> Abs {
            Abs::pt(800.0)
        }

        fn add_page(&mut self) {}

        fn line(&mut self, _from: Point, _to: Point) {}

        fn hrule(&mut self, _x1: Abs, _y: Abs, _x2: Abs) {}

        fn vrule(&mut self, _x: Abs, _y1: Abs, _y2: Abs) {}

        fn set_line_style(&mut self, _style: LineStyle) {}
    }

    /// Fixed content that records the height pushed back into it.
    pub struct Block {
        height: Abs,
        probe: Rc<Cell<Abs>>,
    }

    impl Content for Block {
        fn height(&self) -> Abs {
            self.height
        }

        fn set_height(&mut self, height: Abs) {
            self.height = height;
            self.probe.set(height);
        }

        fn render(&mut self, _surface: &mut dyn Surface) -> LayoutResult<()> {
            Ok(())
        }

        fn clear(&mut self) {
            self.height = Abs::zero();
        }
    }

    /// A block of the given measured height.
    pub fn block(height: f64) -> Box<Block> {
        Box::new(Block { height: Abs::pt(height), probe: Rc::default() })
    }

    /// A block plus a probe observing the height pushed back into it.
    pub fn probed_block(height: f64) -> (Box<Block>, Rc<Cell<Abs>>) {
        let probe = Rc::new(Cell::new(Abs::zero()));
        let block = Block { height: Abs::pt(height), probe: probe.clone() };
        (Box::new(block), probe)
    }

    /// A 300pt wide table with a 5pt line height over a stub surface.
    pub fn table(cols: usize, rows: usize) -> Table {
        Table::new(cols, rows, Abs::pt(300.0), Abs::pt(5.0), &mut StubSurface::new())
    }
}
