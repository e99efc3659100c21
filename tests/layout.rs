//! Integration tests driving the full layout pipeline against a
//! recording surface.

use std::cell::RefCell;
use std::rc::Rc;

use pagegrid::diag::LayoutResult;
use pagegrid::geom::{Abs, Numeric, Point, Sides, Size};
use pagegrid::{Content, LineStyle, Surface, Table};

/// Every drawing operation a layout run performs, in order. Coordinates
/// are plain points for easy comparison.
#[derive(Debug, Clone, PartialEq)]
enum Op {
    Line(f64, f64, f64, f64),
    HRule(f64, f64, f64),
    VRule(f64, f64, f64),
    Page,
    Style,
}

/// A surface with a 200×100 usable area starting at (10, 10).
struct RecordingSurface {
    cursor: Point,
    ops: Vec<Op>,
    pages: usize,
}

impl RecordingSurface {
    fn new() -> Self {
        Self {
            cursor: Point::new(Abs::pt(10.0), Abs::pt(10.0)),
            ops: vec![],
            pages: 1,
        }
    }
}

impl Surface for RecordingSurface {
    fn cursor(&self) -> Point {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Point) {
        self.cursor = pos;
    }

    fn content_size(&self) -> Size {
        Size::new(Abs::pt(200.0), Abs::pt(100.0))
    }

    fn page_start(&self) -> Point {
        Point::new(Abs::pt(10.0), Abs::pt(10.0))
    }

    fn page_end_y(&self) -> Abs {
        Abs::pt(110.0)
    }

    fn add_page(&mut self) {
        self.pages += 1;
        self.ops.push(Op::Page);
    }

    fn line(&mut self, from: Point, to: Point) {
        self.ops.push(Op::Line(
            from.x.to_pt(),
            from.y.to_pt(),
            to.x.to_pt(),
            to.y.to_pt(),
        ));
    }

    fn hrule(&mut self, x1: Abs, y: Abs, x2: Abs) {
        self.ops.push(Op::HRule(x1.to_pt(), y.to_pt(), x2.to_pt()));
    }

    fn vrule(&mut self, x: Abs, y1: Abs, y2: Abs) {
        self.ops.push(Op::VRule(x.to_pt(), y1.to_pt(), y2.to_pt()));
    }

    fn set_line_style(&mut self, _style: LineStyle) {
        self.ops.push(Op::Style);
    }
}

/// Render events as (x, y, rendered height) triples.
type RenderLog = Rc<RefCell<Vec<(f64, f64, f64)>>>;

/// Text-like content: consumes as much of its buffer as fits on the
/// current page and tracks what remains.
struct TextBlock {
    height: Abs,
    log: RenderLog,
}

impl TextBlock {
    fn new(height: f64, log: &RenderLog) -> Box<Self> {
        Box::new(Self { height: Abs::pt(height), log: log.clone() })
    }
}

impl Content for TextBlock {
    fn height(&self) -> Abs {
        self.height
    }

    fn set_height(&mut self, height: Abs) {
        self.height = height;
    }

    fn render(&mut self, surface: &mut dyn Surface) -> LayoutResult<()> {
        let pos = surface.cursor();
        let avail = surface.page_end_y() - pos.y;
        if avail.fits(self.height) {
            if !self.height.is_zero() {
                self.log.borrow_mut().push((
                    pos.x.to_pt(),
                    pos.y.to_pt(),
                    self.height.to_pt(),
                ));
            }
        } else {
            let took = avail.max(Abs::zero());
            if !took.is_zero() {
                self.log.borrow_mut().push((pos.x.to_pt(), pos.y.to_pt(), took.to_pt()));
                self.height -= took;
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.height = Abs::zero();
    }
}

/// Stamp-like content: draws up to its height but never updates it, the
/// way content that wrote everything reports an unchanged height.
struct Stamp {
    height: Abs,
    log: RenderLog,
}

impl Stamp {
    fn new(height: f64, log: &RenderLog) -> Box<Self> {
        Box::new(Self { height: Abs::pt(height), log: log.clone() })
    }
}

impl Content for Stamp {
    fn height(&self) -> Abs {
        self.height
    }

    fn set_height(&mut self, height: Abs) {
        self.height = height;
    }

    fn render(&mut self, surface: &mut dyn Surface) -> LayoutResult<()> {
        let pos = surface.cursor();
        let avail = (surface.page_end_y() - pos.y).max(Abs::zero());
        let drawn = avail.min(self.height);
        if !drawn.is_zero() {
            self.log.borrow_mut().push((pos.x.to_pt(), pos.y.to_pt(), drawn.to_pt()));
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.height = Abs::zero();
    }
}

#[test]
fn test_width_clamps_to_surface() {
    let mut surface = RecordingSurface::new();
    let table = Table::new(2, 1, Abs::pt(500.0), Abs::pt(10.0), &mut surface);
    assert_eq!(table.width(), Abs::pt(200.0));
}

#[test]
fn test_single_page_layout() {
    let log = RenderLog::default();
    let mut surface = RecordingSurface::new();
    let mut table = Table::new(2, 2, Abs::pt(200.0), Abs::pt(5.0), &mut surface);
    table.set_margin(Sides::new(
        Abs::pt(10.0),
        Abs::pt(10.0),
        Abs::zero(),
        Abs::pt(5.0),
    ));
    for height in [10.0, 20.0, 15.0, 5.0] {
        let cell = table.allocate().unwrap();
        table.attach(cell, TextBlock::new(height, &log));
    }
    table.layout(&mut surface).unwrap();

    // Rows level to 20pt and 15pt; the table starts at the margined
    // origin (20, 20).
    assert_eq!(
        surface.ops,
        vec![
            Op::Style,
            Op::Line(20.0, 20.0, 120.0, 20.0),
            Op::Line(20.0, 20.0, 20.0, 40.0),
            Op::Line(120.0, 20.0, 220.0, 20.0),
            Op::Line(120.0, 20.0, 120.0, 40.0),
            Op::Line(20.0, 40.0, 120.0, 40.0),
            Op::Line(20.0, 40.0, 20.0, 55.0),
            Op::Line(120.0, 40.0, 220.0, 40.0),
            Op::Line(120.0, 40.0, 120.0, 55.0),
            Op::HRule(20.0, 55.0, 220.0),
            Op::VRule(220.0, 20.0, 55.0),
        ],
    );

    // Every cell stretched to its row height.
    assert_eq!(
        log.borrow().as_slice(),
        &[
            (20.0, 20.0, 20.0),
            (120.0, 20.0, 20.0),
            (20.0, 40.0, 15.0),
            (120.0, 40.0, 15.0),
        ],
    );

    assert_eq!(surface.pages, 1);
    assert_eq!(table.total_height(), Abs::pt(35.0));
    // The cursor ends below the table plus its bottom margin.
    assert_eq!(surface.cursor, Point::new(Abs::pt(10.0), Abs::pt(60.0)));
}

#[test]
fn test_split_row_resumes_on_next_page() {
    let log = RenderLog::default();
    let mut surface = RecordingSurface::new();
    let mut table = Table::new(2, 3, Abs::pt(180.0), Abs::pt(10.0), &mut surface);
    for height in [40.0, 10.0, 50.0, 20.0, 40.0] {
        let cell = table.allocate().unwrap();
        table.attach(cell, TextBlock::new(height, &log));
    }
    let last = table.allocate().unwrap();
    table.attach(last, Stamp::new(8.0, &log));
    table.layout(&mut surface).unwrap();

    // Rows reconcile to 40pt, 50pt and 40pt; the third row crosses the
    // printable bottom at 110pt and splits.
    assert_eq!(
        surface.ops,
        vec![
            Op::Style,
            // First page, first two rows.
            Op::Line(10.0, 10.0, 100.0, 10.0),
            Op::Line(10.0, 10.0, 10.0, 50.0),
            Op::Line(100.0, 10.0, 190.0, 10.0),
            Op::Line(100.0, 10.0, 100.0, 50.0),
            Op::Line(10.0, 50.0, 100.0, 50.0),
            Op::Line(10.0, 50.0, 10.0, 100.0),
            Op::Line(100.0, 50.0, 190.0, 50.0),
            Op::Line(100.0, 50.0, 100.0, 100.0),
            // The split row's verticals run down to the printable
            // bottom.
            Op::Line(10.0, 100.0, 10.0, 110.0),
            Op::Line(100.0, 100.0, 100.0, 110.0),
            // A partial write happened, so the row's top borders are
            // drawn.
            Op::Line(10.0, 100.0, 100.0, 100.0),
            Op::Line(100.0, 100.0, 190.0, 100.0),
            // The visible portion is closed off.
            Op::HRule(10.0, 110.0, 190.0),
            Op::VRule(190.0, 10.0, 110.0),
            Op::Page,
            Op::Style,
            // Second page, the retained row at the fresh origin.
            Op::Line(10.0, 10.0, 100.0, 10.0),
            Op::Line(10.0, 10.0, 10.0, 40.0),
            Op::Line(100.0, 10.0, 190.0, 10.0),
            Op::Line(100.0, 10.0, 100.0, 40.0),
            Op::HRule(10.0, 40.0, 190.0),
            Op::VRule(190.0, 10.0, 40.0),
        ],
    );

    // Concatenating the split cell's renders reconstructs its full
    // height: 10pt on the first page, the remaining 30pt on the second,
    // resumed at the table's left edge at the new page's top.
    assert_eq!(
        log.borrow().as_slice(),
        &[
            (10.0, 10.0, 40.0),
            (100.0, 10.0, 40.0),
            (10.0, 50.0, 50.0),
            (100.0, 50.0, 50.0),
            (10.0, 100.0, 10.0),
            (100.0, 100.0, 10.0),
            (10.0, 10.0, 30.0),
        ],
    );

    assert_eq!(surface.pages, 2);
    assert_eq!(surface.cursor, Point::new(Abs::pt(10.0), Abs::pt(40.0)));
}

#[test]
fn test_first_row_retries_on_fresh_page() {
    let log = RenderLog::default();
    let mut surface = RecordingSurface::new();
    surface.set_cursor(Point::new(Abs::pt(10.0), Abs::pt(95.0)));
    let mut table = Table::new(1, 1, Abs::pt(100.0), Abs::pt(10.0), &mut surface);
    let cell = table.allocate().unwrap();
    table.attach(cell, TextBlock::new(50.0, &log));
    table.layout(&mut surface).unwrap();

    // Nothing was cut at the old page's bottom; the row rendered whole
    // on the fresh page.
    assert_eq!(
        surface.ops,
        vec![
            Op::Style,
            Op::Page,
            Op::Line(10.0, 10.0, 110.0, 10.0),
            Op::Line(10.0, 10.0, 10.0, 60.0),
            Op::HRule(10.0, 60.0, 110.0),
            Op::VRule(110.0, 10.0, 60.0),
        ],
    );
    assert_eq!(log.borrow().as_slice(), &[(10.0, 10.0, 50.0)]);
    assert_eq!(surface.pages, 2);
    assert_eq!(surface.cursor, Point::new(Abs::pt(10.0), Abs::pt(60.0)));
}

#[test]
fn test_merged_cell_borders_and_height() {
    let log = RenderLog::default();
    let mut surface = RecordingSurface::new();
    let mut table = Table::new(2, 2, Abs::pt(200.0), Abs::pt(5.0), &mut surface);
    let span = table.allocate_span(2, 2).unwrap();
    table.attach(span, TextBlock::new(30.0, &log));
    table.layout(&mut surface).unwrap();

    // The merge needs 30pt; its trailing row absorbs the 20pt deficit.
    // No line is drawn interior to the merge.
    assert_eq!(
        surface.ops,
        vec![
            Op::Style,
            Op::Line(10.0, 10.0, 110.0, 10.0),
            Op::Line(10.0, 10.0, 10.0, 15.0),
            Op::Line(110.0, 10.0, 210.0, 10.0),
            Op::Line(10.0, 15.0, 10.0, 40.0),
            Op::HRule(10.0, 40.0, 210.0),
            Op::VRule(210.0, 10.0, 40.0),
        ],
    );
    assert_eq!(log.borrow().as_slice(), &[(10.0, 10.0, 30.0)]);
    assert_eq!(table.total_height(), Abs::pt(30.0));
    assert_eq!(surface.cursor, Point::new(Abs::pt(10.0), Abs::pt(40.0)));
}
