//! The drawing-surface collaborator.

use serde::{Deserialize, Serialize};

use crate::geom::{Abs, Point, Scalar, Size};

/// A paged drawing surface.
///
/// The surface is owned by the surrounding document pipeline; a table
/// borrows it for the duration of one layout invocation. Its draw cursor
/// and current page are shared mutable state, so the table restores the
/// cursor around every individual cell render.
///
/// All coordinates are absolute page coordinates with the origin in the
/// top-left corner and y growing downwards.
pub trait Surface {
    /// The current draw cursor.
    fn cursor(&self) -> Point;

    /// Move the draw cursor.
    fn set_cursor(&mut self, pos: Point);

    /// The size of the usable page area.
    fn content_size(&self) -> Size;

    /// The top-left corner of the usable page area.
    fn page_start(&self) -> Point;

    /// The printable bottom of the current page.
    fn page_end_y(&self) -> Abs;

    /// Append a new page. The cursor is repositioned by the caller.
    fn add_page(&mut self);

    /// Draw a line segment between two points.
    fn line(&mut self, from: Point, to: Point);

    /// Draw a horizontal rule at height `y` from `x1` to `x2`.
    fn hrule(&mut self, x1: Abs, y: Abs, x2: Abs);

    /// Draw a vertical rule at `x` from `y1` down to `y2`.
    fn vrule(&mut self, x: Abs, y1: Abs, y2: Abs);

    /// Set the global line style for subsequent rules.
    fn set_line_style(&mut self, style: LineStyle);
}

/// How table rules are stroked.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LineStyle {
    /// The stroke pattern.
    pub kind: LineKind,
    /// The stroke thickness.
    pub thickness: Abs,
    /// The gray level, from `0.0` (black) to `1.0` (white).
    pub gray: Scalar,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            kind: LineKind::Straight,
            thickness: Abs::raw(0.1),
            gray: Scalar::ZERO,
        }
    }
}

/// A stroke pattern for table rules.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// A solid line.
    #[default]
    Straight,
    /// A dashed line.
    Dashed,
    /// A dotted line.
    Dotted,
}
