//! The cell-content collaborator.

use crate::diag::LayoutResult;
use crate::geom::Abs;
use crate::surface::Surface;

/// Measured content attached to a table cell.
///
/// The table never inspects what a piece of content is; it only
/// negotiates heights with it and asks it to draw itself. Text layout
/// and measurement happen entirely on the content's side.
pub trait Content {
    /// The height this content currently requires.
    ///
    /// Before rendering starts this is the measured height of the whole
    /// buffered content; after a partial render it is the height of
    /// whatever remains.
    fn height(&self) -> Abs;

    /// Inform the content of the exact height its cell will occupy.
    fn set_height(&mut self, height: Abs);

    /// Render as much buffered content as fits on the current page,
    /// starting at the surface's draw cursor.
    ///
    /// Consumed content is dropped from the buffer and the remaining
    /// height shrinks accordingly. Content that fits entirely may leave
    /// its height untouched; the table treats an unchanged height as
    /// fully drained.
    fn render(&mut self, surface: &mut dyn Surface) -> LayoutResult<()>;

    /// Discard any remaining buffered content.
    fn clear(&mut self);
}
