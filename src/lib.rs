//! Table layout and pagination for paged report documents.
//!
//! This crate is the table engine of a report generation pipeline: given
//! a declared grid of cells, some merged across rows and columns and
//! each holding externally measured content, it computes final row
//! heights, resolves cell geometry on the page, draws exactly the
//! border lines a merge leaves visible, and splits the table across
//! page boundaries when content overflows the printable area, resuming
//! the split cells on the next page without loss or duplication.
//!
//! The engine draws through two collaborator seams it does not own: a
//! [`Surface`] for the page, cursor and line primitives, and a
//! [`Content`] implementation per cell for the actual cell bodies.
//! Everything else, from text measurement to byte-level document
//! encoding, lives on the far side of those traits.
//!
//! A table is built in strict row-major order and laid out once:
//!
//! ```ignore
//! let mut table = Table::new(3, 2, Abs::pt(400.0), Abs::pt(14.0), &mut surface);
//! let cell = table.allocate()?;
//! table.attach(cell, Box::new(paragraph));
//! let wide = table.allocate_span(2, 1)?;
//! table.attach(wide, Box::new(banner));
//! // ... fill the remaining slots ...
//! table.layout(&mut surface)?;
//! ```

pub mod diag;
pub mod geom;

mod content;
mod surface;
mod table;

pub use self::content::Content;
pub use self::surface::{LineKind, LineStyle, Surface};
pub use self::table::{CellRef, Table};
