use super::*;

use serde::{Deserialize, Serialize};

/// A size in 2D.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// The width.
    pub width: Abs,
    /// The height.
    pub height: Abs,
}

impl Size {
    /// The zero size.
    pub const fn zero() -> Self {
        Self { width: Abs::zero(), height: Abs::zero() }
    }

    /// Create a new size from width and height.
    pub const fn new(width: Abs, height: Abs) -> Self {
        Self { width, height }
    }

    /// Whether the other size fits into this one (smaller width and
    /// height).
    pub fn fits(self, other: Self) -> bool {
        self.width.fits(other.width) && self.height.fits(other.height)
    }

    /// Convert to a point.
    pub fn to_point(self) -> Point {
        Point::new(self.width, self.height)
    }
}

impl Debug for Size {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Size({:?}, {:?})", self.width, self.height)
    }
}

impl Add for Size {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            width: self.width + other.width,
            height: self.height + other.height,
        }
    }
}

impl Neg for Size {
    type Output = Self;

    fn neg(self) -> Self {
        Self { width: -self.width, height: -self.height }
    }
}

sub_impl!(Size - Size -> Size);
assign_impl!(Size += Size);
assign_impl!(Size -= Size);
