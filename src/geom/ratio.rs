use super::*;

use serde::{Deserialize, Serialize};

/// A ratio of a whole.
///
/// Written as a fraction here: a column that takes half the table width
/// is `Ratio::new(0.5)`.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Ratio(Scalar);

impl Ratio {
    /// A ratio of `0%` represented as `0.0`.
    #[inline]
    pub const fn zero() -> Self {
        Self(Scalar::ZERO)
    }

    /// A ratio of `100%` represented as `1.0`.
    #[inline]
    pub const fn one() -> Self {
        Self(Scalar::ONE)
    }

    /// Create a new ratio from a value, where `1.0` means `100%`.
    #[inline]
    pub const fn new(ratio: f64) -> Self {
        Self(Scalar::new(ratio))
    }

    /// Get the underlying ratio.
    #[inline]
    pub const fn get(self) -> f64 {
        self.0.get()
    }

    /// Whether the ratio is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == Scalar::ZERO
    }

    /// Whether the ratio is one.
    #[inline]
    pub fn is_one(self) -> bool {
        (self.get() - 1.0).abs() < 1e-6
    }

    /// Return the ratio of the given `whole`.
    #[inline]
    pub fn of<T: Numeric>(self, whole: T) -> T {
        let resolved = whole * self.get();
        if resolved.is_finite() {
            resolved
        } else {
            T::zero()
        }
    }
}

impl Debug for Ratio {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", round_2(100.0 * self.get()))
    }
}

impl Neg for Ratio {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Add for Ratio {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

sub_impl!(Ratio - Ratio -> Ratio);

impl Mul for Ratio {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }
}

impl Mul<f64> for Ratio {
    type Output = Self;

    #[inline]
    fn mul(self, other: f64) -> Self {
        Self(self.0 * other)
    }
}

impl Mul<Ratio> for f64 {
    type Output = Ratio;

    #[inline]
    fn mul(self, other: Ratio) -> Ratio {
        other * self
    }
}

impl Div<f64> for Ratio {
    type Output = Self;

    #[inline]
    fn div(self, other: f64) -> Self {
        Self(self.0 / other)
    }
}

impl Div for Ratio {
    type Output = f64;

    #[inline]
    fn div(self, other: Self) -> f64 {
        self.get() / other.get()
    }
}

assign_impl!(Ratio += Ratio);
assign_impl!(Ratio -= Ratio);
assign_impl!(Ratio *= f64);
assign_impl!(Ratio /= f64);

impl Sum for Ratio {
    #[inline]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|r| r.0).sum())
    }
}

impl<'a> Sum<&'a Self> for Ratio {
    #[inline]
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        Self(iter.map(|r| r.0).sum())
    }
}
