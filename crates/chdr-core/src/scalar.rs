//! The [`Scalar`] cost abstraction.
//!
//! Search costs are generic over any arithmetic scalar — unsigned and
//! signed integers for hop counts and corridor lengths, floats for
//! Euclidean estimates. Float keys have no total order, so ordered
//! containers compare through [`Scalar::key_cmp`], which treats
//! incomparable values as equal.

use std::cmp::Ordering;
use std::ops::{Add, Mul};

/// An arithmetic cost scalar usable as a search key.
pub trait Scalar:
    Copy + PartialOrd + PartialEq + Add<Output = Self> + Mul<Output = Self> + Send + Sync + 'static
{
    /// Additive identity.
    const ZERO: Self;
    /// One unit of distance.
    const ONE: Self;
    /// Largest representable value; the "unreachable" sentinel.
    const MAX: Self;

    /// Lossy conversion from a step count.
    fn from_usize(v: usize) -> Self;

    /// Square root, truncating for integer scalars.
    fn sqrt(self) -> Self;

    /// Total ordering over possibly-float keys; incomparable values
    /// (NaN) compare equal.
    #[inline]
    fn key_cmp(self, other: Self) -> Ordering {
        self.partial_cmp(&other).unwrap_or(Ordering::Equal)
    }
}

macro_rules! int_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn from_usize(v: usize) -> Self {
                v as $t
            }

            #[inline]
            fn sqrt(self) -> Self {
                (self as f64).sqrt() as $t
            }
        }
    )*};
}

macro_rules! float_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn from_usize(v: usize) -> Self {
                v as $t
            }

            #[inline]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }
        }
    )*};
}

int_scalar!(u8, u16, u32, u64, usize, i32, i64);
float_scalar!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_sqrt_truncates() {
        assert_eq!(10u32.sqrt(), 3);
        assert_eq!(16u32.sqrt(), 4);
    }

    #[test]
    fn key_cmp_is_total_for_floats() {
        assert_eq!(1.0f32.key_cmp(2.0), Ordering::Less);
        assert_eq!(f32::NAN.key_cmp(1.0), Ordering::Equal);
    }

    #[test]
    fn constants() {
        assert_eq!(u32::ZERO + u32::ONE, 1);
        assert_eq!(f64::ONE * 2.0, 2.0);
        assert!(u8::MAX == 255);
    }
}
