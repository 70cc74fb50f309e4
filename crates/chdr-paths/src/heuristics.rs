//! Distance heuristics over same-dimensional coordinates.
//!
//! All of them are overflow-safe on unsigned coordinates: per-axis
//! differences are taken with `abs_diff` before any squaring or summing.
//!
//! [`manhattan`] is the admissible estimate for axis-only movement,
//! [`chebyshev`] for searches that may step diagonally (jump-point
//! searches), and [`euclidean`]/[`sqr_euclidean`] serve weighted or
//! best-first orderings.

use chdr_core::{Coord, Scalar};

/// Sum of per-axis differences.
#[inline]
#[must_use]
pub fn manhattan<const K: usize, S: Scalar>(a: Coord<K>, b: Coord<K>) -> S {
    let mut total = 0;
    for i in 0..K {
        total += a[i].abs_diff(b[i]);
    }
    S::from_usize(total)
}

/// Largest per-axis difference.
#[inline]
#[must_use]
pub fn chebyshev<const K: usize, S: Scalar>(a: Coord<K>, b: Coord<K>) -> S {
    let mut max = 0;
    for i in 0..K {
        max = max.max(a[i].abs_diff(b[i]));
    }
    S::from_usize(max)
}

/// Sum of squared per-axis differences.
#[inline]
#[must_use]
pub fn sqr_euclidean<const K: usize, S: Scalar>(a: Coord<K>, b: Coord<K>) -> S {
    let mut total = 0;
    for i in 0..K {
        let d = a[i].abs_diff(b[i]);
        total += d * d;
    }
    S::from_usize(total)
}

/// Euclidean distance; truncates for integer scalars.
#[inline]
#[must_use]
pub fn euclidean<const K: usize, S: Scalar>(a: Coord<K>, b: Coord<K>) -> S {
    sqr_euclidean::<K, S>(a, b).sqrt()
}

/// The zero heuristic, turning best-first searches into uniform-cost
/// ones.
#[inline]
#[must_use]
pub fn zero<const K: usize, S: Scalar>(_a: Coord<K>, _b: Coord<K>) -> S {
    S::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_sums_axis_differences() {
        assert_eq!(manhattan::<2, u32>([0, 0], [2, 2]), 4);
        assert_eq!(manhattan::<2, u32>([2, 2], [0, 0]), 4);
        assert_eq!(manhattan::<3, u32>([1, 2, 3], [3, 2, 1]), 4);
    }

    #[test]
    fn chebyshev_takes_the_largest_axis() {
        assert_eq!(chebyshev::<2, u32>([0, 0], [4, 2]), 4);
        assert_eq!(chebyshev::<2, u32>([4, 2], [0, 0]), 4);
    }

    #[test]
    fn euclidean_and_its_square() {
        assert_eq!(sqr_euclidean::<2, u32>([0, 0], [3, 4]), 25);
        assert_eq!(euclidean::<2, u32>([0, 0], [3, 4]), 5);
        assert_eq!(euclidean::<2, f64>([0, 0], [1, 1]), 2f64.sqrt());
    }

    #[test]
    fn unsigned_order_does_not_overflow() {
        // b < a on every axis must behave exactly like a < b.
        assert_eq!(manhattan::<2, u32>([1_000_000, 0], [0, 1_000_000]), 2_000_000);
        assert_eq!(sqr_euclidean::<2, u32>([5, 7], [2, 3]), 25);
    }

    #[test]
    fn zero_is_zero() {
        assert_eq!(zero::<2, u32>([0, 0], [9, 9]), 0);
    }
}
