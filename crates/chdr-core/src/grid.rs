//! The [`Grid`] — a K-dimensional lattice of weighted cells.
//!
//! Cells are stored row-major (axis 0 fastest) and are immutable once the
//! grid is built; searches only ever read it. A cell participates in
//! pathfinding when its weight is active under [`CellWeight`].

use crate::coords::{Coord, product, to_1d};
use crate::weight::CellWeight;

/// A fixed-size lattice of weighted cells.
#[derive(Debug, Clone)]
pub struct Grid<const K: usize, W: CellWeight = u32> {
    size: Coord<K>,
    count: usize,
    nodes: Vec<W>,
}

#[cfg(feature = "serde")]
impl<const K: usize, W: CellWeight + serde::Serialize> serde::Serialize for Grid<K, W> {
    fn serialize<Sr: serde::Serializer>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Grid", 2)?;
        state.serialize_field("size", &self.size[..])?;
        state.serialize_field("nodes", &self.nodes)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, const K: usize, W: CellWeight + serde::Deserialize<'de>> serde::Deserialize<'de>
    for Grid<K, W>
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw<W> {
            size: Vec<usize>,
            nodes: Vec<W>,
        }

        let raw = Raw::<W>::deserialize(deserializer)?;
        if raw.size.len() != K {
            return Err(serde::de::Error::invalid_length(
                raw.size.len(),
                &"one extent per axis",
            ));
        }
        let mut size = [0; K];
        size.copy_from_slice(&raw.size);
        if raw.nodes.len() != product(size) {
            return Err(serde::de::Error::custom(
                "cell count does not match the grid size",
            ));
        }
        Ok(Self {
            size,
            count: product(size),
            nodes: raw.nodes,
        })
    }
}

impl<const K: usize, W: CellWeight> Grid<K, W> {
    /// Build a grid from its per-cell weights.
    ///
    /// # Panics
    ///
    /// Panics when `nodes.len()` does not equal the product of `size` —
    /// that is a programmer error, not a query error.
    #[must_use]
    pub fn new(size: Coord<K>, nodes: Vec<W>) -> Self {
        let count = product(size);
        assert_eq!(
            nodes.len(),
            count,
            "grid of size {size:?} needs {count} cells, got {}",
            nodes.len()
        );
        Self { size, count, nodes }
    }

    /// The per-axis extents.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Coord<K> {
        self.size
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The cell weights, row-major.
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[W] {
        &self.nodes
    }

    /// The weight at a linear index.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> W {
        self.nodes[index]
    }

    /// The weight at a coordinate.
    #[inline]
    #[must_use]
    pub fn at(&self, coord: Coord<K>) -> W {
        self.nodes[to_1d(coord, self.size)]
    }

    /// Whether a linear index addresses a cell.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < self.count
    }

    /// Whether a coordinate lies within the lattice on every axis.
    #[inline]
    #[must_use]
    pub fn contains_coord(&self, coord: Coord<K>) -> bool {
        (0..K).all(|i| coord[i] < self.size[i])
    }

    /// Whether the cell at a linear index is passable.
    #[inline]
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.nodes[index].is_active()
    }

    /// Append the `2K` axis neighbours of `coord` into `out`, clearing it
    /// first.
    ///
    /// Slot `i` (i < K) holds the negative-axis-`i` neighbour and slot
    /// `K + i` the positive one; the flag is true when the neighbour is
    /// in bounds and active.
    pub fn neighbours_into(&self, coord: Coord<K>, out: &mut Vec<(bool, Coord<K>)>) {
        out.clear();
        out.reserve(2 * K);
        for i in 0..K {
            let mut neg = coord;
            neg[i] = neg[i].wrapping_sub(1);
            let active = coord[i] > 0 && self.at(neg).is_active();
            out.push((active, neg));
        }
        for i in 0..K {
            let mut pos = coord;
            pos[i] += 1;
            let active = coord[i] + 1 < self.size[i] && self.at(pos).is_active();
            out.push((active, pos));
        }
    }

    /// Append every `3^K - 1` neighbour of `coord` (diagonals included)
    /// into `out`, clearing it first.
    ///
    /// Offsets are enumerated in lexicographic base-3 order with the
    /// all-zero centre elided.
    pub fn neighbours_diagonal_into(&self, coord: Coord<K>, out: &mut Vec<(bool, Coord<K>)>) {
        let total = 3usize.pow(K as u32);
        let centre = (total - 1) / 2;
        out.clear();
        out.reserve(total - 1);
        for code in 0..total {
            if code == centre {
                continue;
            }
            let mut target = coord;
            let mut rest = code;
            let mut in_bounds = true;
            for i in 0..K {
                let step = rest % 3;
                rest /= 3;
                // Offsets are {-1, 0, +1}; underflow is caught by the
                // bounds test below.
                target[i] = target[i].wrapping_add(step).wrapping_sub(1);
                in_bounds &= target[i] < self.size[i];
            }
            out.push((in_bounds && self.at(target).is_active(), target));
        }
    }

    /// Whether the cell at `index` is a corridor step: active with exactly
    /// two active axis neighbours.
    #[must_use]
    pub fn is_transitory(&self, index: usize) -> bool {
        if !self.is_active(index) {
            return false;
        }
        let coord = crate::coords::to_nd(index, self.size);
        let mut active = 0;
        for i in 0..K {
            if coord[i] > 0 {
                let mut neg = coord;
                neg[i] -= 1;
                if self.at(neg).is_active() {
                    active += 1;
                }
            }
            if coord[i] + 1 < self.size[i] {
                let mut pos = coord;
                pos[i] += 1;
                if self.at(pos).is_active() {
                    active += 1;
                }
            }
            if active > 2 {
                return false;
            }
        }
        active == 2
    }
}

impl<W: CellWeight> Grid<2, W> {
    /// The fixed 8-neighbour array of a 2-D cell, in lexicographic base-3
    /// order. Used by jump-point searches, which address positions in this
    /// array through rotation tables.
    #[must_use]
    pub fn neighbours8(&self, coord: Coord<2>) -> [(bool, Coord<2>); 8] {
        let mut result = [(false, [0, 0]); 8];
        let mut slot = 0;
        for code in 0..9 {
            if code == 4 {
                continue;
            }
            let dx = code % 3;
            let dy = code / 3;
            let target = [
                coord[0].wrapping_add(dx).wrapping_sub(1),
                coord[1].wrapping_add(dy).wrapping_sub(1),
            ];
            let in_bounds = target[0] < self.size[0] && target[1] < self.size[1];
            result[slot] = (in_bounds && self.at(target).is_active(), target);
            slot += 1;
        }
        result
    }
}
