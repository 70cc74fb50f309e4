//! Maze normalisation: one neighbour interface over grids and graphs.
//!
//! The algorithms never care whether they are walking a lattice or an
//! adjacency map. [`Maze`] narrows both to index-addressed vertices whose
//! active neighbours are enumerated as [`NodeData`] records — coordinate,
//! linear index and step distance in one place. Grid steps always cost
//! one unit; graph edges carry their stored distance.

use chdr_core::{CellWeight, Coord, Graph, Grid, Scalar, to_1d, to_nd};

/// A neighbour as the solvers see it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeData<const K: usize, S> {
    /// N-dimensional position.
    pub coord: Coord<K>,
    /// Linear index.
    pub index: usize,
    /// Cost of the step that reaches it.
    pub distance: S,
}

/// Index-addressed view of a searchable maze.
///
/// `size` is the coordinate space of the query (a grid's own extents; for
/// graphs, the lattice the vertex ids were minted in).
pub trait Maze<const K: usize, S: Scalar> {
    /// Number of vertices (cells for grids).
    fn count(&self) -> usize;

    /// Whether `index` addresses a vertex at all.
    fn contains(&self, index: usize) -> bool;

    /// Whether the vertex at `index` may be traversed. Only meaningful
    /// for contained indices.
    fn is_active(&self, index: usize) -> bool;

    /// Append the **active** neighbours of `index` into `out`, clearing
    /// it first. Enumeration order is fixed per maze kind, so identical
    /// queries see identical orders.
    fn neighbours_into(&self, index: usize, size: Coord<K>, out: &mut Vec<NodeData<K, S>>);
}

impl<const K: usize, W: CellWeight, S: Scalar> Maze<K, S> for Grid<K, W> {
    #[inline]
    fn count(&self) -> usize {
        self.count()
    }

    #[inline]
    fn contains(&self, index: usize) -> bool {
        self.contains(index)
    }

    #[inline]
    fn is_active(&self, index: usize) -> bool {
        self.is_active(index)
    }

    /// Axis neighbours, negative axes before positive ones, unit cost.
    fn neighbours_into(&self, index: usize, size: Coord<K>, out: &mut Vec<NodeData<K, S>>) {
        debug_assert_eq!(size, self.size(), "query size must match the grid");
        let coord = to_nd(index, size);
        out.clear();
        for i in 0..K {
            if coord[i] > 0 {
                let mut neg = coord;
                neg[i] -= 1;
                let index = to_1d(neg, size);
                if self.is_active(index) {
                    out.push(NodeData {
                        coord: neg,
                        index,
                        distance: S::ONE,
                    });
                }
            }
        }
        for i in 0..K {
            if coord[i] + 1 < size[i] {
                let mut pos = coord;
                pos[i] += 1;
                let index = to_1d(pos, size);
                if self.is_active(index) {
                    out.push(NodeData {
                        coord: pos,
                        index,
                        distance: S::ONE,
                    });
                }
            }
        }
    }
}

impl<const K: usize, S: Scalar> Maze<K, S> for Graph<S> {
    #[inline]
    fn count(&self) -> usize {
        self.count()
    }

    #[inline]
    fn contains(&self, index: usize) -> bool {
        self.contains(index)
    }

    /// Graph vertices have no wall state; existing means traversable.
    #[inline]
    fn is_active(&self, _index: usize) -> bool {
        true
    }

    /// Stored edges in insertion order.
    fn neighbours_into(&self, index: usize, size: Coord<K>, out: &mut Vec<NodeData<K, S>>) {
        out.clear();
        for edge in self.neighbours(index) {
            out.push(NodeData {
                coord: to_nd(edge.to, size),
                index: edge.to,
                distance: edge.distance,
            });
        }
    }
}
