//! The [`Graph`] — a sparse weighted adjacency map over integer vertex
//! ids.
//!
//! Entries are kept in an [`IndexMap`] so iteration follows insertion
//! order: identical build sequences produce identical neighbour orders,
//! which keeps search results reproducible run to run.
//!
//! A graph can be built directly edge by edge, or contracted out of a
//! [`Grid`] with [`Graph::from_grid`], which elides corridor cells so
//! that long passages collapse into single weighted edges.

use indexmap::IndexMap;

use crate::coords::{Coord, to_1d, to_nd};
use crate::grid::Grid;
use crate::scalar::Scalar;
use crate::weight::CellWeight;

/// A directed weighted edge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge<S> {
    /// Target vertex id.
    pub to: usize,
    /// Edge length.
    pub distance: S,
}

impl<S> Edge<S> {
    /// Shorthand constructor.
    #[inline]
    #[must_use]
    pub const fn new(to: usize, distance: S) -> Self {
        Self { to, distance }
    }
}

/// A sparse weighted graph with integer-indexed vertices.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph<S> {
    entries: IndexMap<usize, Vec<Edge<S>>>,
}

impl<S: Scalar> Graph<S> {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Ensure vertex `u` exists (with no edges if new).
    pub fn add(&mut self, u: usize) {
        self.entries.entry(u).or_default();
    }

    /// Add an edge out of `u`. Duplicate `(to, distance)` pairs merge.
    pub fn add_edge(&mut self, u: usize, edge: Edge<S>) {
        let edges = self.entries.entry(u).or_default();
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    /// Remove an exact `(to, distance)` edge out of `u`; the vertex itself
    /// is dropped once its last edge goes.
    pub fn remove_edge(&mut self, u: usize, edge: Edge<S>) {
        let Some(edges) = self.entries.get_mut(&u) else {
            return;
        };
        if let Some(pos) = edges.iter().position(|e| *e == edge) {
            edges.remove(pos);
        }
        if edges.is_empty() {
            self.entries.shift_remove(&u);
        }
    }

    /// The edges out of `u`, in insertion order. Empty for unknown ids.
    #[must_use]
    pub fn neighbours(&self, u: usize) -> &[Edge<S>] {
        self.entries.get(&u).map_or(&[], Vec::as_slice)
    }

    /// Whether vertex `u` exists.
    #[inline]
    #[must_use]
    pub fn contains(&self, u: usize) -> bool {
        self.entries.contains_key(&u)
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Drop every vertex and edge.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate `(vertex, edges)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Edge<S>])> {
        self.entries.iter().map(|(u, edges)| (*u, edges.as_slice()))
    }

    // -----------------------------------------------------------------------
    // Construction from a grid
    // -----------------------------------------------------------------------

    /// Build a graph from a grid.
    ///
    /// With `prune = false` every active cell becomes a vertex with unit
    /// edges to its active axis neighbours. With `prune = true` the grid
    /// is *contracted*: transitory cells (corridor steps) are elided and
    /// their corridors become single edges whose distance is the corridor
    /// length.
    #[must_use]
    pub fn from_grid<const K: usize, W: CellWeight>(grid: &Grid<K, W>, prune: bool) -> Self {
        let graph = if prune {
            Self::contract(grid)
        } else {
            Self::expand(grid)
        };
        log::debug!(
            "grid of {} cells -> graph of {} vertices / {} edges (prune: {prune})",
            grid.count(),
            graph.count(),
            graph.edge_count(),
        );
        graph
    }

    fn expand<const K: usize, W: CellWeight>(grid: &Grid<K, W>) -> Self {
        let mut graph = Self::new();
        let mut nbuf = Vec::with_capacity(2 * K);
        for index in 0..grid.count() {
            if !grid.is_active(index) {
                continue;
            }
            grid.neighbours_into(to_nd(index, grid.size()), &mut nbuf);
            for (active, coord) in &nbuf {
                if *active {
                    graph.add_edge(index, Edge::new(to_1d(*coord, grid.size()), S::ONE));
                }
            }
        }
        graph
    }

    #[cfg(not(feature = "parallel"))]
    fn contract<const K: usize, W: CellWeight>(grid: &Grid<K, W>) -> Self {
        let mut graph = Self::new();
        let mut nbuf = Vec::with_capacity(2 * K);
        for index in 0..grid.count() {
            for edge in contract_cell(grid, index, &mut nbuf) {
                graph.add_edge(index, edge);
            }
        }
        graph
    }

    /// Contraction fans the cell range out over worker threads; each owns
    /// its own scratch state and the shared edge list is serialised by a
    /// mutex. Chunk results are merged in cell order afterwards so the
    /// vertex order stays deterministic.
    #[cfg(feature = "parallel")]
    fn contract<const K: usize, W: CellWeight + Sync>(grid: &Grid<K, W>) -> Self
    where
        S: Send,
    {
        use rayon::prelude::*;
        use std::sync::Mutex;

        const CHUNK: usize = 4096;

        let chunks: Vec<usize> = (0..grid.count()).step_by(CHUNK).collect();
        let collected: Mutex<Vec<(usize, Vec<(usize, Edge<S>)>)>> =
            Mutex::new(Vec::with_capacity(chunks.len()));

        chunks.par_iter().for_each(|&start| {
            let mut nbuf = Vec::with_capacity(2 * K);
            let mut edges = Vec::new();
            for index in start..usize::min(start + CHUNK, grid.count()) {
                for edge in contract_cell(grid, index, &mut nbuf) {
                    edges.push((index, edge));
                }
            }
            collected.lock().expect("contraction worker poisoned").push((start, edges));
        });

        let mut chunks = collected.into_inner().expect("contraction worker poisoned");
        chunks.sort_unstable_by_key(|(start, _)| *start);

        let mut graph = Self::new();
        for (_, edges) in chunks {
            for (u, edge) in edges {
                graph.add_edge(u, edge);
            }
        }
        graph
    }

    /// Offline pass: repeatedly remove degree-2 vertices, merging their
    /// incident edges with summed distances. Stops once only two vertices
    /// remain.
    pub fn prune(&mut self) {
        loop {
            let mut removed = false;
            let keys: Vec<usize> = self.entries.keys().copied().collect();
            for node in keys {
                if self.entries.len() <= 2 {
                    break;
                }
                let Some(edges) = self.entries.get(&node) else {
                    continue;
                };
                if edges.len() != 2 {
                    continue;
                }
                let (a, b) = (edges[0], edges[1]);
                if a.to == node || b.to == node || a.to == b.to {
                    continue;
                }
                let merged = a.distance + b.distance;
                self.rewire(a.to, Edge::new(node, a.distance), Edge::new(b.to, merged));
                self.rewire(b.to, Edge::new(node, b.distance), Edge::new(a.to, merged));
                self.entries.shift_remove(&node);
                removed = true;
            }
            if !removed {
                break;
            }
        }
    }

    /// Replace `old` with `new` in `u`'s edge list, merging duplicates.
    fn rewire(&mut self, u: usize, old: Edge<S>, new: Edge<S>) {
        let Some(edges) = self.entries.get_mut(&u) else {
            return;
        };
        if let Some(pos) = edges.iter().position(|e| *e == old) {
            edges.remove(pos);
            if !edges.contains(&new) {
                edges.push(new);
            }
        }
    }
}

/// Edges emitted by contracting one cell: for a non-transitory active
/// cell, one edge per corridor leaving it, walked through transitory
/// cells to the next non-transitory endpoint.
fn contract_cell<const K: usize, W: CellWeight, S: Scalar>(
    grid: &Grid<K, W>,
    index: usize,
    nbuf: &mut Vec<(bool, Coord<K>)>,
) -> Vec<Edge<S>> {
    let mut edges = Vec::new();
    if !grid.is_active(index) || grid.is_transitory(index) {
        return edges;
    }
    let size = grid.size();
    grid.neighbours_into(to_nd(index, size), nbuf);
    let starts: Vec<usize> = nbuf
        .iter()
        .filter(|(active, _)| *active)
        .map(|(_, coord)| to_1d(*coord, size))
        .collect();

    for first in starts {
        let mut prev = index;
        let mut cur = first;
        let mut steps = 1usize;
        // A transitory cell has exactly two active axis neighbours, one
        // of which is the cell we came from; follow the other until the
        // corridor ends. Loops terminate at the (non-transitory) origin.
        while grid.is_transitory(cur) {
            grid.neighbours_into(to_nd(cur, size), nbuf);
            let next = nbuf
                .iter()
                .filter(|(active, _)| *active)
                .map(|(_, coord)| to_1d(*coord, size))
                .find(|&candidate| candidate != prev);
            match next {
                Some(next) => {
                    prev = cur;
                    cur = next;
                    steps += 1;
                }
                None => break,
            }
        }
        edges.push(Edge::new(cur, S::from_usize(steps)));
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_edges_merge() {
        let mut g = Graph::<u32>::new();
        g.add_edge(0, Edge::new(1, 5));
        g.add_edge(0, Edge::new(1, 5));
        g.add_edge(0, Edge::new(1, 7));
        assert_eq!(g.neighbours(0).len(), 2);
    }

    #[test]
    fn remove_edge_drops_empty_vertices() {
        let mut g = Graph::<u32>::new();
        g.add_edge(0, Edge::new(1, 1));
        g.remove_edge(0, Edge::new(1, 1));
        assert!(!g.contains(0));
        assert_eq!(g.count(), 0);
    }

    #[test]
    fn add_is_idempotent() {
        let mut g = Graph::<u32>::new();
        g.add_edge(3, Edge::new(4, 1));
        g.add(3);
        assert_eq!(g.neighbours(3).len(), 1);
    }

    #[test]
    fn expand_makes_unit_edges() {
        let grid = Grid::<1, u32>::new([4], vec![0, 0, u32::MAX, 0]);
        let g = Graph::<u32>::from_grid(&grid, false);
        assert_eq!(g.neighbours(0), &[Edge::new(1, 1)]);
        assert_eq!(g.neighbours(1), &[Edge::new(0, 1)]);
        // The wall has no vertex; the isolated cell past it has no edges.
        assert!(!g.contains(2));
        assert!(!g.contains(3));
    }

    #[test]
    fn contraction_collapses_corridors() {
        // A straight 1x6 corridor: the four inner cells are transitory,
        // so the endpoints connect directly with distance 5.
        let grid = Grid::<1, u32>::new([6], vec![0; 6]);
        let g = Graph::<u32>::from_grid(&grid, true);
        assert_eq!(g.count(), 2);
        assert_eq!(g.neighbours(0), &[Edge::new(5, 5)]);
        assert_eq!(g.neighbours(5), &[Edge::new(0, 5)]);
    }

    #[test]
    fn contraction_keeps_junctions() {
        // A T-junction: three corridor arms meeting at (1,1).
        let wall = u32::MAX;
        #[rustfmt::skip]
        let cells = vec![
            wall, 0,    wall,
            0,    0,    0,
            wall, wall, wall,
        ];
        let grid = Grid::new([3, 3], cells);
        let g = Graph::<u32>::from_grid(&grid, true);
        let centre = to_1d([1, 1], [3, 3]);
        // Arms are one step long, so no cell is transitory except none —
        // every arm end connects straight to the junction.
        assert_eq!(g.neighbours(centre).len(), 3);
        assert!(
            g.neighbours(to_1d([0, 1], [3, 3]))
                .contains(&Edge::new(centre, 1))
        );
    }

    #[test]
    fn prune_merges_degree_two_chains() {
        // 0 -1- 1 -2- 2 -3- 3 plus a spur keeping the endpoints busy.
        let mut g = Graph::<u32>::new();
        for (u, v, d) in [(0, 1, 1), (1, 2, 2), (2, 3, 3)] {
            g.add_edge(u, Edge::new(v, d));
            g.add_edge(v, Edge::new(u, d));
        }
        g.add_edge(0, Edge::new(10, 1));
        g.add_edge(10, Edge::new(0, 1));
        g.add_edge(3, Edge::new(11, 1));
        g.add_edge(11, Edge::new(3, 1));

        g.prune();

        // 1 and 2 are gone; 0 connects to 3 with summed distance 6.
        assert!(!g.contains(1));
        assert!(!g.contains(2));
        assert!(g.neighbours(0).contains(&Edge::new(3, 6)));
        assert!(g.neighbours(3).contains(&Edge::new(0, 6)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn graph_round_trip() {
        let mut g = Graph::<u32>::new();
        g.add_edge(0, Edge::new(1, 3));
        g.add_edge(1, Edge::new(0, 3));
        let json = serde_json::to_string(&g).unwrap();
        let back: Graph<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.neighbours(0), g.neighbours(0));
        assert_eq!(back.count(), 2);
    }

    #[test]
    fn grid_round_trip() {
        let grid = crate::grid::Grid::<2, u32>::new([2, 2], vec![0, 1, u32::MAX, 3]);
        let json = serde_json::to_string(&grid).unwrap();
        let back: crate::grid::Grid<2, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.size(), [2, 2]);
        assert_eq!(back.nodes(), grid.nodes());
    }
}
