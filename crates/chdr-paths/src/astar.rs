//! A* — heap-frontier best-first search keyed `(f, g)`.

use chdr_core::{AppendArena, Coord, DaryHeap, ExistenceSet, LowMemoryUsage, Scalar, to_1d};

use crate::maze::Maze;
use crate::node::{Parented, backtrack};
use crate::solve::{Params, Solver};

/// A* search. Optimal for admissible, consistent heuristics at unit
/// weight.
pub struct AStar;

#[derive(Debug, Clone, Copy)]
struct Node<S> {
    index: usize,
    g: S,
    f: S,
    parent: Option<u32>,
}

impl<S: Scalar> PartialEq for Node<S> {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g
    }
}

impl<S: Scalar> Eq for Node<S> {}

impl<S: Scalar> Ord for Node<S> {
    /// Lowest f first; equal f prefers the higher g (the deeper node).
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f.key_cmp(other.f).then(other.g.key_cmp(self.g))
    }
}

impl<S: Scalar> PartialOrd for Node<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Scalar> Parented for Node<S> {
    fn index(&self) -> usize {
        self.index
    }
    fn parent(&self) -> Option<u32> {
        self.parent
    }
}

impl<M, const K: usize, S> Solver<M, K, S> for AStar
where
    M: Maze<K, S>,
    S: Scalar,
{
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
        let size = params.size;
        let e = to_1d(params.end, size);
        let capacity = params.capacity_hint();

        let mut closed = ExistenceSet::<LowMemoryUsage>::with_capacity(capacity);
        let mut open = DaryHeap::<Node<S>, 2>::with_capacity(capacity / 8);
        let mut parents = AppendArena::new();
        let mut nbuf = Vec::with_capacity(2 * K);

        open.push(Node {
            index: to_1d(params.start, size),
            g: S::ZERO,
            f: (params.h)(params.start, params.end) * params.weight,
            parent: None,
        });

        while let Some(curr) = open.pop() {
            if curr.index == e {
                return backtrack(&curr, &parents, size);
            }
            // Expand each vertex once; stale duplicates in the open set
            // fall through here.
            if closed.contains(curr.index) {
                continue;
            }
            closed.preallocate(curr.index, capacity, params.maze.count());
            closed.add(curr.index);

            params.maze.neighbours_into(curr.index, size, &mut nbuf);
            let mut link = None;
            for n in &nbuf {
                if closed.contains(n.index) {
                    continue;
                }
                let parent = *link.get_or_insert_with(|| parents.push(curr));
                let g = curr.g + n.distance;
                open.push_nosort(Node {
                    index: n.index,
                    g,
                    f: g + (params.h)(n.coord, params.end) * params.weight,
                    parent: Some(parent),
                });
            }
            if link.is_some() {
                open.reheapify_back();
            }
        }

        Vec::new()
    }
}
