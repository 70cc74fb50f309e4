//! B* — best-first search ordered by the heuristic alone.
//!
//! Fast and memory-light, but the returned path carries no optimality
//! promise: expansion chases the estimate, not the accumulated cost.

use chdr_core::{Coord, DaryHeap, ExistenceSet, LinearQueue, LowMemoryUsage, Scalar, StableForwardBuf, to_1d};

use crate::frontier::{Frontier, SizeClass, size_class};
use crate::maze::Maze;
use crate::node::{Parented, backtrack};
use crate::solve::{Params, Solver};

/// Heuristic-only best-first search.
pub struct BStar;

#[derive(Debug, Clone, Copy)]
struct Node<S> {
    index: usize,
    h: S,
    parent: Option<u32>,
}

impl<S: Scalar> PartialEq for Node<S> {
    fn eq(&self, other: &Self) -> bool {
        self.h == other.h && self.index == other.index
    }
}

impl<S: Scalar> Eq for Node<S> {}

impl<S: Scalar> Ord for Node<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.h.key_cmp(other.h).then(self.index.cmp(&other.index))
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

fn run<F, M, const K: usize, S>(params: &Params<'_, M, K, S>) -> Vec<Coord<K>>
where
    F: Frontier<Node<S>>,
    M: Maze<K, S>,
    S: Scalar,
{
    let size = params.size;
    let e = to_1d(params.end, size);
    let capacity = params.capacity_hint();

    let mut closed = ExistenceSet::<LowMemoryUsage>::with_capacity(capacity);
    let mut open = F::with_capacity(capacity / 8);
    let mut parents = StableForwardBuf::<Node<S>>::new();
    let mut nbuf = Vec::with_capacity(2 * K);

    open.push(Node {
        index: to_1d(params.start, size),
        h: (params.h)(params.start, params.end) * params.weight,
        parent: None,
    });

    while let Some(curr) = open.pop() {
        if curr.index == e {
            return backtrack(&curr, &parents, size);
        }
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
            open.push(Node {
                index: n.index,
                h: (params.h)(n.coord, params.end) * params.weight,
                parent: Some(parent),
            });
        }
    }

    Vec::new()
}

impl<M, const K: usize, S> Solver<M, K, S> for BStar
where
    M: Maze<K, S>,
    S: Scalar,
{
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
        match size_class(params.maze.count()) {
            SizeClass::Linear16 => run::<LinearQueue<Node<S>, 16>, M, K, S>(params),
            SizeClass::Linear32 => run::<LinearQueue<Node<S>, 32>, M, K, S>(params),
            SizeClass::Linear64 => run::<LinearQueue<Node<S>, 64>, M, K, S>(params),
            SizeClass::Linear128 => run::<LinearQueue<Node<S>, 128>, M, K, S>(params),
            SizeClass::Heap => run::<DaryHeap<Node<S>, 2>, M, K, S>(params),
        }
    }
}
