//! G* — "graveyard search": best-first on `(f, g)` over managed parent
//! chains.
//!
//! The ordering is A*'s, but every generated vertex is closed the
//! moment it is enqueued, so the frontier never holds duplicates and a
//! vertex keeps its first-seen g for good. Combined with
//! reference-counted parent links that free abandoned branches while
//! the search still runs, this trades the optimality promise on
//! weighted inputs for a small, self-pruning frontier.

use std::rc::Rc;

use chdr_core::{Coord, DaryHeap, ExistenceSet, Scalar, to_1d};

use crate::maze::Maze;
use crate::node::{PathLink, backtrack_managed};
use crate::solve::{Params, Solver};

/// Best-first search over reference-counted parent links.
pub struct GStar;

struct Node<S> {
    g: S,
    f: S,
    link: Rc<PathLink>,
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

impl<M, const K: usize, S> Solver<M, K, S> for GStar
where
    M: Maze<K, S>,
    S: Scalar,
{
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
        let size = params.size;
        let s = to_1d(params.start, size);
        let e = to_1d(params.end, size);
        let capacity = params.capacity_hint();

        let mut closed: ExistenceSet = ExistenceSet::with_capacity(capacity);
        let mut open = DaryHeap::<Node<S>, 2>::with_capacity(capacity / 8);
        let mut nbuf = Vec::with_capacity(2 * K);

        closed.add(s);
        open.push(Node {
            g: S::ZERO,
            f: (params.h)(params.start, params.end) * params.weight,
            link: PathLink::root(s),
        });

        while let Some(curr) = open.pop() {
            if curr.link.index == e {
                return backtrack_managed(&curr.link, size);
            }

            params.maze.neighbours_into(curr.link.index, size, &mut nbuf);
            for n in &nbuf {
                if closed.contains(n.index) {
                    continue;
                }
                closed.preallocate(n.index, capacity, params.maze.count());
                closed.add(n.index);
                let g = curr.g + n.distance;
                open.push(Node {
                    g,
                    f: g + (params.h)(n.coord, params.end) * params.weight,
                    link: PathLink::child(n.index, &curr.link),
                });
            }
            // `curr` drops here; exhausted branches unlink their
            // ancestors immediately.
        }

        Vec::new()
    }
}
