//! GDFS — depth-first search with greedily reclaimed parent chains.
//!
//! [`Dfs`](crate::Dfs) semantics over reference-counted links, as
//! [`Gbfs`](crate::Gbfs) is to [`Bfs`](crate::Bfs).

use chdr_core::{Coord, ExistenceSet, Scalar, to_1d};

use crate::maze::Maze;
use crate::node::{PathLink, backtrack_managed};
use crate::solve::{Params, Solver};

/// Depth-first search over reference-counted parent links.
pub struct Gdfs;

impl<M, const K: usize, S> Solver<M, K, S> for Gdfs
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
        let mut open = Vec::with_capacity(capacity / 8);
        let mut nbuf = Vec::with_capacity(2 * K);

        closed.add(s);
        open.push(PathLink::root(s));

        while let Some(curr) = open.pop() {
            if curr.index == e {
                return backtrack_managed(&curr, size);
            }

            params.maze.neighbours_into(curr.index, size, &mut nbuf);
            for n in &nbuf {
                if closed.contains(n.index) {
                    continue;
                }
                closed.preallocate(n.index, capacity, params.maze.count());
                closed.add(n.index);
                open.push(PathLink::child(n.index, &curr));
            }
        }

        Vec::new()
    }
}
