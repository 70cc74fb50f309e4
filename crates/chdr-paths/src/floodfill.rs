//! Flood fill — reachability without reconstruction.

use chdr_core::{ExistenceSet, RingQueue, Scalar};

use crate::maze::Maze;
use crate::solve::{Params, validate};

/// Whether the end is reachable from the start. Runs the same breadth-
/// first sweep as [`Bfs`](crate::Bfs) but keeps no parent chains, so
/// there is nothing to reconstruct and nothing to allocate per node.
pub fn flood_fill<M, const K: usize, S>(params: &Params<'_, M, K, S>) -> bool
where
    M: Maze<K, S>,
    S: Scalar,
{
    let Some((s, e)) = validate(params) else {
        return false;
    };
    if s == e {
        return true;
    }
    let capacity = params.capacity_hint();

    let mut closed: ExistenceSet = ExistenceSet::with_capacity(capacity);
    let mut open = RingQueue::with_capacity(capacity / 8);
    let mut nbuf = Vec::with_capacity(2 * K);

    closed.add(s);
    open.push_back(s);

    while let Some(curr) = open.pop_front() {
        if curr == e {
            return true;
        }
        params.maze.neighbours_into(curr, params.size, &mut nbuf);
        for n in &nbuf {
            if closed.contains(n.index) {
                continue;
            }
            closed.preallocate(n.index, capacity, params.maze.count());
            closed.add(n.index);
            open.push_back(n.index);
        }
    }

    false
}
