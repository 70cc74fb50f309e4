//! BFS — breadth-first search over a FIFO ring queue.

use chdr_core::{Coord, ExistenceSet, LowMemoryUsage, RingQueue, Scalar, StableForwardBuf, to_1d};

use crate::maze::Maze;
use crate::node::{Parented, backtrack};
use crate::solve::{Params, Solver};

/// Breadth-first search. Minimum hop count on unit-cost mazes.
pub struct Bfs;

#[derive(Debug, Clone, Copy)]
struct Node {
    index: usize,
    parent: Option<u32>,
}

impl Parented for Node {
    fn index(&self) -> usize {
        self.index
    }
    fn parent(&self) -> Option<u32> {
        self.parent
    }
}

impl<M, const K: usize, S> Solver<M, K, S> for Bfs
where
    M: Maze<K, S>,
    S: Scalar,
{
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
        let size = params.size;
        let s = to_1d(params.start, size);
        let e = to_1d(params.end, size);
        let capacity = params.capacity_hint();

        let mut closed = ExistenceSet::<LowMemoryUsage>::with_capacity(capacity);
        let mut open = RingQueue::with_capacity(capacity / 8);
        let mut parents = StableForwardBuf::<Node>::new();
        let mut nbuf = Vec::with_capacity(2 * K);

        // FIFO order makes the first visit the shallowest, so vertices
        // close at enqueue time.
        closed.add(s);
        open.push_back(Node {
            index: s,
            parent: None,
        });

        while let Some(curr) = open.pop_front() {
            if curr.index == e {
                return backtrack(&curr, &parents, size);
            }

            params.maze.neighbours_into(curr.index, size, &mut nbuf);
            let mut link = None;
            for n in &nbuf {
                if closed.contains(n.index) {
                    continue;
                }
                closed.preallocate(n.index, capacity, params.maze.count());
                closed.add(n.index);
                let parent = *link.get_or_insert_with(|| parents.push(curr));
                open.push_back(Node {
                    index: n.index,
                    parent: Some(parent),
                });
            }
        }

        Vec::new()
    }
}
