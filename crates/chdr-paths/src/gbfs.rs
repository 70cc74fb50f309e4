//! GBFS — breadth-first search with greedily reclaimed parent chains.
//!
//! Search order is exactly [`Bfs`](crate::Bfs); the difference is the
//! parent store. Links are reference counted, so once a branch can no
//! longer contribute to the answer its whole chain is freed mid-search
//! instead of lingering until the solver returns.

use chdr_core::{Coord, ExistenceSet, RingQueue, Scalar, to_1d};

use crate::maze::Maze;
use crate::node::{PathLink, backtrack_managed};
use crate::solve::{Params, Solver};

/// Breadth-first search over reference-counted parent links.
pub struct Gbfs;

impl<M, const K: usize, S> Solver<M, K, S> for Gbfs
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
        let mut open = RingQueue::with_capacity(capacity / 8);
        let mut nbuf = Vec::with_capacity(2 * K);

        closed.add(s);
        open.push_back(PathLink::root(s));

        while let Some(curr) = open.pop_front() {
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
                open.push_back(PathLink::child(n.index, &curr));
            }
            // `curr` drops here; exhausted branches unlink their
            // ancestors immediately.
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::Bfs;
    use crate::heuristics::zero;
    use crate::solve::solve;
    use chdr_core::Grid;

    #[test]
    fn matches_bfs_path_length() {
        let mut cells = vec![0u32; 25];
        cells[to_1d([2, 1], [5, 5])] = u32::MAX;
        cells[to_1d([2, 2], [5, 5])] = u32::MAX;
        let grid = Grid::new([5, 5], cells);
        let params = Params::new(&grid, [0, 2], [4, 2], [5, 5], zero);
        let greedy = solve::<Gbfs, _, 2, u32>(&params);
        let plain = solve::<Bfs, _, 2, u32>(&params);
        assert_eq!(greedy.len(), plain.len());
        assert_eq!(greedy.first(), Some(&[0, 2]));
        assert_eq!(greedy.last(), Some(&[4, 2]));
    }

    #[test]
    fn corridor_end_to_end() {
        let grid: Grid<1, u32> = Grid::new([8], vec![0; 8]);
        let params = Params::new(&grid, [0], [7], [8], zero);
        let path = solve::<Gbfs, _, 1, u32>(&params);
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn unreachable_is_empty() {
        let mut cells = vec![0u32; 9];
        for y in 0..3 {
            cells[to_1d([1, y], [3, 3])] = u32::MAX;
        }
        let grid = Grid::new([3, 3], cells);
        let params = Params::new(&grid, [0, 0], [2, 2], [3, 3], zero);
        assert!(solve::<Gbfs, _, 2, u32>(&params).is_empty());
    }
}
