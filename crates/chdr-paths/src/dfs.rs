//! DFS — depth-first search over a LIFO stack.

use chdr_core::{Coord, ExistenceSet, LowMemoryUsage, Scalar, StableForwardBuf, to_1d};

use crate::maze::Maze;
use crate::node::{Parented, backtrack};
use crate::solve::{Params, Solver};

/// Depth-first search. Complete on finite mazes, with no length promise.
pub struct Dfs;

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

impl<M, const K: usize, S> Solver<M, K, S> for Dfs
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
        let mut open: Vec<Node> = Vec::with_capacity(capacity / 8);
        let mut parents = StableForwardBuf::<Node>::new();
        let mut nbuf = Vec::with_capacity(2 * K);

        closed.add(s);
        open.push(Node {
            index: s,
            parent: None,
        });

        while let Some(curr) = open.pop() {
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
                open.push(Node {
                    index: n.index,
                    parent: Some(parent),
                });
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::zero;
    use crate::solve::solve;
    use chdr_core::Grid;

    fn assert_valid_path(path: &[Coord<2>], grid: &Grid<2, u32>, s: Coord<2>, e: Coord<2>) {
        assert_eq!(path.first(), Some(&s));
        assert_eq!(path.last(), Some(&e));
        for pair in path.windows(2) {
            let dist =
                pair[0][0].abs_diff(pair[1][0]) + pair[0][1].abs_diff(pair[1][1]);
            assert_eq!(dist, 1, "steps must be unit axis moves");
        }
        for c in path {
            assert!(grid.at(*c) != u32::MAX, "path crosses a wall at {c:?}");
        }
    }

    #[test]
    fn reaches_the_goal() {
        let mut cells = vec![0u32; 25];
        cells[to_1d([1, 1], [5, 5])] = u32::MAX;
        cells[to_1d([3, 3], [5, 5])] = u32::MAX;
        let grid = Grid::new([5, 5], cells);
        let params = Params::new(&grid, [0, 0], [4, 4], [5, 5], zero);
        let path = solve::<Dfs, _, 2, u32>(&params);
        assert_valid_path(&path, &grid, [0, 0], [4, 4]);
    }

    #[test]
    fn dead_end_backtracks() {
        // A comb-shaped maze that forces the stack to unwind.
        let wall = u32::MAX;
        #[rustfmt::skip]
        let cells = vec![
            0, wall, 0,    0,    0,
            0, wall, 0,    wall, 0,
            0, 0,    0,    wall, 0,
        ];
        let grid = Grid::new([5, 3], cells);
        let params = Params::new(&grid, [0, 0], [4, 2], [5, 3], zero);
        let path = solve::<Dfs, _, 2, u32>(&params);
        assert_eq!(path.first(), Some(&[0, 0]));
        assert_eq!(path.last(), Some(&[4, 2]));
    }

    #[test]
    fn walled_off_goal_is_empty() {
        let mut cells = vec![0u32; 9];
        for y in 0..3 {
            cells[to_1d([1, y], [3, 3])] = u32::MAX;
        }
        let grid = Grid::new([3, 3], cells);
        let params = Params::new(&grid, [0, 1], [2, 1], [3, 3], zero);
        assert!(solve::<Dfs, _, 2, u32>(&params).is_empty());
    }
}
