//! IDDFS — iterative deepening on path depth.
//!
//! Depth-first probes with a depth budget that grows by one per round.
//! The explicit frame stack lives in a [`BumpArena`], whose LIFO
//! discipline is exactly the probe's push/pop pattern; visited state is
//! the current path alone.

use chdr_core::{BumpArena, Coord, Scalar, to_1d, to_nd};

use crate::maze::{Maze, NodeData};
use crate::solve::{Params, Solver};

/// Iterative-deepening depth-first search. Minimum hop count, at the
/// cost of re-walking shallow levels every round.
pub struct Iddfs;

struct Frame<const K: usize, S> {
    neighbours: Vec<NodeData<K, S>>,
    next: usize,
}

impl<M, const K: usize, S> Solver<M, K, S> for Iddfs
where
    M: Maze<K, S>,
    S: Scalar,
{
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
        let size = params.size;
        let s = to_1d(params.start, size);
        let e = to_1d(params.end, size);

        // A simple path never revisits a vertex, so the deepest useful
        // bound is the vertex count.
        for bound in 1..=params.maze.count() {
            let mut path = vec![s];
            let mut frames: BumpArena<Frame<K, S>> = BumpArena::new();
            frames.push(frame(params, s));

            while !frames.is_empty() {
                let depth = path.len() - 1;
                let step = {
                    let Some(top) = frames.last_mut() else { break };
                    if depth < bound && top.next < top.neighbours.len() {
                        let n = top.neighbours[top.next];
                        top.next += 1;
                        Some(n)
                    } else {
                        None
                    }
                };
                match step {
                    Some(n) => {
                        if path.contains(&n.index) {
                            continue;
                        }
                        if n.index == e {
                            path.push(n.index);
                            return path.iter().map(|&i| to_nd(i, size)).collect();
                        }
                        path.push(n.index);
                        frames.push(frame(params, n.index));
                    }
                    None => {
                        path.pop();
                        frames.pop();
                    }
                }
            }
        }

        Vec::new()
    }
}

fn frame<M, const K: usize, S>(params: &Params<'_, M, K, S>, index: usize) -> Frame<K, S>
where
    M: Maze<K, S>,
    S: Scalar,
{
    let mut neighbours = Vec::with_capacity(2 * K);
    params.maze.neighbours_into(index, params.size, &mut neighbours);
    Frame {
        neighbours,
        next: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::zero;
    use crate::solve::solve;
    use chdr_core::Grid;

    #[test]
    fn minimum_hop_count_on_open_grid() {
        let grid: Grid<2, u32> = Grid::new([3, 3], vec![0; 9]);
        let params = Params::new(&grid, [0, 0], [2, 2], [3, 3], zero);
        let path = solve::<Iddfs, _, 2, u32>(&params);
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], [0, 0]);
        assert_eq!(path[4], [2, 2]);
    }

    #[test]
    fn adjacent_goal_found_at_depth_one() {
        let grid: Grid<2, u32> = Grid::new([3, 3], vec![0; 9]);
        let params = Params::new(&grid, [0, 0], [1, 0], [3, 3], zero);
        assert_eq!(solve::<Iddfs, _, 2, u32>(&params), vec![[0, 0], [1, 0]]);
    }

    #[test]
    fn corridor_matches_bfs_length() {
        let grid: Grid<1, u32> = Grid::new([7], vec![0; 7]);
        let params = Params::new(&grid, [0], [6], [7], zero);
        let path = solve::<Iddfs, _, 1, u32>(&params);
        assert_eq!(path.len(), 7);
    }

    #[test]
    fn unreachable_goal_exhausts_all_bounds() {
        let mut cells = vec![0u32; 9];
        for y in 0..3 {
            cells[to_1d([1, y], [3, 3])] = u32::MAX;
        }
        let grid = Grid::new([3, 3], cells);
        let params = Params::new(&grid, [0, 0], [2, 0], [3, 3], zero);
        assert!(solve::<Iddfs, _, 2, u32>(&params).is_empty());
    }
}
