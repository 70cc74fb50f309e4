//! EIDDFS — iterative deepening with constant-time path membership.
//!
//! [`Iddfs`](crate::Iddfs) scans the current path to refuse revisits;
//! this variant marks path membership in an [`ExistenceSet`] instead —
//! added on descent, removed on retreat, cleared between rounds.

use chdr_core::{BumpArena, Coord, ExistenceSet, Scalar, to_1d, to_nd};

use crate::maze::{Maze, NodeData};
use crate::solve::{Params, Solver};

/// Enhanced iterative-deepening depth-first search.
pub struct Eiddfs;

struct Frame<const K: usize, S> {
    neighbours: Vec<NodeData<K, S>>,
    next: usize,
}

impl<M, const K: usize, S> Solver<M, K, S> for Eiddfs
where
    M: Maze<K, S>,
    S: Scalar,
{
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
        let size = params.size;
        let s = to_1d(params.start, size);
        let e = to_1d(params.end, size);
        let capacity = params.capacity_hint();

        let mut on_path: ExistenceSet = ExistenceSet::with_capacity(capacity);

        for bound in 1..=params.maze.count() {
            let mut path = vec![s];
            on_path.clear();
            on_path.preallocate(s, capacity, params.maze.count());
            on_path.add(s);

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
                        if on_path.contains(n.index) {
                            continue;
                        }
                        if n.index == e {
                            path.push(n.index);
                            return path.iter().map(|&i| to_nd(i, size)).collect();
                        }
                        on_path.preallocate(n.index, capacity, params.maze.count());
                        on_path.add(n.index);
                        path.push(n.index);
                        frames.push(frame(params, n.index));
                    }
                    None => {
                        if let Some(index) = path.pop() {
                            on_path.remove(index);
                        }
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
    use crate::iddfs::Iddfs;
    use crate::solve::solve;
    use chdr_core::Grid;

    #[test]
    fn agrees_with_the_plain_variant() {
        let mut cells = vec![0u32; 25];
        cells[to_1d([2, 2], [5, 5])] = u32::MAX;
        cells[to_1d([2, 1], [5, 5])] = u32::MAX;
        let grid = Grid::new([5, 5], cells);
        let params = Params::new(&grid, [0, 0], [4, 4], [5, 5], zero);
        let enhanced = solve::<Eiddfs, _, 2, u32>(&params);
        let plain = solve::<Iddfs, _, 2, u32>(&params);
        assert_eq!(enhanced, plain);
    }

    #[test]
    fn minimum_hop_count() {
        let grid: Grid<2, u32> = Grid::new([4, 4], vec![0; 16]);
        let params = Params::new(&grid, [0, 0], [3, 3], [4, 4], zero);
        assert_eq!(solve::<Eiddfs, _, 2, u32>(&params).len(), 7);
    }

    #[test]
    fn unreachable_goal_exhausts_all_bounds() {
        let mut cells = vec![0u32; 9];
        for y in 0..3 {
            cells[to_1d([1, y], [3, 3])] = u32::MAX;
        }
        let grid = Grid::new([3, 3], cells);
        let params = Params::new(&grid, [0, 0], [2, 0], [3, 3], zero);
        assert!(solve::<Eiddfs, _, 2, u32>(&params).is_empty());
    }
}
