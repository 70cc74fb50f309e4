//! IDA* — iterative deepening on f.
//!
//! Depth-first probes under an f bound; each failed round returns the
//! smallest f that exceeded the bound and the search restarts with it.
//! Memory is the current path alone.

use chdr_core::{Coord, Scalar, to_1d, to_nd};

use crate::maze::{Maze, NodeData};
use crate::solve::{Params, Solver};

/// Iterative-deepening A*. Minimum-cost paths for admissible heuristics.
pub struct IdaStar;

#[derive(Debug, Clone, Copy)]
struct Node<S> {
    index: usize,
    g: S,
    f: S,
}

enum Outcome<S> {
    Found,
    Min(S),
}

fn search<M, const K: usize, S>(
    path: &mut Vec<Node<S>>,
    bound: S,
    e: usize,
    params: &Params<'_, M, K, S>,
) -> Outcome<S>
where
    M: Maze<K, S>,
    S: Scalar,
{
    let curr = *path.last().expect("search() with an empty path");
    if curr.f.key_cmp(bound).is_gt() {
        return Outcome::Min(curr.f);
    }
    if curr.index == e {
        return Outcome::Found;
    }

    let mut nbuf: Vec<NodeData<K, S>> = Vec::with_capacity(2 * K);
    params.maze.neighbours_into(curr.index, params.size, &mut nbuf);

    let mut min = S::MAX;
    for n in nbuf {
        // Visited discipline covers the current path only.
        if path.iter().any(|node| node.index == n.index) {
            continue;
        }
        let g = curr.g + n.distance;
        path.push(Node {
            index: n.index,
            g,
            f: g + (params.h)(n.coord, params.end) * params.weight,
        });
        match search(path, bound, e, params) {
            Outcome::Found => return Outcome::Found,
            Outcome::Min(m) => {
                if m.key_cmp(min).is_lt() {
                    min = m;
                }
            }
        }
        path.pop();
    }
    Outcome::Min(min)
}

impl<M, const K: usize, S> Solver<M, K, S> for IdaStar
where
    M: Maze<K, S>,
    S: Scalar,
{
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
        let size = params.size;
        let e = to_1d(params.end, size);

        let mut bound = (params.h)(params.start, params.end) * params.weight;
        let mut path = Vec::new();

        loop {
            path.clear();
            path.push(Node {
                index: to_1d(params.start, size),
                g: S::ZERO,
                f: bound,
            });
            match search(&mut path, bound, e, params) {
                Outcome::Found => {
                    return path.iter().map(|node| to_nd(node.index, size)).collect();
                }
                Outcome::Min(next) => {
                    // No f exceeded the bound anywhere: the reachable
                    // space is exhausted and the goal is not in it.
                    if next == S::MAX || next.key_cmp(bound).is_le() {
                        return Vec::new();
                    }
                    bound = next;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::manhattan;
    use crate::solve::solve;
    use chdr_core::Grid;

    #[test]
    fn open_grid_minimum_hops() {
        let grid: Grid<2, u32> = Grid::new([3, 3], vec![0; 9]);
        let params = Params::new(&grid, [0, 0], [2, 2], [3, 3], manhattan);
        let path = solve::<IdaStar, _, 2, u32>(&params);
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], [0, 0]);
        assert_eq!(path[4], [2, 2]);
    }

    #[test]
    fn wall_detour_still_minimal() {
        let mut cells = vec![0u32; 9];
        cells[4] = u32::MAX;
        let grid = Grid::new([3, 3], cells);
        let params = Params::new(&grid, [0, 0], [2, 2], [3, 3], manhattan);
        let path = solve::<IdaStar, _, 2, u32>(&params);
        assert_eq!(path.len(), 5);
        assert!(!path.contains(&[1, 1]));
    }

    #[test]
    fn bound_grows_past_the_estimate() {
        // A U-shaped detour: true cost far exceeds manhattan(start, end).
        let mut cells = vec![0u32; 25];
        for y in 0..4 {
            cells[to_1d([2, y], [5, 5])] = u32::MAX;
        }
        let grid = Grid::new([5, 5], cells);
        let params = Params::new(&grid, [0, 0], [4, 0], [5, 5], manhattan);
        let path = solve::<IdaStar, _, 2, u32>(&params);
        assert_eq!(path.len(), 13);
    }

    #[test]
    fn unreachable_goal_terminates_empty() {
        let mut cells = vec![0u32; 9];
        for y in 0..3 {
            cells[to_1d([1, y], [3, 3])] = u32::MAX;
        }
        let grid = Grid::new([3, 3], cells);
        let params = Params::new(&grid, [0, 0], [2, 0], [3, 3], manhattan);
        assert!(solve::<IdaStar, _, 2, u32>(&params).is_empty());
    }
}
