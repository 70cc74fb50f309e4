//! EIDB* — iterative deepening on h with a transposition table.
//!
//! The h-keyed sibling of [`EidaStar`](crate::EidaStar): the table
//! stores the best estimate a vertex has been reached with this round,
//! and revisits without strict improvement are pruned.

use indexmap::IndexMap;

use chdr_core::{Coord, Scalar, to_1d, to_nd};

use crate::maze::{Maze, NodeData};
use crate::solve::{Params, Solver};

/// Enhanced iterative-deepening best-first search.
pub struct EidbStar;

#[derive(Debug, Clone, Copy)]
struct Node<S> {
    index: usize,
    h: S,
}

enum Outcome<S> {
    Found,
    Min(S),
}

fn search<M, const K: usize, S>(
    path: &mut Vec<Node<S>>,
    table: &mut IndexMap<usize, S>,
    bound: S,
    e: usize,
    params: &Params<'_, M, K, S>,
) -> Outcome<S>
where
    M: Maze<K, S>,
    S: Scalar,
{
    let curr = *path.last().expect("search() with an empty path");
    if curr.h.key_cmp(bound).is_gt() {
        return Outcome::Min(curr.h);
    }
    if curr.index == e {
        return Outcome::Found;
    }

    let mut nbuf: Vec<NodeData<K, S>> = Vec::with_capacity(2 * K);
    params.maze.neighbours_into(curr.index, params.size, &mut nbuf);

    let mut min = S::MAX;
    for n in nbuf {
        let h = (params.h)(n.coord, params.end) * params.weight;

        if table.get(&n.index).is_some_and(|best| h.key_cmp(*best).is_ge()) {
            continue;
        }
        table.insert(n.index, h);

        path.push(Node { index: n.index, h });
        match search(path, table, bound, e, params) {
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

impl<M, const K: usize, S> Solver<M, K, S> for EidbStar
where
    M: Maze<K, S>,
    S: Scalar,
{
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
        let size = params.size;
        let s = to_1d(params.start, size);
        let e = to_1d(params.end, size);

        let mut bound = (params.h)(params.start, params.end) * params.weight;
        let mut path = Vec::new();
        let mut table: IndexMap<usize, S> = IndexMap::new();

        loop {
            path.clear();
            table.clear();
            path.push(Node { index: s, h: bound });
            table.insert(s, bound);

            match search(&mut path, &mut table, bound, e, params) {
                Outcome::Found => {
                    return path.iter().map(|node| to_nd(node.index, size)).collect();
                }
                Outcome::Min(next) => {
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
    fn straight_line_within_first_bound() {
        let grid: Grid<2, u32> = Grid::new([3, 3], vec![0; 9]);
        let params = Params::new(&grid, [0, 0], [2, 2], [3, 3], manhattan);
        let path = solve::<EidbStar, _, 2, u32>(&params);
        assert_eq!(path.first(), Some(&[0, 0]));
        assert_eq!(path.last(), Some(&[2, 2]));
    }

    #[test]
    fn detour_maze_reaches_the_goal() {
        let mut cells = vec![0u32; 25];
        for y in 0..4 {
            cells[to_1d([2, y], [5, 5])] = u32::MAX;
        }
        let grid = Grid::new([5, 5], cells);
        let params = Params::new(&grid, [0, 0], [4, 0], [5, 5], manhattan);
        let path = solve::<EidbStar, _, 2, u32>(&params);
        assert_eq!(path.first(), Some(&[0, 0]));
        assert_eq!(path.last(), Some(&[4, 0]));
    }

    #[test]
    fn unreachable_goal_terminates_empty() {
        let mut cells = vec![0u32; 9];
        for y in 0..3 {
            cells[to_1d([1, y], [3, 3])] = u32::MAX;
        }
        let grid = Grid::new([3, 3], cells);
        let params = Params::new(&grid, [0, 0], [2, 0], [3, 3], manhattan);
        assert!(solve::<EidbStar, _, 2, u32>(&params).is_empty());
    }
}
