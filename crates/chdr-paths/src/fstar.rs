//! F* — fringe search: layered expansion under a rising f threshold.
//!
//! Two sorted layers stand in for a priority queue. Everything in
//! `current` is expanded; successors whose f fits under the threshold
//! are binary-inserted into `next`, the rest only tighten the next
//! round's threshold. A vertex whose successors were all admitted is
//! closed; one that had to defer successors stays on the fringe and
//! retries once the threshold has risen.

use chdr_core::{Coord, ExistenceSet, LowMemoryUsage, Scalar, StableForwardBuf, to_1d};

use crate::maze::Maze;
use crate::node::{Parented, backtrack};
use crate::solve::{Params, Solver};

/// Fringe search.
pub struct Fstar;

#[derive(Debug, Clone, Copy)]
struct Node<S> {
    index: usize,
    g: S,
    f: S,
    parent: Option<u32>,
}

impl<S: Scalar> PartialEq for Node<S> {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g
    }
}

impl<S: Scalar> Eq for Node<S> {}

impl<S: Scalar> Ord for Node<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f.key_cmp(other.f).then(other.g.key_cmp(self.g))
    }
}

impl<S: Scalar> PartialOrd for Node<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Scalar> Parented for Node<S> {
    fn index(&self) -> usize {
        self.index
    }
    fn parent(&self) -> Option<u32> {
        self.parent
    }
}

fn insert_sorted<S: Scalar>(layer: &mut Vec<Node<S>>, node: Node<S>) {
    let pos = layer.partition_point(|other| *other < node);
    layer.insert(pos, node);
}

impl<M, const K: usize, S> Solver<M, K, S> for Fstar
where
    M: Maze<K, S>,
    S: Scalar,
{
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
        let size = params.size;
        let e = to_1d(params.end, size);
        let capacity = params.capacity_hint();

        let mut closed = ExistenceSet::<LowMemoryUsage>::with_capacity(capacity);
        let mut parents = StableForwardBuf::<Node<S>>::new();
        let mut nbuf = Vec::with_capacity(2 * K);

        let mut threshold = (params.h)(params.start, params.end) * params.weight;
        let mut current = vec![Node {
            index: to_1d(params.start, size),
            g: S::ZERO,
            f: threshold,
            parent: None,
        }];
        let mut next: Vec<Node<S>> = Vec::new();

        while !current.is_empty() {
            let mut next_threshold = S::MAX;

            for i in 0..current.len() {
                let curr = current[i];
                if curr.index == e {
                    return backtrack(&curr, &parents, size);
                }
                if closed.contains(curr.index) {
                    continue;
                }

                params.maze.neighbours_into(curr.index, size, &mut nbuf);
                let mut link = None;
                let mut deferred = false;
                for n in &nbuf {
                    if closed.contains(n.index) {
                        continue;
                    }
                    let g = curr.g + n.distance;
                    let f = g + (params.h)(n.coord, params.end) * params.weight;
                    if f.key_cmp(threshold).is_le() {
                        let parent = *link.get_or_insert_with(|| parents.push(curr));
                        insert_sorted(
                            &mut next,
                            Node {
                                index: n.index,
                                g,
                                f,
                                parent: Some(parent),
                            },
                        );
                    } else {
                        deferred = true;
                        if f.key_cmp(next_threshold).is_lt() {
                            next_threshold = f;
                        }
                    }
                }

                if deferred {
                    // Over-threshold successors exist; keep the vertex on
                    // the fringe for the next, wider round.
                    insert_sorted(&mut next, curr);
                } else {
                    closed.preallocate(curr.index, capacity, params.maze.count());
                    closed.add(curr.index);
                }
            }

            std::mem::swap(&mut current, &mut next);
            next.clear();
            threshold = next_threshold;
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::manhattan;
    use crate::solve::solve;
    use chdr_core::Grid;

    #[test]
    fn open_grid_shortest_path() {
        let grid: Grid<2, u32> = Grid::new([3, 3], vec![0; 9]);
        let params = Params::new(&grid, [0, 0], [2, 2], [3, 3], manhattan);
        let path = solve::<Fstar, _, 2, u32>(&params);
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], [0, 0]);
        assert_eq!(path[4], [2, 2]);
    }

    #[test]
    fn detour_raises_the_threshold() {
        // The wall forces f above the initial manhattan estimate, so the
        // answer only appears after threshold widening.
        let mut cells = vec![0u32; 25];
        for y in 0..4 {
            cells[to_1d([2, y], [5, 5])] = u32::MAX;
        }
        let grid = Grid::new([5, 5], cells);
        let params = Params::new(&grid, [0, 0], [4, 0], [5, 5], manhattan);
        let path = solve::<Fstar, _, 2, u32>(&params);
        assert_eq!(path.first(), Some(&[0, 0]));
        assert_eq!(path.last(), Some(&[4, 0]));
        assert_eq!(path.len(), 13);
    }

    #[test]
    fn unreachable_goal_drains() {
        let mut cells = vec![0u32; 9];
        for y in 0..3 {
            cells[to_1d([1, y], [3, 3])] = u32::MAX;
        }
        let grid = Grid::new([3, 3], cells);
        let params = Params::new(&grid, [0, 0], [2, 0], [3, 3], manhattan);
        assert!(solve::<Fstar, _, 2, u32>(&params).is_empty());
    }
}
