//! GJPS — jump-point search with pool-recycled parent chains.
//!
//! The jumping rules are [`Jps`](crate::Jps)'s. The difference is node
//! lifetime: expanded nodes live in a [`PoolArena`] and carry a
//! reference count of the children still pointing at them. When a
//! branch dies — its tip is popped and yields no successors — the chain
//! of now-unreferenced ancestors is handed back to the pool
//! iteratively, so abandoned subtrees stop costing memory while the
//! search continues.

use chdr_core::{CellWeight, Coord, DaryHeap, ExistenceSet, Grid, LowMemoryUsage, PoolArena, Scalar, to_1d, to_nd};

use crate::jps::{Dir, delta, interpolate, successors};
use crate::node::{Parented, backtrack};
use crate::solve::{Params, Solver};

/// Jump-point search over a recycling node pool.
pub struct Gjps;

#[derive(Debug, Clone, Copy)]
struct Node<S> {
    index: usize,
    direction: Dir,
    g: S,
    f: S,
    parent: Option<u32>,
    /// Children still referencing this node (pool residents only).
    refs: u32,
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

/// Drop one reference on `handle`'s node and free every ancestor whose
/// reference count reaches zero. A loop, not recursion: dead chains can
/// be as long as the path was deep.
fn release<S: Scalar>(pool: &mut PoolArena<Node<S>>, mut handle: Option<u32>) {
    while let Some(h) = handle {
        let node = pool.get_mut(h);
        node.refs -= 1;
        if node.refs > 0 {
            break;
        }
        handle = node.parent;
        pool.remove(h);
    }
}

impl<W, S> Solver<Grid<2, W>, 2, S> for Gjps
where
    W: CellWeight,
    S: Scalar,
{
    fn execute(params: &Params<'_, Grid<2, W>, 2, S>) -> Vec<Coord<2>> {
        let grid = params.maze;
        let size = params.size;
        let e = to_1d(params.end, size);
        let capacity = params.capacity_hint();

        let mut closed = ExistenceSet::<LowMemoryUsage>::with_capacity(capacity);
        let mut open = DaryHeap::<Node<S>, 2>::with_capacity(capacity / 8);
        let mut pool: PoolArena<Node<S>> = PoolArena::new();
        let mut succ = Vec::with_capacity(8);

        open.push(Node {
            index: to_1d(params.start, size),
            direction: (0, 0),
            g: S::ZERO,
            f: (params.h)(params.start, params.end) * params.weight,
            parent: None,
            refs: 0,
        });

        while let Some(curr) = open.pop() {
            if curr.index == e {
                let points = backtrack(&curr, &pool, size);
                return interpolate(&points);
            }
            if closed.contains(curr.index) {
                release(&mut pool, curr.parent);
                continue;
            }
            closed.preallocate(curr.index, capacity, grid.count());
            closed.add(curr.index);

            let coord = to_nd(curr.index, size);
            successors(grid, coord, curr.direction, params.end, &mut succ);

            let admitted: Vec<(Coord<2>, usize)> = succ
                .iter()
                .copied()
                .filter(|(jp, _)| !closed.contains(to_1d(*jp, size)))
                .collect();

            if admitted.is_empty() {
                // Branch tip died; retire its chain.
                release(&mut pool, curr.parent);
                continue;
            }

            let parent = pool.insert(curr);
            pool.get_mut(parent).refs = admitted.len() as u32;
            for (jp, steps) in admitted {
                let g = curr.g + S::from_usize(steps);
                open.push(Node {
                    index: to_1d(jp, size),
                    direction: delta(coord, jp),
                    g,
                    f: g + (params.h)(jp, params.end) * params.weight,
                    parent: Some(parent),
                    refs: 0,
                });
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::chebyshev;
    use crate::jps::Jps;
    use crate::solve::solve;

    fn grid(size: Coord<2>, walls: &[Coord<2>]) -> Grid<2, u32> {
        let mut cells = vec![0u32; size[0] * size[1]];
        for w in walls {
            cells[to_1d(*w, size)] = u32::MAX;
        }
        Grid::new(size, cells)
    }

    #[test]
    fn empty_grid_runs_the_diagonal() {
        let g = grid([5, 5], &[]);
        let params = Params::new(&g, [0, 0], [4, 4], [5, 5], chebyshev);
        let path = solve::<Gjps, _, 2, u32>(&params);
        assert_eq!(path, vec![[0, 0], [1, 1], [2, 2], [3, 3], [4, 4]]);
    }

    #[test]
    fn agrees_with_jps() {
        let g = grid(
            [8, 8],
            &[[3, 1], [3, 2], [3, 3], [3, 4], [5, 6], [6, 5]],
        );
        let params = Params::new(&g, [0, 0], [7, 7], [8, 8], chebyshev);
        let pooled = solve::<Gjps, _, 2, u32>(&params);
        let plain = solve::<Jps, _, 2, u32>(&params);
        assert_eq!(pooled.len(), plain.len());
        assert_eq!(pooled.first(), Some(&[0, 0]));
        assert_eq!(pooled.last(), Some(&[7, 7]));
    }

    #[test]
    fn unreachable_goal_is_empty() {
        let g = grid([4, 4], &[[1, 0], [1, 1], [1, 2], [1, 3]]);
        let params = Params::new(&g, [0, 0], [3, 3], [4, 4], chebyshev);
        assert!(solve::<Gjps, _, 2, u32>(&params).is_empty());
    }
}
