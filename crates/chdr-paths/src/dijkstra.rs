//! Dijkstra — uniform-cost search, expanding in non-decreasing g order.

use chdr_core::{AppendArena, Coord, DaryHeap, ExistenceSet, LinearQueue, LowMemoryUsage, Scalar, to_1d};

use crate::frontier::{Frontier, SizeClass, size_class};
use crate::maze::Maze;
use crate::node::{Parented, backtrack};
use crate::solve::{Params, Solver};

/// Dijkstra's algorithm: best-first on accumulated distance alone. The
/// heuristic in the query is never consulted.
pub struct Dijkstra;

#[derive(Debug, Clone, Copy)]
struct Node<S> {
    index: usize,
    g: S,
    parent: Option<u32>,
}

impl<S: Scalar> PartialEq for Node<S> {
    fn eq(&self, other: &Self) -> bool {
        self.g == other.g && self.index == other.index
    }
}

impl<S: Scalar> Eq for Node<S> {}

impl<S: Scalar> Ord for Node<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.g.key_cmp(other.g).then(self.index.cmp(&other.index))
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

fn run<F, M, const K: usize, S>(params: &Params<'_, M, K, S>) -> Vec<Coord<K>>
where
    F: Frontier<Node<S>>,
    M: Maze<K, S>,
    S: Scalar,
{
    let size = params.size;
    let e = to_1d(params.end, size);
    let capacity = params.capacity_hint();

    let mut closed = ExistenceSet::<LowMemoryUsage>::with_capacity(capacity);
    let mut open = F::with_capacity(capacity / 8);
    let mut parents = AppendArena::new();
    let mut nbuf = Vec::with_capacity(2 * K);

    open.push(Node {
        index: to_1d(params.start, size),
        g: S::ZERO,
        parent: None,
    });

    while let Some(curr) = open.pop() {
        if curr.index == e {
            return backtrack(&curr, &parents, size);
        }
        if closed.contains(curr.index) {
            continue;
        }
        closed.preallocate(curr.index, capacity, params.maze.count());
        closed.add(curr.index);

        params.maze.neighbours_into(curr.index, size, &mut nbuf);
        let mut link = None;
        for n in &nbuf {
            if closed.contains(n.index) {
                continue;
            }
            let parent = *link.get_or_insert_with(|| parents.push(curr));
            open.push(Node {
                index: n.index,
                g: curr.g + n.distance,
                parent: Some(parent),
            });
        }
    }

    Vec::new()
}

impl<M, const K: usize, S> Solver<M, K, S> for Dijkstra
where
    M: Maze<K, S>,
    S: Scalar,
{
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
        match size_class(params.maze.count()) {
            SizeClass::Linear16 => run::<LinearQueue<Node<S>, 16>, M, K, S>(params),
            SizeClass::Linear32 => run::<LinearQueue<Node<S>, 32>, M, K, S>(params),
            SizeClass::Linear64 => run::<LinearQueue<Node<S>, 64>, M, K, S>(params),
            SizeClass::Linear128 => run::<LinearQueue<Node<S>, 128>, M, K, S>(params),
            SizeClass::Heap => run::<DaryHeap<Node<S>, 2>, M, K, S>(params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::zero;
    use crate::solve::solve;
    use chdr_core::{Edge, Graph, Grid};

    #[test]
    fn unit_grid_shortest_path() {
        let grid: Grid<2, u32> = Grid::new([4, 4], vec![0; 16]);
        let params = Params::new(&grid, [0, 0], [3, 3], [4, 4], zero);
        let path = solve::<Dijkstra, _, 2, u32>(&params);
        assert_eq!(path.len(), 7);
        assert_eq!(path[0], [0, 0]);
        assert_eq!(path[6], [3, 3]);
    }

    #[test]
    fn prefers_cheap_detours_on_graphs() {
        // Direct hop costs 10; the three-hop detour costs 3.
        let mut graph = Graph::<u32>::new();
        graph.add_edge(0, Edge::new(3, 10));
        graph.add_edge(0, Edge::new(1, 1));
        graph.add_edge(1, Edge::new(2, 1));
        graph.add_edge(2, Edge::new(3, 1));

        let params = Params::new(&graph, [0, 0], [3, 0], [4, 1], zero);
        let path = solve::<Dijkstra, _, 2, u32>(&params);
        assert_eq!(path, vec![[0, 0], [1, 0], [2, 0], [3, 0]]);
    }

    #[test]
    fn large_grid_uses_the_heap_class() {
        // 20x20 exceeds every linear threshold.
        let grid: Grid<2, u32> = Grid::new([20, 20], vec![0; 400]);
        let params = Params::new(&grid, [0, 0], [19, 19], [20, 20], zero);
        let path = solve::<Dijkstra, _, 2, u32>(&params);
        assert_eq!(path.len(), 39);
    }

    #[test]
    fn contracted_graph_preserves_shortest_distances() {
        use crate::bfs::Bfs;
        use chdr_core::Graph;

        // An H-shaped maze: two vertical corridors joined by a rung.
        let wall = u32::MAX;
        #[rustfmt::skip]
        let cells = vec![
            0, wall, wall, wall, 0,
            0, wall, wall, wall, 0,
            0, 0,    0,    0,    0,
            0, wall, wall, wall, 0,
            0, wall, wall, wall, 0,
        ];
        let grid = Grid::new([5, 5], cells);
        let start = [0, 0];
        let end = [4, 4];
        assert!(!grid.is_transitory(to_1d(start, [5, 5])));
        assert!(!grid.is_transitory(to_1d(end, [5, 5])));

        let hops = {
            let params = Params::new(&grid, start, end, [5, 5], zero::<2, u32>);
            solve::<Bfs, _, 2, u32>(&params).len() - 1
        };

        let graph = Graph::<u32>::from_grid(&grid, true);
        let params = Params::new(&graph, start, end, [5, 5], zero::<2, u32>);
        let path = solve::<Dijkstra, _, 2, u32>(&params);
        assert!(!path.is_empty());

        // Sum the cheapest stored edge along each leg of the path.
        let mut total = 0;
        for pair in path.windows(2) {
            let (u, v) = (to_1d(pair[0], [5, 5]), to_1d(pair[1], [5, 5]));
            let leg = graph
                .neighbours(u)
                .iter()
                .filter(|edge| edge.to == v)
                .map(|edge| edge.distance)
                .min()
                .expect("path legs follow stored edges");
            total += leg;
        }
        assert_eq!(total as usize, hops);
    }

    #[test]
    fn small_and_large_classes_agree_on_length() {
        // The same maze queried through the linear (25 cells) and the
        // heap body must find equally long paths.
        let mut cells = vec![0u32; 25];
        cells[12] = u32::MAX;
        let grid = Grid::new([5, 5], cells);
        let params = Params::new(&grid, [0, 0], [4, 4], [5, 5], zero);
        let linear = solve::<Dijkstra, _, 2, u32>(&params);
        let heap = run::<DaryHeap<Node<u32>, 2>, _, 2, u32>(&params);
        assert_eq!(linear.len(), heap.len());
        assert_eq!(linear.len(), 9);
    }
}
