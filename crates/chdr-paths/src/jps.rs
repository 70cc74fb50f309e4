//! JPS — jump-point search over two-dimensional grids.
//!
//! A* in which a successor is not an adjacent cell but the end of a
//! *jump*: a straight or diagonal ray walked until the goal, a forced
//! neighbour (an opening past a wall that pruning would otherwise miss)
//! or a dead end. Uniform-cost grids only, eight-way movement, no
//! cutting through wall corners.
//!
//! The forced/natural rules are written once against the fixed
//! 8-neighbour array and re-aimed with rotation tables: the natural
//! direction uses the identity permutation, +90° rotates left, 180°
//! flips, −90° rotates right.

use chdr_core::{CellWeight, Coord, DaryHeap, ExistenceSet, Grid, LinearQueue, LowMemoryUsage, Scalar, StableForwardBuf, to_1d, to_nd};

use crate::frontier::{Frontier, SizeClass, size_class};
use crate::node::{Parented, backtrack};
use crate::solve::{Params, Solver};

/// Jump-point search. Grid mazes of dimensionality 2 only.
pub struct Jps;

/// A unit direction, one signed step per axis.
pub(crate) type Dir = (i8, i8);

// The 8-neighbour array enumerates offsets lexicographically:
//
//   0 1 2        (-1,-1) (0,-1) (1,-1)
//   3 . 4   ==   (-1, 0)   .    (1, 0)
//   5 6 7        (-1, 1) (0, 1) (1, 1)
//
// Rules below address positions through one of these permutations.
const IDENTITY: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
const ROTATE_L: [usize; 8] = [2, 4, 7, 1, 6, 0, 3, 5];
const ROTATE_2: [usize; 8] = [7, 6, 5, 4, 3, 2, 1, 0];
const ROTATE_R: [usize; 8] = [5, 3, 0, 6, 1, 7, 4, 2];

pub(crate) fn rotation(dir: Dir) -> &'static [usize; 8] {
    match dir {
        (0, 0) | (1, 0) | (1, 1) => &IDENTITY,
        (0, 1) | (-1, 1) => &ROTATE_L,
        (-1, 0) | (-1, -1) => &ROTATE_2,
        (0, -1) | (1, -1) => &ROTATE_R,
        _ => unreachable!("direction components are unit steps"),
    }
}

/// The unit direction from `from` towards `to`.
pub(crate) fn delta(from: Coord<2>, to: Coord<2>) -> Dir {
    (
        (to[0] as i64 - from[0] as i64).signum() as i8,
        (to[1] as i64 - from[1] as i64).signum() as i8,
    )
}

/// Walk a ray from `from` along `dir` until a jump point or a dead end.
///
/// `from` must be an active cell — it is the first cell *after* the
/// jump's origin. Returns the jump endpoint and the number of advances
/// past `from` (so the full jump is one step longer).
pub(crate) fn jump<W: CellWeight>(
    grid: &Grid<2, W>,
    from: Coord<2>,
    dir: Dir,
    end: Coord<2>,
) -> Option<(Coord<2>, usize)> {
    let mut cur = from;
    let mut steps = 0;

    loop {
        let nbrs = grid.neighbours8(cur);
        let map = rotation(dir);

        if dir.0 == 0 || dir.1 == 0 {
            // Straight ray.
            if cur == end {
                return Some((cur, steps));
            }
            if (nbrs[map[2]].0 && !nbrs[map[1]].0) || (nbrs[map[7]].0 && !nbrs[map[6]].0) {
                return Some((cur, steps)); // forced neighbour
            }
            if nbrs[map[4]].0 {
                cur = nbrs[map[4]].1;
                steps += 1;
                continue;
            }
            return None;
        }

        // Diagonal ray. Both cells beside the arrival step walled means
        // the diagonal was a corner cut; reject it.
        if !nbrs[map[1]].0 && !nbrs[map[3]].0 {
            return None;
        }
        if cur == end {
            return Some((cur, steps));
        }
        if (nbrs[map[2]].0 && !nbrs[map[1]].0) || (nbrs[map[5]].0 && !nbrs[map[3]].0) {
            return Some((cur, steps)); // forced neighbour
        }
        // A jump along either axis component makes this a jump point.
        // The ray direction is the delta to the component cell (the
        // rotation decides which axis sits at which position).
        if nbrs[map[4]].0 && jump(grid, nbrs[map[4]].1, delta(cur, nbrs[map[4]].1), end).is_some()
        {
            return Some((cur, steps));
        }
        if nbrs[map[6]].0 && jump(grid, nbrs[map[6]].1, delta(cur, nbrs[map[6]].1), end).is_some()
        {
            return Some((cur, steps));
        }
        if nbrs[map[7]].0 {
            cur = nbrs[map[7]].1;
            steps += 1;
            continue;
        }
        return None;
    }
}

/// Jump successors of `coord` reached along `dir`, as
/// `(endpoint, distance-in-steps)` pairs. The all-zero direction (the
/// start vertex) fans out into every open neighbour.
pub(crate) fn successors<W: CellWeight>(
    grid: &Grid<2, W>,
    coord: Coord<2>,
    dir: Dir,
    end: Coord<2>,
    out: &mut Vec<(Coord<2>, usize)>,
) {
    out.clear();
    let nbrs = grid.neighbours8(coord);
    let map = rotation(dir);

    let mut probe = |cell: Coord<2>, along: Dir, out: &mut Vec<(Coord<2>, usize)>| {
        if let Some((jp, steps)) = jump(grid, cell, along, end) {
            out.push((jp, steps + 1));
        }
    };

    if dir == (0, 0) {
        for (active, cell) in nbrs {
            if active {
                probe(cell, delta(coord, cell), out);
            }
        }
    } else if dir.0 == 0 || dir.1 == 0 {
        // Straight: the natural continuation plus the two forced
        // diagonals past walls.
        if nbrs[map[2]].0 && !nbrs[map[1]].0 {
            probe(nbrs[map[2]].1, delta(coord, nbrs[map[2]].1), out);
        }
        if nbrs[map[7]].0 && !nbrs[map[6]].0 {
            probe(nbrs[map[7]].1, delta(coord, nbrs[map[7]].1), out);
        }
        if nbrs[map[4]].0 {
            probe(nbrs[map[4]].1, dir, out);
        }
    } else if nbrs[map[1]].0 || nbrs[map[3]].0 {
        // Diagonal (when not corner-cut): forced openings, both axis
        // components, and the diagonal continuation.
        if nbrs[map[2]].0 && !nbrs[map[1]].0 {
            probe(nbrs[map[2]].1, delta(coord, nbrs[map[2]].1), out);
        }
        if nbrs[map[5]].0 && !nbrs[map[3]].0 {
            probe(nbrs[map[5]].1, delta(coord, nbrs[map[5]].1), out);
        }
        if nbrs[map[4]].0 {
            probe(nbrs[map[4]].1, delta(coord, nbrs[map[4]].1), out);
        }
        if nbrs[map[6]].0 {
            probe(nbrs[map[6]].1, delta(coord, nbrs[map[6]].1), out);
        }
        if nbrs[map[7]].0 {
            probe(nbrs[map[7]].1, dir, out);
        }
    }
}

/// Expand a chain of jump points into unit steps. Every consecutive
/// pair lies on a straight or diagonal ray.
pub(crate) fn interpolate(points: &[Coord<2>]) -> Vec<Coord<2>> {
    let mut path = Vec::with_capacity(points.len());
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let d = delta(a, b);
        let mut cur = a;
        while cur != b {
            path.push(cur);
            cur = [
                cur[0].wrapping_add_signed(d.0 as isize),
                cur[1].wrapping_add_signed(d.1 as isize),
            ];
        }
    }
    if let Some(last) = points.last() {
        path.push(*last);
    }
    path
}

// ---------------------------------------------------------------------------
// The A* shell over jump successors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Node<S> {
    index: usize,
    direction: Dir,
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

fn run<F, W, S>(params: &Params<'_, Grid<2, W>, 2, S>) -> Vec<Coord<2>>
where
    F: Frontier<Node<S>>,
    W: CellWeight,
    S: Scalar,
{
    let grid = params.maze;
    let size = params.size;
    let e = to_1d(params.end, size);
    let capacity = params.capacity_hint();

    let mut closed = ExistenceSet::<LowMemoryUsage>::with_capacity(capacity);
    let mut open = F::with_capacity(capacity / 8);
    let mut parents = StableForwardBuf::<Node<S>>::new();
    let mut succ = Vec::with_capacity(8);

    open.push(Node {
        index: to_1d(params.start, size),
        direction: (0, 0),
        g: S::ZERO,
        f: (params.h)(params.start, params.end) * params.weight,
        parent: None,
    });

    while let Some(curr) = open.pop() {
        if curr.index == e {
            let points = backtrack(&curr, &parents, size);
            return interpolate(&points);
        }
        if closed.contains(curr.index) {
            continue;
        }
        closed.preallocate(curr.index, capacity, grid.count());
        closed.add(curr.index);

        let coord = to_nd(curr.index, size);
        successors(grid, coord, curr.direction, params.end, &mut succ);

        let mut link = None;
        for &(jp, steps) in &succ {
            let index = to_1d(jp, size);
            if closed.contains(index) {
                continue;
            }
            let parent = *link.get_or_insert_with(|| parents.push(curr));
            let g = curr.g + S::from_usize(steps);
            open.push(Node {
                index,
                direction: delta(coord, jp),
                g,
                f: g + (params.h)(jp, params.end) * params.weight,
                parent: Some(parent),
            });
        }
    }

    Vec::new()
}

impl<W, S> Solver<Grid<2, W>, 2, S> for Jps
where
    W: CellWeight,
    S: Scalar,
{
    fn execute(params: &Params<'_, Grid<2, W>, 2, S>) -> Vec<Coord<2>> {
        match size_class(params.maze.count()) {
            SizeClass::Linear16 => run::<LinearQueue<Node<S>, 16>, W, S>(params),
            SizeClass::Linear32 => run::<LinearQueue<Node<S>, 32>, W, S>(params),
            SizeClass::Linear64 => run::<LinearQueue<Node<S>, 64>, W, S>(params),
            SizeClass::Linear128 => run::<LinearQueue<Node<S>, 128>, W, S>(params),
            SizeClass::Heap => run::<DaryHeap<Node<S>, 2>, W, S>(params),
        }
    }
}
