//! Query parameters, the [`Solver`] trait and the validating [`solve`]
//! entry point.
//!
//! Every algorithm shares the same outer contract:
//!
//! 1. start and end are converted to linear indices;
//! 2. an out-of-bounds or inactive endpoint rejects the query (empty
//!    path — deliberately indistinguishable from "no path");
//! 3. `start == end` short-circuits to `[end]`;
//! 4. otherwise the algorithm's `execute` runs.

use chdr_core::{Coord, Scalar, to_1d};

use crate::maze::Maze;

/// A search query.
///
/// `h` estimates remaining distance and is scaled by `weight`; algorithms
/// that ignore heuristics simply never call it. `capacity` seeds internal
/// containers, and `memory_limit` caps the open set of bounded-memory
/// searches.
pub struct Params<'a, M, const K: usize, S: Scalar> {
    pub maze: &'a M,
    pub start: Coord<K>,
    pub end: Coord<K>,
    pub size: Coord<K>,
    pub h: fn(Coord<K>, Coord<K>) -> S,
    pub weight: S,
    pub capacity: usize,
    pub memory_limit: usize,
}

// Copying a query copies the maze reference, not the maze.
impl<M, const K: usize, S: Scalar> Clone for Params<'_, M, K, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, const K: usize, S: Scalar> Copy for Params<'_, M, K, S> {}

impl<'a, M, const K: usize, S: Scalar> Params<'a, M, K, S> {
    /// A query with unit weight, no capacity hint and an unbounded open
    /// set.
    #[must_use]
    pub fn new(
        maze: &'a M,
        start: Coord<K>,
        end: Coord<K>,
        size: Coord<K>,
        h: fn(Coord<K>, Coord<K>) -> S,
    ) -> Self {
        Self {
            maze,
            start,
            end,
            size,
            h,
            weight: S::ONE,
            capacity: 0,
            memory_limit: usize::MAX,
        }
    }

    /// Scale the heuristic by `weight`.
    #[must_use]
    pub fn with_weight(mut self, weight: S) -> Self {
        self.weight = weight;
        self
    }

    /// Seed internal containers for roughly `capacity` vertices.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Cap the open set of bounded-memory searches.
    #[must_use]
    pub fn with_memory_limit(mut self, memory_limit: usize) -> Self {
        self.memory_limit = memory_limit;
        self
    }

    /// The capacity the closed set is grown towards: the caller's hint,
    /// but never below the endpoint indices themselves.
    #[must_use]
    pub(crate) fn capacity_hint(&self) -> usize {
        let s = to_1d(self.start, self.size);
        let e = to_1d(self.end, self.size);
        self.capacity.max(s.max(e))
    }
}

/// A search algorithm: the body run after [`solve`]'s pre-validation.
pub trait Solver<M, const K: usize, S: Scalar> {
    /// Run the search. `params` has already passed validation and
    /// `start != end`.
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>>;
}

/// Validate `params` and run algorithm `A`.
///
/// Returns the path from start to end inclusive, or an empty vector when
/// the query is rejected or no path exists.
pub fn solve<A, M, const K: usize, S>(params: &Params<'_, M, K, S>) -> Vec<Coord<K>>
where
    A: Solver<M, K, S>,
    M: Maze<K, S>,
    S: Scalar,
{
    let Some((s, e)) = validate(params) else {
        return Vec::new();
    };
    if s == e {
        return vec![params.end];
    }
    A::execute(params)
}

/// The shared bounds/activity checks; `None` rejects the query.
pub(crate) fn validate<M, const K: usize, S>(params: &Params<'_, M, K, S>) -> Option<(usize, usize)>
where
    M: Maze<K, S>,
    S: Scalar,
{
    let in_bounds = |c: Coord<K>| (0..K).all(|i| c[i] < params.size[i]);
    if !in_bounds(params.start) || !in_bounds(params.end) {
        return None;
    }
    let s = to_1d(params.start, params.size);
    let e = to_1d(params.end, params.size);
    let valid = params.maze.contains(s)
        && params.maze.contains(e)
        && params.maze.is_active(s)
        && params.maze.is_active(e);
    valid.then_some((s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics;
    use chdr_core::Grid;

    struct Never;

    impl<M, const K: usize, S: Scalar> Solver<M, K, S> for Never {
        fn execute(_params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
            panic!("execute() must not run for rejected or trivial queries");
        }
    }

    fn grid() -> Grid<2, u32> {
        let mut cells = vec![0u32; 9];
        cells[4] = u32::MAX;
        Grid::new([3, 3], cells)
    }

    #[test]
    fn out_of_bounds_is_rejected_without_running() {
        let grid = grid();
        let params = Params::new(&grid, [0, 0], [3, 0], [3, 3], heuristics::manhattan::<2, u32>);
        assert!(solve::<Never, _, 2, u32>(&params).is_empty());
    }

    #[test]
    fn inactive_endpoint_is_rejected() {
        let grid = grid();
        let params = Params::new(&grid, [1, 1], [2, 2], [3, 3], heuristics::manhattan::<2, u32>);
        assert!(solve::<Never, _, 2, u32>(&params).is_empty());
        let params = Params::new(&grid, [0, 0], [1, 1], [3, 3], heuristics::manhattan::<2, u32>);
        assert!(solve::<Never, _, 2, u32>(&params).is_empty());
    }

    #[test]
    fn identical_endpoints_short_circuit() {
        let grid = grid();
        let params = Params::new(&grid, [1, 0], [1, 0], [3, 3], heuristics::manhattan::<2, u32>);
        assert_eq!(solve::<Never, _, 2, u32>(&params), vec![[1, 0]]);
    }

    #[test]
    fn capacity_hint_covers_the_endpoints() {
        let grid = grid();
        let params = Params::new(&grid, [0, 0], [2, 2], [3, 3], heuristics::manhattan::<2, u32>);
        assert_eq!(params.capacity_hint(), 8);
        assert_eq!(params.with_capacity(100).capacity_hint(), 100);
    }
}
