//! **chdr-paths** — shortest-path search over weighted grids and graphs.
//!
//! This crate provides the algorithm family of the *chdr* workspace. A
//! query is described by a [`Params`] record — maze, start, end,
//! heuristic, weight multiplier, optional capacity and memory bound — and
//! handed to [`solve`], which validates it and dispatches to the chosen
//! algorithm:
//!
//! | algorithm | frontier | parent store |
//! |---|---|---|
//! | [`AStar`] | binary heap keyed `(f, g)` | append arena |
//! | [`BStar`] | heap / linear queue keyed `h` | stable forward buffer |
//! | [`Dijkstra`] | heap / linear queue keyed `g` | append arena |
//! | [`Bfs`], [`Dfs`] | ring queue / stack | stable forward buffer |
//! | [`Gbfs`], [`Gdfs`] | ring queue / stack | reference-counted links |
//! | [`GStar`] | binary heap keyed `(f, g)` | reference-counted links |
//! | [`Fstar`] | sorted fringe layers | stable forward buffer |
//! | [`Jps`], [`Gjps`] | heap / linear queue keyed `(f, g)` | buffer / pool |
//! | [`Iddfs`], [`IdaStar`], [`IdbStar`] | the path itself | — |
//! | [`Eiddfs`], [`EidaStar`], [`EidbStar`] | the path + a transposition table | — |
//! | [`EsmgStar`] | bounded heap over a node tree | reference-counted tree |
//!
//! Every search returns the full path from start to goal inclusive, or an
//! empty vector when the query is invalid or no path exists.
//! [`flood_fill`] answers reachability only.
//!
//! # Example
//!
//! ```
//! use chdr_core::Grid;
//! use chdr_paths::{AStar, Params, heuristics, solve};
//!
//! let grid: Grid<2, u32> = Grid::new([3, 3], vec![0; 9]);
//! let params = Params::new(&grid, [0, 0], [2, 2], [3, 3], heuristics::manhattan);
//! let path = solve::<AStar, _, 2, u32>(&params);
//! assert_eq!(path.len(), 5);
//! ```

pub mod heuristics;
pub mod maze;
pub mod solve;

mod frontier;
mod node;

mod astar;
mod bfs;
mod bstar;
mod dfs;
mod dijkstra;
mod eidastar;
mod eidbstar;
mod eiddfs;
mod esmgstar;
mod floodfill;
mod fstar;
mod gbfs;
mod gdfs;
mod gjps;
mod gstar;
mod idastar;
mod idbstar;
mod iddfs;
mod jps;

pub use astar::AStar;
pub use bfs::Bfs;
pub use bstar::BStar;
pub use dfs::Dfs;
pub use dijkstra::Dijkstra;
pub use eidastar::EidaStar;
pub use eidbstar::EidbStar;
pub use eiddfs::Eiddfs;
pub use esmgstar::EsmgStar;
pub use floodfill::flood_fill;
pub use fstar::Fstar;
pub use gbfs::Gbfs;
pub use gdfs::Gdfs;
pub use gjps::Gjps;
pub use gstar::GStar;
pub use idastar::IdaStar;
pub use idbstar::IdbStar;
pub use iddfs::Iddfs;
pub use jps::Jps;
pub use maze::{Maze, NodeData};
pub use solve::{Params, Solver, solve};
