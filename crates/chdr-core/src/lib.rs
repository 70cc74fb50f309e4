//! **chdr-core** — maze models, containers and arenas for grid/graph
//! pathfinding.
//!
//! This crate provides the foundational types used across the *chdr*
//! workspace: coordinate/index conversion, the cell-weight model, the maze
//! representations ([`Grid`] and [`Graph`]), and the data structures that
//! give the search algorithms their performance character:
//!
//! - [`DaryHeap`] — array-backed D-ary min-heap
//! - [`LinearQueue`] — unsorted, stack-buffered priority queue for small
//!   frontiers
//! - [`ExistenceSet`] — dense membership set with selectable storage layout
//! - [`StableForwardBuf`] — block-chained buffer with stable slots
//! - [`AppendArena`], [`PoolArena`], [`BumpArena`] — solver-local node
//!   stores addressed by `u32` handles
//! - [`RingQueue`] — growable circular FIFO

pub mod arena;
pub mod buf;
pub mod coords;
pub mod existence;
pub mod graph;
pub mod grid;
pub mod heap;
pub mod linear;
pub mod ring;
pub mod scalar;
pub mod weight;

pub use arena::{AppendArena, BumpArena, PoolArena};
pub use buf::StableForwardBuf;
pub use coords::{Coord, product, to_1d, to_nd};
pub use existence::{
    Balanced, ExistenceSet, HighestPerformance, LowMemoryUsage, LowestMemoryUsage, MemoryLayout,
};
pub use graph::{Edge, Graph};
pub use grid::Grid;
pub use heap::DaryHeap;
pub use linear::LinearQueue;
pub use ring::RingQueue;
pub use scalar::Scalar;
pub use weight::CellWeight;
