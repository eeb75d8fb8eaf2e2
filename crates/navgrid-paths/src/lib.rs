//! Weighted A* search over square grids.
//!
//! The entry point is [`Pathfinder`], which owns and reuses its search caches
//! so that repeated queries on the same grid incur no allocations after
//! warm-up. When the goal cannot be reached the search still returns a usable
//! partial path, chosen by the configured [`PartialPolicy`].
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | per-step cost |
//! | [`AstarPather`] : [`WeightedPather`] | admissible heuristic |
//!
//! [`SquareGrid`](navgrid_core::SquareGrid) implements all three.

mod config;
mod distance;
mod error;
mod pathfinder;
mod queue;
mod traits;

pub use config::{PartialPolicy, SearchConfig};
pub use distance::{chebyshev, manhattan, octile};
pub use error::SearchError;
pub use pathfinder::{Pathfinder, SearchResult};
pub use queue::PriorityQueue;
pub use traits::{AstarPather, Pather, WeightedPather};
