//! **navgrid-core** — core types for grid navigation.
//!
//! This crate provides the value types shared across the *navgrid*
//! workspace: the [`Location`] cell coordinate and the [`SquareGrid`], a
//! bounded lattice with a mutable set of impassable cells.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::Location;
pub use grid::SquareGrid;
