//! **crucible-core** — geometry and cost grids for run-constrained path
//! search.
//!
//! This crate provides the types shared by the search engine and its
//! callers: [`Point`] cells, [`Direction`] moves, [`Range`] rectangles and
//! the [`CostGrid`] with its text loader.

pub mod geom;
pub mod grid;

pub use geom::{Axis, Direction, Point, Range};
pub use grid::{CostGrid, GridError};
