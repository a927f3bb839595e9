//! **gridpath-core** — Grid model for A* path tracing (core types).
//!
//! This crate provides the foundational types used across the *gridpath*
//! workspace: geometry primitives, the per-cell state tag, and the [`Grid`]
//! container with its mutation API and neighbor computation. The search
//! algorithms themselves live in `gridpath-search`.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::CellState;
pub use geom::{Point, Range};
pub use grid::{Grid, GridError, Movement};
