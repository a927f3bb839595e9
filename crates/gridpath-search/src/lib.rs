//! A* shortest-path search with visual progress tracing.
//!
//! This crate implements the search engine over `gridpath-core` grids:
//!
//! - **[`AStarSearch`]** — the orchestrator: pops the lowest-cost frontier
//!   cell, expands neighbors, updates costs, detects termination.
//! - **[`PriorityFrontier`]** — the exploration queue, min-ordered by
//!   `(f_cost, insertion sequence)` so equal-cost ties resolve
//!   deterministically.
//! - **[`SearchObserver`]** — the progress seam: a presentation shell
//!   receives every frontier/closed transition and the final route without
//!   the core depending on any rendering runtime.
//! - **[`Context`]** — cooperative cancellation, checked at every step
//!   boundary.
//!
//! Heuristics are plain functions; [`manhattan`] is the admissible and
//! consistent choice for the default 4-directional movement, [`chebyshev`]
//! the counterpart when diagonals are enabled.
//!
//! Absence of a path is a normal outcome ([`SearchResult::NoPathExists`]),
//! never an error; [`SearchError`] is reserved for misuse (missing
//! endpoints) and internal defects.

mod astar;
mod context;
mod distance;
mod frontier;
mod observer;
mod reconstruct;

pub use astar::{AStarConfig, AStarSearch, SearchError, SearchResult};
pub use context::Context;
pub use distance::{chebyshev, manhattan};
pub use frontier::{EmptyFrontier, PriorityFrontier};
pub use observer::{SearchObserver, TraceRecorder};
