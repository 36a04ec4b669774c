//! Run-length constrained shortest paths over cost grids.
//!
//! A traveler moves orthogonally across a [`CostGrid`], paying the cost of
//! every cell it enters. Each straight run must be at least
//! [`RunPolicy::min_run`] and at most [`RunPolicy::max_run`] cells long,
//! after which the traveler has to turn 90°.
//!
//! - [`RunSearch::solve`] / [`solve`]: minimal cost to a goal cell
//! - [`RunSearch::route`]: one optimal path, cell by cell
//! - [`RunSearch::cost_map`]: minimal cost of every reachable state
//!
//! The search is built on [`MinQueue`], a generic min-priority queue.
//!
//! [`CostGrid`]: crucible_core::CostGrid

mod queue;
mod search;
mod state;

pub use queue::{EmptyQueueError, MinQueue};
pub use search::{Endpoint, Outcome, Route, RunSearch, SolveError, solve};
pub use state::{RunPolicy, SearchState};
