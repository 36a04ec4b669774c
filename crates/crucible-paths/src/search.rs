//! Shortest paths under a run-length policy.
//!
//! The search runs Dijkstra over `(cell, incoming direction)` states. Each
//! expansion turns 90° and jumps a whole run of `min_run..=max_run` cells
//! at once, so the step count within a run never has to be part of the
//! state.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crucible_core::{CostGrid, GridError, Point};

use crate::queue::MinQueue;
use crate::state::{RunPolicy, SearchState};

/// Result of a single-goal query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The goal was reached with this minimal total cost.
    Reached(u64),
    /// No path satisfies the policy.
    Unreachable,
}

impl Outcome {
    /// The minimal cost, if reachable.
    #[inline]
    pub fn cost(self) -> Option<u64> {
        match self {
            Self::Reached(c) => Some(c),
            Self::Unreachable => None,
        }
    }

    #[inline]
    pub fn is_reachable(self) -> bool {
        matches!(self, Self::Reached(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reached(c) => write!(f, "{c}"),
            Self::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// One optimal path found by [`RunSearch::route`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Total cost of every cell entered (the start cell is free).
    pub cost: u64,
    /// Every cell visited, from start to goal inclusive.
    pub path: Vec<Point>,
    /// The state at the end of each run, in travel order.
    pub turns: Vec<SearchState>,
}

/// Which end of a query a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Goal => write!(f, "goal"),
        }
    }
}

/// Errors reported before any search work begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The grid itself could not be built.
    InvalidGrid(GridError),
    /// The start or goal cell lies outside the grid.
    OutOfBounds { endpoint: Endpoint, pos: Point },
    /// The policy violates `1 <= min_run <= max_run`.
    InvalidPolicy { min_run: u32, max_run: u32 },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid(e) => write!(f, "invalid grid: {e}"),
            Self::OutOfBounds { endpoint, pos } => {
                write!(f, "{endpoint} {pos} is outside the grid")
            }
            Self::InvalidPolicy { min_run, max_run } => write!(
                f,
                "invalid run policy {min_run}..={max_run}: need 1 <= min_run <= max_run"
            ),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidGrid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SolveError {
    fn from(e: GridError) -> Self {
        Self::InvalidGrid(e)
    }
}

/// Best known way to reach a state.
#[derive(Clone, Copy)]
struct Link {
    cost: u64,
    parent: Option<SearchState>,
}

/// Per-query search data. Dropped when the query returns.
struct Exploration {
    best: HashMap<SearchState, Link>,
    visited: HashSet<SearchState>,
    reached: Option<(SearchState, u64)>,
}

/// Run-constrained search over a borrowed cost grid.
///
/// A `RunSearch` holds no per-query state, so it can answer any number of
/// queries and identical queries give identical answers.
#[derive(Clone, Copy)]
pub struct RunSearch<'g> {
    grid: &'g CostGrid,
    policy: RunPolicy,
}

impl<'g> RunSearch<'g> {
    pub fn new(grid: &'g CostGrid, policy: RunPolicy) -> Self {
        Self { grid, policy }
    }

    #[inline]
    pub fn grid(&self) -> &'g CostGrid {
        self.grid
    }

    #[inline]
    pub fn policy(&self) -> RunPolicy {
        self.policy
    }

    /// Minimal total cost from `start` to `goal`.
    pub fn solve(&self, start: Point, goal: Point) -> Result<Outcome, SolveError> {
        self.check(Endpoint::Start, start)?;
        self.check(Endpoint::Goal, goal)?;
        if start == goal {
            return Ok(Outcome::Reached(0));
        }
        let ex = self.explore(start, Some(goal));
        Ok(match ex.reached {
            Some((_, cost)) => Outcome::Reached(cost),
            None => Outcome::Unreachable,
        })
    }

    /// Like [`solve`](Self::solve), but also returns one optimal path.
    ///
    /// Returns `Ok(None)` if the goal is unreachable.
    pub fn route(&self, start: Point, goal: Point) -> Result<Option<Route>, SolveError> {
        self.check(Endpoint::Start, start)?;
        self.check(Endpoint::Goal, goal)?;
        if start == goal {
            return Ok(Some(Route {
                cost: 0,
                path: vec![start],
                turns: Vec::new(),
            }));
        }
        let ex = self.explore(start, Some(goal));
        let Some((end, cost)) = ex.reached else {
            return Ok(None);
        };

        let mut turns = vec![end];
        let mut cur = end;
        while let Some(parent) = ex.best.get(&cur).and_then(|l| l.parent) {
            if !parent.is_start() {
                turns.push(parent);
            }
            cur = parent;
        }
        turns.reverse();

        let mut path = vec![start];
        let mut at = start;
        for t in &turns {
            while at != t.pos {
                at = at.step(t.dir, 1);
                path.push(at);
            }
        }
        Ok(Some(Route { cost, path, turns }))
    }

    /// Finalized cost of every state reachable from `start`.
    pub fn cost_map(&self, start: Point) -> Result<HashMap<SearchState, u64>, SolveError> {
        self.check(Endpoint::Start, start)?;
        let ex = self.explore(start, None);
        Ok(ex
            .visited
            .iter()
            .filter_map(|s| ex.best.get(s).map(|l| (*s, l.cost)))
            .collect())
    }

    fn check(&self, endpoint: Endpoint, pos: Point) -> Result<(), SolveError> {
        if self.grid.contains(pos) {
            Ok(())
        } else {
            Err(SolveError::OutOfBounds { endpoint, pos })
        }
    }

    /// Dijkstra from `start` until `goal` is popped or the frontier is
    /// exhausted. With no goal, every reachable state is settled.
    fn explore(&self, start: Point, goal: Option<Point>) -> Exploration {
        log::debug!(
            "run search {} on {}x{} grid from {start} to {}",
            self.policy,
            self.grid.width(),
            self.grid.height(),
            goal.map_or_else(|| "anywhere".to_string(), |g| g.to_string()),
        );

        let mut frontier: MinQueue<SearchState, u64> = MinQueue::new();
        let mut ex = Exploration {
            best: HashMap::new(),
            visited: HashSet::new(),
            reached: None,
        };

        let seed = SearchState::start(start);
        ex.best.insert(
            seed,
            Link {
                cost: 0,
                parent: None,
            },
        );
        frontier.push(seed, 0);

        // The loop guard is the only way out of the queue, so an empty
        // pop ends the search rather than signalling a fault.
        while let Ok((state, heat)) = frontier.pop() {
            if Some(state.pos) == goal {
                ex.reached = Some((state, heat));
                break;
            }
            if !ex.visited.insert(state) {
                continue;
            }
            log::trace!("settle {state} at cost {heat}");

            self.expand(state, heat, |next, cost| {
                if ex.visited.contains(&next) {
                    return;
                }
                if ex.best.get(&next).is_some_and(|l| l.cost <= cost) {
                    return;
                }
                ex.best.insert(
                    next,
                    Link {
                        cost,
                        parent: Some(state),
                    },
                );
                frontier.push(next, cost);
            });
        }

        log::debug!(
            "run search {}: {} after settling {} states ({} queued)",
            self.policy,
            ex.reached
                .map_or_else(|| "no goal".to_string(), |(_, c)| format!("cost {c}")),
            ex.visited.len(),
            frontier.len(),
        );
        ex
    }

    /// Report every state one run away from `state`, with its total cost.
    fn expand(&self, state: SearchState, heat: u64, mut relax: impl FnMut(SearchState, u64)) {
        // No straight line in the grid is longer than its larger side.
        let extent = self.grid.width().max(self.grid.height()) as u32;
        let reach = self.policy.max_run().min(extent);

        for &dir in state.dir.turns() {
            let mut run_heat = 0u64;
            for i in 1..=reach {
                let p = state.pos.step(dir, i as i32);
                // Once a run leaves the grid every longer run does too.
                let Some(c) = self.grid.at(p) else {
                    break;
                };
                run_heat += u64::from(c);
                if i >= self.policy.min_run() {
                    relax(SearchState::new(p, dir), heat + run_heat);
                }
            }
        }
    }
}

/// Minimal cost from `start` to `goal` with runs of `min_run..=max_run`
/// cells.
pub fn solve(
    grid: &CostGrid,
    start: Point,
    goal: Point,
    min_run: u32,
    max_run: u32,
) -> Result<Outcome, SolveError> {
    let policy = RunPolicy::new(min_run, max_run)?;
    RunSearch::new(grid, policy).solve(start, goal)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn outcome_round_trip() {
        for out in [Outcome::Reached(42), Outcome::Unreachable] {
            let json = serde_json::to_string(&out).unwrap();
            let back: Outcome = serde_json::from_str(&json).unwrap();
            assert_eq!(out, back);
        }
    }

    #[test]
    fn route_round_trip() {
        let grid = CostGrid::filled(3, 3, 1).unwrap();
        let route = RunSearch::new(&grid, RunPolicy::STANDARD)
            .route(Point::new(0, 0), Point::new(2, 2))
            .unwrap()
            .unwrap();
        let json = serde_json::to_string(&route).unwrap();
        let back: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(route, back);
    }
}
