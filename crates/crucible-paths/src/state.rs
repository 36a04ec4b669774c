use std::fmt;

use crucible_core::{Direction, Point};

use crate::search::SolveError;

/// Bounds on the length of every straight run.
///
/// A traveler must move at least `min_run` cells in one direction before
/// turning, and must turn after at most `max_run` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PolicyRepr", into = "PolicyRepr")
)]
pub struct RunPolicy {
    min_run: u32,
    max_run: u32,
}

impl RunPolicy {
    /// Runs of one to three cells.
    pub const STANDARD: Self = Self {
        min_run: 1,
        max_run: 3,
    };

    /// Runs of four to ten cells.
    pub const ULTRA: Self = Self {
        min_run: 4,
        max_run: 10,
    };

    /// Create a policy. Requires `1 <= min_run <= max_run`.
    pub fn new(min_run: u32, max_run: u32) -> Result<Self, SolveError> {
        if min_run == 0 || max_run < min_run {
            return Err(SolveError::InvalidPolicy { min_run, max_run });
        }
        Ok(Self { min_run, max_run })
    }

    #[inline]
    pub fn min_run(self) -> u32 {
        self.min_run
    }

    #[inline]
    pub fn max_run(self) -> u32 {
        self.max_run
    }

    /// Whether a run of `len` cells is allowed.
    #[inline]
    pub fn allows(self, len: u32) -> bool {
        (self.min_run..=self.max_run).contains(&len)
    }
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for RunPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min_run, self.max_run)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PolicyRepr {
    min_run: u32,
    max_run: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<PolicyRepr> for RunPolicy {
    type Error = SolveError;

    fn try_from(r: PolicyRepr) -> Result<Self, Self::Error> {
        Self::new(r.min_run, r.max_run)
    }
}

#[cfg(feature = "serde")]
impl From<RunPolicy> for PolicyRepr {
    fn from(p: RunPolicy) -> Self {
        Self {
            min_run: p.min_run,
            max_run: p.max_run,
        }
    }
}

/// A node of the search graph: standing on `pos` after arriving along `dir`.
///
/// The same cell is a different state for each incoming direction, since
/// the direction decides where the next run may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchState {
    pub pos: Point,
    pub dir: Direction,
}

impl SearchState {
    #[inline]
    pub const fn new(pos: Point, dir: Direction) -> Self {
        Self { pos, dir }
    }

    /// The synthetic state at `pos` before any run is committed.
    #[inline]
    pub const fn start(pos: Point) -> Self {
        Self {
            pos,
            dir: Direction::Still,
        }
    }

    #[inline]
    pub fn is_start(self) -> bool {
        self.dir == Direction::Still
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} heading {}", self.pos, self.dir)
    }
}
