//! Solver capability surface.
//!
//! The core depends on this narrow trait pair, not on any concrete solver
//! library. A backend consumes a [`RoutingModel`](crate::RoutingModel) and
//! answers with an [`Assignment`]: an opaque query surface over per-vehicle
//! index chains that the decoder walks.

use std::time::Duration;

use thiserror::Error;

use crate::model::RoutingModel;

/// Opaque position within a vehicle's route chain.
///
/// Cursors are minted by backends via [`RouteCursor::new`] and only ever
/// handed back to the same [`Assignment`] that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteCursor {
    vehicle: u32,
    leg: u32,
}

impl RouteCursor {
    /// Cursor at position `leg` of `vehicle`'s chain. Backend-facing.
    pub fn new(vehicle: usize, leg: usize) -> Self {
        Self {
            vehicle: u32::try_from(vehicle).unwrap_or(u32::MAX),
            leg: u32::try_from(leg).unwrap_or(u32::MAX),
        }
    }

    /// Vehicle this cursor belongs to.
    pub fn vehicle(self) -> usize {
        self.vehicle as usize
    }

    /// Position within the vehicle's chain.
    pub fn leg(self) -> usize {
        self.leg as usize
    }
}

/// Heuristic used to construct the initial feasible route set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FirstSolutionStrategy {
    /// Insert the cheapest arc first.
    #[default]
    CheapestArc,
    /// Let the backend pick.
    Automatic,
}

/// Explicit search knobs; no hidden defaults inside backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// First-solution construction heuristic.
    pub first_solution: FirstSolutionStrategy,
    /// Wall-clock budget for the blocking solve call; `None` leaves the
    /// backend's own stopping rule in charge.
    pub time_limit: Option<Duration>,
}

/// Errors returned by [`RoutingSolver::solve`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SolveError {
    /// No feasible assignment was found: the fleet may be too small, the
    /// capacity unsatisfiable, or the time budget exhausted first. A normal,
    /// reportable outcome; retrying with more vehicles or time is the
    /// caller's decision.
    #[error("no feasible assignment found")]
    Infeasible,
    /// The backend is a stub or was compiled without its native bindings.
    #[error("solver backend is not available")]
    Unsupported,
    /// The backend failed internally.
    #[error("solver backend failed: {0}")]
    Backend(String),
}

/// Query surface over a solver's raw per-vehicle route chains.
///
/// Each vehicle's chain runs from [`Assignment::start`] to the cursor for
/// which [`Assignment::is_end`] holds; the end cursor carries the terminal
/// node (normally the depot). Calling [`Assignment::next`] on an end cursor
/// is backend-defined and decoders never do it.
pub trait Assignment {
    /// Start cursor for a vehicle.
    fn start(&self, vehicle: usize) -> RouteCursor;
    /// Whether this cursor is the chain's end sentinel.
    fn is_end(&self, cursor: RouteCursor) -> bool;
    /// The cursor following `cursor` in its chain.
    fn next(&self, cursor: RouteCursor) -> RouteCursor;
    /// Dense node index at `cursor`.
    fn node(&self, cursor: RouteCursor) -> usize;
    /// Cost of traversing from `from` to `to` with `vehicle`.
    fn arc_cost(&self, from: RouteCursor, to: RouteCursor, vehicle: usize) -> i64;
}

/// Searches for routes satisfying a model's constraints.
///
/// Implementations block for at most the configured time budget and must be
/// `Send + Sync`; the pipeline itself stays single-threaded.
pub trait RoutingSolver: Send + Sync {
    /// Runs the search, producing an assignment or a [`SolveError`].
    fn solve(
        &self,
        model: &RoutingModel,
        config: &SearchConfig,
    ) -> Result<Box<dyn Assignment>, SolveError>;
}
