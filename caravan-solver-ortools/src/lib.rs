//! Optional OR-Tools-based routing backend.
//!
//! This crate currently provides a stub backend that compiles behind the
//! `solver-ortools` feature flag. It reserves the API surface for a future
//! binding to the OR-Tools constraint solver (routing index manager,
//! transit/demand callbacks, capacity dimension) without pulling native
//! dependencies yet.

#![forbid(unsafe_code)]

use caravan_core::{Assignment, RoutingModel, RoutingSolver, SearchConfig, SolveError};

/// Placeholder backend for the optional OR-Tools binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrtoolsSolver;

impl OrtoolsSolver {
    /// Construct a placeholder OR-Tools backend.
    pub const fn new() -> Self {
        Self
    }
}

impl RoutingSolver for OrtoolsSolver {
    fn solve(
        &self,
        _model: &RoutingModel,
        _config: &SearchConfig,
    ) -> Result<Box<dyn Assignment>, SolveError> {
        Err(SolveError::Unsupported)
    }
}
