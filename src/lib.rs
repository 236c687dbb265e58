//! Facade crate for the Caravan CVRP toolkit.
//!
//! This crate re-exports the core instance/model/decoding types and exposes
//! optional solver backends behind feature flags.

#![forbid(unsafe_code)]

pub use caravan_core::{
    Aggregate, Assignment, CAPACITY_DIMENSION, CapacityDimension, DecodeError, DecodedRoute,
    DistanceMatrix, DistancePolicy, FirstSolutionStrategy, FormatError, IndexMapping, Instance,
    InstanceError, MatrixIndexError, ModelError, Node, NodeId, RouteCursor, RoutingModel,
    RoutingSolver, SearchConfig, SolveError, Solution, SolutionReport, build_matrix, decode,
    min_fleet, parse_instance,
};

#[cfg(feature = "solver-vrp")]
pub use caravan_solver_vrp::{VrpSolver, VrpSolverConfig};

#[cfg(feature = "solver-ortools")]
pub use caravan_solver_ortools::OrtoolsSolver;
