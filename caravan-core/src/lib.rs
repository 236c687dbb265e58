//! Core domain types for the Caravan CVRP toolkit.
//!
//! The pipeline implemented here is deliberately narrow: parse a fixed-layout
//! CVRPLIB-style instance into a validated [`Instance`], derive an integer
//! [`DistanceMatrix`] plus an id/index [`IndexMapping`] under an explicit
//! [`DistancePolicy`], size the fleet from aggregate demand, assemble a
//! [`RoutingModel`] exposing arc-cost and demand lookups, hand the model to a
//! [`RoutingSolver`] backend, and [`decode`] the backend's [`Assignment`]
//! back into routes over the original node ids.
//!
//! The combinatorial search itself lives behind the [`RoutingSolver`] trait;
//! this crate never runs it. All core structures are built once per solve and
//! immutable afterwards.

#![forbid(unsafe_code)]

pub mod decode;
pub mod fleet;
pub mod instance;
pub mod matrix;
pub mod model;
pub mod parser;
pub mod report;
pub mod solver;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use decode::{DecodeError, DecodedRoute, Solution, decode};
pub use fleet::min_fleet;
pub use instance::{Instance, InstanceError, Node, NodeId};
pub use matrix::{DistanceMatrix, DistancePolicy, IndexMapping, MatrixIndexError, build_matrix};
pub use model::{CAPACITY_DIMENSION, CapacityDimension, ModelError, RoutingModel};
pub use parser::{FormatError, parse_instance};
pub use report::{Aggregate, SolutionReport};
pub use solver::{
    Assignment, FirstSolutionStrategy, RouteCursor, RoutingSolver, SearchConfig, SolveError,
};
