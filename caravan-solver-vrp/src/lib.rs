//! Default routing backend for Caravan, built on `vrp-core`.
//!
//! This crate provides [`VrpSolver`], the default implementation of the
//! [`RoutingSolver`](caravan_core::RoutingSolver) trait. It translates a
//! [`RoutingModel`](caravan_core::RoutingModel) into a `vrp-core` problem
//! (one delivery job per customer, identical capacitated vehicles anchored
//! at the depot), runs the `vrp-core` metaheuristics within the configured
//! budget, and re-expresses the winning tour as per-vehicle index chains
//! answering the [`Assignment`](caravan_core::Assignment) queries.
//!
//! Unassigned jobs in the best solution surface as
//! [`SolveError::Infeasible`](caravan_core::SolveError::Infeasible); the
//! backend never invents a partial answer.

#![forbid(unsafe_code)]

mod solver;
mod vrp;

pub use solver::{VrpSolver, VrpSolverConfig};
