//! End-to-end solve command tests with scripted solver backends.

use super::helpers::{InstanceFile, TOY_INSTANCE};
use super::*;
use crate::solve::{SolveConfig, SolveSolverBuilder, run_solve_with};
use caravan_core::test_support::{InfeasibleSolver, ScriptedSolver};
use caravan_core::{RoutingSolver, SolveError};
use rstest::rstest;

/// Builder injecting a solver that replays fixed chains of dense indices.
struct ScriptedBuilder(Vec<Vec<usize>>);

impl SolveSolverBuilder for ScriptedBuilder {
    fn build(&self, _config: &SolveConfig) -> Result<Box<dyn RoutingSolver>, CliError> {
        Ok(Box::new(ScriptedSolver::new(self.0.clone())))
    }
}

struct InfeasibleBuilder;

impl SolveSolverBuilder for InfeasibleBuilder {
    fn build(&self, _config: &SolveConfig) -> Result<Box<dyn RoutingSolver>, CliError> {
        Ok(Box::new(InfeasibleSolver))
    }
}

#[rstest]
fn solve_renders_routes_and_total() {
    let instance = InstanceFile::new(TOY_INSTANCE);
    let args = SolveArgs {
        instance_path: Some(instance.path.clone()),
        ..SolveArgs::default()
    };
    // Dense indices follow instance order: ids 1..=5 map to 0..=4.
    let builder = ScriptedBuilder(vec![vec![0, 1, 2, 0], vec![0, 3, 4, 0]]);
    let mut output = Vec::new();

    run_solve_with(args, &builder, &mut output).expect("solve should succeed");

    let text = String::from_utf8(output).expect("utf-8 report");
    assert!(text.contains("Route for vehicle 0:"));
    assert!(text.contains("1 -> 2 -> 3 -> 1"));
    assert!(text.contains("Distance of the route: 131"));
    assert!(text.contains("Route for vehicle 1:"));
    assert!(text.contains("1 -> 4 -> 5 -> 1"));
    assert!(text.contains("Distance of the route: 230"));
    assert!(text.contains("Total route distance: 361"));
}

#[rstest]
fn infeasible_solve_surfaces_as_error() {
    let instance = InstanceFile::new(TOY_INSTANCE);
    let args = SolveArgs {
        instance_path: Some(instance.path.clone()),
        ..SolveArgs::default()
    };
    let mut output = Vec::new();

    let err = run_solve_with(args, &InfeasibleBuilder, &mut output)
        .expect_err("infeasible solve should error");
    match err {
        CliError::Solve { source } => assert_eq!(source, SolveError::Infeasible),
        other => panic!("expected Solve error, found {other:?}"),
    }
    assert!(output.is_empty(), "no report should be written on failure");
}

#[rstest]
fn malformed_instance_fails_before_solving() {
    let instance = InstanceFile::new("NAME : broken\n");
    let args = SolveArgs {
        instance_path: Some(instance.path.clone()),
        ..SolveArgs::default()
    };
    let mut output = Vec::new();

    let err = run_solve_with(args, &InfeasibleBuilder, &mut output)
        .expect_err("malformed instance should error");
    assert!(matches!(err, CliError::ParseInstance { .. }));
}
