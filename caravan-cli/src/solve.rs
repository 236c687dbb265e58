//! Solve command implementation for the caravan CLI.

use camino::{Utf8Path, Utf8PathBuf};
use caravan_core::{
    Aggregate, DistancePolicy, Instance, RoutingModel, RoutingSolver, SearchConfig, Solution,
    SolutionReport, decode, parse_instance,
};
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;

use crate::{ARG_SOLVE_INSTANCE, CliError, ENV_SOLVE_INSTANCE};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve a capacitated vehicle routing instance in the \
                 CVRPLIB text format. The fleet size defaults to the \
                 smallest count that can carry the total demand; override \
                 it with --vehicles when a solve comes back infeasible.",
    about = "Solve a CVRPLIB instance"
)]
#[ortho_config(prefix = "CARAVAN")]
pub(crate) struct SolveArgs {
    /// Path to a CVRPLIB-format instance file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) instance_path: Option<Utf8PathBuf>,
    /// Routing backend to search with.
    #[arg(long, value_enum, value_name = "backend")]
    #[serde(default)]
    pub(crate) backend: Option<BackendArg>,
    /// Rounding policy for the integer distance matrix.
    #[arg(long, value_enum, value_name = "policy")]
    #[serde(default)]
    pub(crate) policy: Option<PolicyArg>,
    /// Scale factor for the scaled-floor policy.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) scale: Option<u32>,
    /// Fleet size override.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) vehicles: Option<usize>,
    /// Wall-clock budget for the solve, in seconds.
    #[arg(long, value_name = "secs")]
    #[serde(default)]
    pub(crate) time_limit_seconds: Option<u64>,
    /// Upper bound on search generations (vrp backend only).
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) max_generations: Option<usize>,
    /// Footer aggregate: total distance across routes, or the longest route.
    #[arg(long, value_enum, value_name = "aggregate")]
    #[serde(default)]
    pub(crate) aggregate: Option<AggregateArg>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Routing backend choices exposed on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum BackendArg {
    /// Metaheuristic search via `vrp-core`.
    #[default]
    Vrp,
    /// OR-Tools constraint solver (not yet wired up).
    Ortools,
}

/// Distance rounding policy choices exposed on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum PolicyArg {
    /// Euclidean distance scaled up then floored.
    #[default]
    ScaledFloor,
    /// Squared Euclidean distance, truncated.
    TruncatedSquared,
}

/// Footer aggregate choices exposed on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum AggregateArg {
    /// Sum of per-route distances.
    #[default]
    Sum,
    /// Longest single route.
    Max,
}

impl From<AggregateArg> for Aggregate {
    fn from(arg: AggregateArg) -> Self {
        match arg {
            AggregateArg::Sum => Self::Sum,
            AggregateArg::Max => Self::Max,
        }
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    /// Path to the CVRPLIB instance file.
    pub(crate) instance_path: Utf8PathBuf,
    /// Selected routing backend.
    pub(crate) backend: BackendArg,
    /// Rounding policy for the distance matrix.
    pub(crate) policy: DistancePolicy,
    /// Fleet size override, if any.
    pub(crate) vehicles: Option<usize>,
    /// Search knobs handed to the backend.
    pub(crate) search: SearchConfig,
    /// Generation cap for the vrp backend.
    pub(crate) max_generations: Option<usize>,
    /// Footer aggregate for the rendered report.
    pub(crate) aggregate: Aggregate,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.instance_path, ARG_SOLVE_INSTANCE)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match caravan_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let instance_path = args.instance_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_INSTANCE,
            env: ENV_SOLVE_INSTANCE,
        })?;

        let policy = match args.policy.unwrap_or_default() {
            PolicyArg::ScaledFloor => DistancePolicy::ScaledFloor {
                scale: args.scale.unwrap_or(DistancePolicy::DEFAULT_SCALE),
            },
            PolicyArg::TruncatedSquared if args.scale.is_some() => {
                return Err(CliError::ScaleWithoutFloorPolicy);
            }
            PolicyArg::TruncatedSquared => DistancePolicy::TruncatedSquared,
        };

        let search = SearchConfig {
            time_limit: args.time_limit_seconds.map(Duration::from_secs),
            ..SearchConfig::default()
        };

        Ok(Self {
            instance_path,
            backend: args.backend.unwrap_or_default(),
            policy,
            vehicles: args.vehicles,
            search,
            max_generations: args.max_generations,
            aggregate: args.aggregate.unwrap_or_default().into(),
        })
    }
}

/// Builds a solver instance for the current solve invocation.
pub(super) trait SolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn RoutingSolver>, CliError>;
}

pub(super) struct DefaultSolveSolverBuilder;

impl SolveSolverBuilder for DefaultSolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn RoutingSolver>, CliError> {
        match config.backend {
            BackendArg::Vrp => build_vrp_solver(config),
            BackendArg::Ortools => build_ortools_solver(),
        }
    }
}

#[cfg(feature = "solver-vrp")]
fn build_vrp_solver(config: &SolveConfig) -> Result<Box<dyn RoutingSolver>, CliError> {
    let mut vrp = caravan_solver_vrp::VrpSolverConfig::default();
    if let Some(max_generations) = config.max_generations {
        vrp.max_generations = max_generations;
    }
    Ok(Box::new(caravan_solver_vrp::VrpSolver::with_config(vrp)))
}

#[cfg(not(feature = "solver-vrp"))]
fn build_vrp_solver(_config: &SolveConfig) -> Result<Box<dyn RoutingSolver>, CliError> {
    Err(CliError::MissingFeature {
        feature: "solver-vrp",
        action: "the vrp routing backend",
    })
}

#[cfg(feature = "solver-ortools")]
fn build_ortools_solver() -> Result<Box<dyn RoutingSolver>, CliError> {
    Ok(Box::new(caravan_solver_ortools::OrtoolsSolver::new()))
}

#[cfg(not(feature = "solver-ortools"))]
fn build_ortools_solver() -> Result<Box<dyn RoutingSolver>, CliError> {
    Err(CliError::MissingFeature {
        feature: "solver-ortools",
        action: "the ortools routing backend",
    })
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSolveSolverBuilder;
    run_solve_with(args, &builder, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let (solution, aggregate) = execute_solve(args, builder)?;
    write_solution_report(writer, &solution, aggregate)
}

fn execute_solve(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
) -> Result<(Solution, Aggregate), CliError> {
    let config = resolve_solve_config(args)?;
    let instance = load_instance(&config.instance_path)?;
    let mut model = RoutingModel::from_instance(&instance, config.policy)?;
    if let Some(vehicles) = config.vehicles {
        model = model.with_vehicle_count(vehicles);
    }
    let solver = builder.build(&config)?;
    let assignment = solver
        .solve(&model, &config.search)
        .map_err(|source| CliError::Solve { source })?;
    let solution = decode(assignment.as_ref(), &model)?;
    log::info!(
        "solved {}: {} routes, total distance {}",
        instance.name(),
        solution.routes.len(),
        solution.total_distance,
    );
    Ok((solution, config.aggregate))
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads and parses a CVRPLIB instance from disk.
fn load_instance(path: &Utf8Path) -> Result<Instance, CliError> {
    let text = caravan_fs::read_utf8_file(path).map_err(|source| CliError::ReadInstance {
        path: path.to_path_buf(),
        source,
    })?;
    parse_instance(&text).map_err(|source| CliError::ParseInstance {
        path: path.to_path_buf(),
        source,
    })
}

fn write_solution_report(
    writer: &mut dyn Write,
    solution: &Solution,
    aggregate: Aggregate,
) -> Result<(), CliError> {
    let report = SolutionReport::new(solution).with_aggregate(aggregate);
    write!(writer, "{report}").map_err(CliError::WriteOutput)
}
