//! `vrp-core` modelling helpers for `VrpSolver`.
//!
//! This module converts a routing model into a `vrp-core` problem, runs the
//! solver, and translates the resulting tours back into per-vehicle chains
//! of dense node indices.

use std::sync::Arc;

use vrp_core::models::common::{Location, Profile};
use vrp_core::models::problem::TravelTime;
use vrp_core::models::solution::Route as VrpRoute;
use vrp_core::prelude::*;

use caravan_core::{RoutingModel, SearchConfig, SolveError};

use crate::solver::VrpSolverConfig;

/// Matrix-backed transport cost over the model's integer distances.
struct MatrixTransportCost {
    costs: Vec<Vec<f64>>,
}

impl MatrixTransportCost {
    fn new(model: &RoutingModel) -> Self {
        let n = model.node_count();
        let costs = (0..n)
            .map(|from| (0..n).map(|to| model.arc_cost(from, to) as f64).collect())
            .collect();
        Self { costs }
    }

    fn cost(&self, from: Location, to: Location) -> f64 {
        let result = self
            .costs
            .get(from)
            .and_then(|row| row.get(to))
            .copied();
        debug_assert!(result.is_some(), "matrix lookup failed: from={from}, to={to}");
        result.unwrap_or(0.0)
    }
}

impl TransportCost for MatrixTransportCost {
    // `route` and `departure` are part of the shared `TransportCost` API for
    // implementations with route- or time-dependent costs; a distance matrix
    // has neither.
    fn distance(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> Cost {
        self.cost(from, to)
    }

    fn duration(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> f64 {
        self.cost(from, to)
    }

    fn distance_approx(&self, profile: &Profile, from: usize, to: usize) -> f64 {
        self.duration_approx(profile, from, to)
    }

    fn duration_approx(&self, _profile: &Profile, from: usize, to: usize) -> f64 {
        self.cost(from, to)
    }
}

fn define_goal(transport: Arc<dyn TransportCost>, dimension_name: &str) -> GenericResult<GoalContext> {
    let minimize_unassigned = MinimizeUnassignedBuilder::new("min-unassigned").build()?;
    let capacity_feature = CapacityFeatureBuilder::<SingleDimLoad>::new(dimension_name).build()?;
    let transport_feature = TransportFeatureBuilder::new("min-distance")
        .set_transport_cost(transport)
        .set_time_constrained(false)
        .build_minimize_distance()?;

    GoalContextBuilder::with_features(&[minimize_unassigned, transport_feature, capacity_feature])?
        .build()
}

fn define_problem(
    model: &RoutingModel,
    goal: GoalContext,
    transport: Arc<dyn TransportCost>,
) -> GenericResult<Problem> {
    let depot = model.depot_index();
    let capacity = i32::try_from(model.capacity_dimension().upper)
        .map_err(|_| "vehicle capacity exceeds the backend's load range")?;

    let jobs = (0..model.node_count())
        .filter(|&index| index != depot)
        .map(|index| {
            let id = model.mapping().id_of(index).unwrap_or_default();
            let demand = i32::try_from(model.demand(index))
                .map_err(|_| "node demand exceeds the backend's load range")?;
            SingleBuilder::default()
                .id(format!("node{id}").as_str())
                .demand(Demand::delivery(demand))
                .location(index)?
                .build_as_job()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let vehicles = (0..model.vehicle_count())
        .map(|vehicle| {
            VehicleBuilder::default()
                .id(format!("vehicle{vehicle}").as_str())
                .add_detail(
                    VehicleDetailBuilder::default()
                        .set_start_location(depot)
                        .set_end_location(depot)
                        .build()?,
                )
                .capacity(SingleDimLoad::new(capacity))
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    ProblemBuilder::default()
        .add_jobs(jobs.into_iter())
        .add_vehicles(vehicles.into_iter())
        .with_goal(goal)
        .with_transport_cost(transport)
        .build()
}

/// Runs the `vrp-core` search and returns one closed index chain per
/// vehicle, padded with depot-only chains for unused vehicles.
pub(super) fn solve_chains(
    model: &RoutingModel,
    search: &SearchConfig,
    config: &VrpSolverConfig,
) -> Result<Vec<Vec<usize>>, SolveError> {
    let transport = Arc::new(MatrixTransportCost::new(model));
    let dimension_name = model.capacity_dimension().name;
    let goal = define_goal(transport.clone(), dimension_name)
        .map_err(|err| SolveError::Backend(err.to_string()))?;
    let problem = Arc::new(
        define_problem(model, goal, transport).map_err(|err| SolveError::Backend(err.to_string()))?,
    );

    let mut builder = VrpConfigBuilder::new(problem.clone())
        .prebuild()
        .map_err(|err| SolveError::Backend(err.to_string()))?
        .with_max_generations(Some(config.max_generations));
    if let Some(limit) = search.time_limit {
        let seconds = usize::try_from(limit.as_secs()).unwrap_or(usize::MAX);
        builder = builder.with_max_time(Some(seconds));
    }
    let vrp_config = builder
        .build()
        .map_err(|err| SolveError::Backend(err.to_string()))?;

    let solution = vrp_core::solver::Solver::new(problem, vrp_config)
        .solve()
        .map_err(|_| SolveError::Infeasible)?;

    if !solution.unassigned.is_empty() {
        log::debug!(
            "vrp-core left {} job(s) unassigned; reporting infeasibility",
            solution.unassigned.len()
        );
        return Err(SolveError::Infeasible);
    }

    let depot = model.depot_index();
    let mut chains: Vec<Vec<usize>> = solution
        .get_locations()
        .map(|route| {
            let mut chain: Vec<usize> = route.collect();
            if chain.first() != Some(&depot) {
                chain.insert(0, depot);
            }
            if chain.last() != Some(&depot) || chain.len() < 2 {
                chain.push(depot);
            }
            chain
        })
        .collect();

    if chains.len() > model.vehicle_count() {
        return Err(SolveError::Backend(format!(
            "solution uses {} routes for {} vehicles",
            chains.len(),
            model.vehicle_count()
        )));
    }
    chains.resize_with(model.vehicle_count(), || vec![depot, depot]);

    Ok(chains)
}
