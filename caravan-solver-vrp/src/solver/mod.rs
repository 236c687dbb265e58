//! `VrpSolver`: the `RoutingSolver` implementation backed by `vrp-core`.

use caravan_core::{
    Assignment, DistanceMatrix, FirstSolutionStrategy, RouteCursor, RoutingModel, RoutingSolver,
    SearchConfig, SolveError,
};

/// Configuration for [`VrpSolver`].
#[derive(Debug, Clone, Copy)]
pub struct VrpSolverConfig {
    /// Upper bound on `vrp-core` generations; the wall-clock budget from
    /// [`SearchConfig`] applies on top of this.
    pub max_generations: usize,
}

impl Default for VrpSolverConfig {
    fn default() -> Self {
        Self {
            max_generations: 50,
        }
    }
}

/// Routing backend searching with the `vrp-core` metaheuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct VrpSolver {
    config: VrpSolverConfig,
}

impl VrpSolver {
    /// Solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Solver with explicit configuration.
    pub const fn with_config(config: VrpSolverConfig) -> Self {
        Self { config }
    }
}

impl RoutingSolver for VrpSolver {
    fn solve(
        &self,
        model: &RoutingModel,
        config: &SearchConfig,
    ) -> Result<Box<dyn Assignment>, SolveError> {
        if model.vehicle_count() == 0 {
            let unmet = (0..model.node_count())
                .any(|index| index != model.depot_index() && model.demand(index) > 0);
            if unmet {
                // Demand with no fleet to carry it, e.g. an explicit
                // zero-vehicle override.
                return Err(SolveError::Infeasible);
            }
            // Nothing to deliver: an assignment with no chains decodes to an
            // empty solution.
            return Ok(Box::new(ChainAssignment::new(
                Vec::new(),
                model.matrix().clone(),
            )));
        }

        // `vrp-core` constructs initial solutions by cheapest insertion;
        // both recognised strategies map onto it.
        match config.first_solution {
            FirstSolutionStrategy::CheapestArc | FirstSolutionStrategy::Automatic => {}
        }

        let chains = crate::vrp::solve_chains(model, config, &self.config)?;
        Ok(Box::new(ChainAssignment::new(
            chains,
            model.matrix().clone(),
        )))
    }
}

/// Assignment over closed per-vehicle chains of dense node indices.
///
/// Arc costs are answered from the model's distance matrix, so the decoder's
/// recomputation check holds by construction.
#[derive(Debug, Clone)]
pub(crate) struct ChainAssignment {
    chains: Vec<Vec<usize>>,
    matrix: DistanceMatrix,
}

impl ChainAssignment {
    pub(crate) fn new(chains: Vec<Vec<usize>>, matrix: DistanceMatrix) -> Self {
        debug_assert!(
            chains.iter().all(|chain| chain.len() >= 2),
            "chains must be closed walks with start and end sentinels"
        );
        Self { chains, matrix }
    }

    fn chain(&self, vehicle: usize) -> &[usize] {
        &self.chains[vehicle]
    }
}

impl Assignment for ChainAssignment {
    fn start(&self, vehicle: usize) -> RouteCursor {
        RouteCursor::new(vehicle, 0)
    }

    fn is_end(&self, cursor: RouteCursor) -> bool {
        cursor.leg() + 1 == self.chain(cursor.vehicle()).len()
    }

    fn next(&self, cursor: RouteCursor) -> RouteCursor {
        let last = self.chain(cursor.vehicle()).len() - 1;
        RouteCursor::new(cursor.vehicle(), cursor.leg().saturating_add(1).min(last))
    }

    fn node(&self, cursor: RouteCursor) -> usize {
        self.chain(cursor.vehicle())[cursor.leg()]
    }

    fn arc_cost(&self, from: RouteCursor, to: RouteCursor, _vehicle: usize) -> i64 {
        self.matrix.cost(self.node(from), self.node(to))
    }
}
