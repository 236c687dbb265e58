//! Test-only scripted solver doubles used by unit and behaviour tests.

use crate::instance::{Instance, Node, NodeId};
use crate::matrix::DistanceMatrix;
use crate::model::RoutingModel;
use crate::solver::{Assignment, RouteCursor, RoutingSolver, SearchConfig, SolveError};

/// Assignment over pre-scripted per-vehicle chains of dense node indices.
///
/// Each chain must be the full closed walk, depot index first and last; a
/// depot-only chain is `vec![depot, depot]`. Arc costs are answered from the
/// supplied matrix.
#[derive(Debug, Clone)]
pub struct ScriptedAssignment {
    chains: Vec<Vec<usize>>,
    matrix: DistanceMatrix,
}

impl ScriptedAssignment {
    /// Builds an assignment over `chains`, costed by `matrix`.
    pub fn new(chains: Vec<Vec<usize>>, matrix: DistanceMatrix) -> Self {
        assert!(
            chains.iter().all(|chain| chain.len() >= 2),
            "every chain needs at least a start and an end sentinel"
        );
        Self { chains, matrix }
    }

    fn chain(&self, vehicle: usize) -> &[usize] {
        &self.chains[vehicle]
    }
}

impl Assignment for ScriptedAssignment {
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

/// Solver that ignores the search and replays scripted chains.
#[derive(Debug, Clone)]
pub struct ScriptedSolver {
    chains: Vec<Vec<usize>>,
}

impl ScriptedSolver {
    /// Solver replaying `chains`; see [`ScriptedAssignment::new`].
    pub fn new(chains: Vec<Vec<usize>>) -> Self {
        Self { chains }
    }
}

impl RoutingSolver for ScriptedSolver {
    fn solve(
        &self,
        model: &RoutingModel,
        _config: &SearchConfig,
    ) -> Result<Box<dyn Assignment>, SolveError> {
        Ok(Box::new(ScriptedAssignment::new(
            self.chains.clone(),
            model.matrix().clone(),
        )))
    }
}

/// Solver that always reports infeasibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfeasibleSolver;

impl RoutingSolver for InfeasibleSolver {
    fn solve(
        &self,
        _model: &RoutingModel,
        _config: &SearchConfig,
    ) -> Result<Box<dyn Assignment>, SolveError> {
        Err(SolveError::Infeasible)
    }
}

/// Small instance fixture: depot id 1 at the origin plus customers on a
/// unit-demand grid row, capacity as given.
pub fn row_instance(capacity: i64, demands: &[i64]) -> Instance {
    let mut nodes = vec![Node {
        id: 1,
        position: geo::Coord { x: 0, y: 0 },
        demand: 0,
    }];
    nodes.extend(demands.iter().enumerate().map(|(offset, &demand)| Node {
        id: NodeId::try_from(offset + 2).unwrap_or(NodeId::MAX),
        position: geo::Coord {
            x: (offset as i64 + 1) * 3,
            y: 4,
        },
        demand,
    }));
    Instance::new("fixture", "EUC_2D", capacity, 1, nodes)
        .unwrap_or_else(|err| panic!("fixture instance must be valid: {err}"))
}
