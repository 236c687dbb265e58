//! Routing model handed to solver backends.
//!
//! The model bundles everything a backend needs: the distance matrix, the
//! id/index mapping, per-index demands, depot index, fleet size, and the
//! capacity dimension description. Arc-cost and demand lookups are methods
//! bound to this immutable data; backends call them directly instead of
//! capturing closures.

use thiserror::Error;

use crate::fleet::min_fleet;
use crate::instance::{Instance, NodeId};
use crate::matrix::{DistanceMatrix, DistancePolicy, IndexMapping, build_matrix};

/// Name of the cumulative capacity dimension.
pub const CAPACITY_DIMENSION: &str = "capacity";

/// Description of the cumulative load dimension a backend must enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityDimension {
    /// Lower bound of the accumulated load, always 0.
    pub lower: i64,
    /// Upper bound of the accumulated load: the vehicle capacity.
    pub upper: i64,
    /// Accumulation starts from zero at each vehicle's start.
    pub start_at_zero: bool,
    /// Dimension name, [`CAPACITY_DIMENSION`].
    pub name: &'static str,
}

/// Errors returned by [`RoutingModel::from_instance`].
///
/// These guard the model-configuration contract even for callers that build
/// models without going through [`Instance::new`] validation paths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Fewer nodes than a depot plus one customer.
    #[error("routing model needs at least 2 nodes, got {count}")]
    TooFewNodes { count: usize },
    /// Capacity must be positive to bound the dimension.
    #[error("vehicle capacity must be positive, got {capacity}")]
    NonPositiveCapacity { capacity: i64 },
    /// The depot id did not resolve to a dense index.
    #[error("depot id {id} is missing from the index mapping")]
    DepotUnmapped { id: NodeId },
}

/// Immutable routing model: matrix, mapping, demands, depot, and fleet.
#[derive(Debug, Clone)]
pub struct RoutingModel {
    matrix: DistanceMatrix,
    mapping: IndexMapping,
    demands: Vec<i64>,
    depot_index: usize,
    vehicle_count: usize,
    capacity: i64,
}

impl RoutingModel {
    /// Builds the model for an instance under the given distance policy.
    ///
    /// The vehicle count defaults to the demand-derived lower bound from
    /// [`min_fleet`]; use [`RoutingModel::with_vehicle_count`] to override it
    /// (for example when a solve came back infeasible).
    pub fn from_instance(
        instance: &Instance,
        policy: DistancePolicy,
    ) -> Result<Self, ModelError> {
        if instance.node_count() < 2 {
            return Err(ModelError::TooFewNodes {
                count: instance.node_count(),
            });
        }
        if instance.capacity() <= 0 {
            return Err(ModelError::NonPositiveCapacity {
                capacity: instance.capacity(),
            });
        }

        let (matrix, mapping) = build_matrix(instance, policy);
        let depot_index = mapping
            .index_of(instance.depot())
            .ok_or(ModelError::DepotUnmapped {
                id: instance.depot(),
            })?;
        let demands = instance.nodes().iter().map(|node| node.demand).collect();
        let vehicle_count = min_fleet(instance);
        log::debug!(
            "routing model for {}: {} nodes, depot index {depot_index}, {vehicle_count} vehicles",
            instance.name(),
            instance.node_count(),
        );

        Ok(Self {
            matrix,
            mapping,
            demands,
            depot_index,
            vehicle_count,
            capacity: instance.capacity(),
        })
    }

    /// Overrides the vehicle count, e.g. to retry after an infeasible solve.
    pub fn with_vehicle_count(mut self, vehicle_count: usize) -> Self {
        self.vehicle_count = vehicle_count;
        self
    }

    /// Arc cost between two dense indices, identical for every vehicle.
    ///
    /// # Panics
    /// Panics on out-of-range indices; see [`DistanceMatrix::cost`].
    pub fn arc_cost(&self, from: usize, to: usize) -> i64 {
        self.matrix.cost(from, to)
    }

    /// Demand of the node at a dense index.
    ///
    /// # Panics
    /// Panics on an out-of-range index, which indicates upstream
    /// misconfiguration rather than recoverable input.
    pub fn demand(&self, index: usize) -> i64 {
        match self.demands.get(index) {
            Some(&demand) => demand,
            None => panic!(
                "demand index out of range: {index} in a {}-node model",
                self.demands.len()
            ),
        }
    }

    /// The capacity dimension a backend must register.
    pub fn capacity_dimension(&self) -> CapacityDimension {
        CapacityDimension {
            lower: 0,
            upper: self.capacity,
            start_at_zero: true,
            name: CAPACITY_DIMENSION,
        }
    }

    /// Number of nodes, depot included.
    pub fn node_count(&self) -> usize {
        self.mapping.len()
    }

    /// Dense index of the depot.
    pub fn depot_index(&self) -> usize {
        self.depot_index
    }

    /// Number of vehicles available to the solver.
    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    /// Per-vehicle capacity.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// The id/index bijection, shared read-only with the decoder.
    pub fn mapping(&self) -> &IndexMapping {
        &self.mapping
    }

    /// The distance matrix, shared read-only with backends.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }
}
