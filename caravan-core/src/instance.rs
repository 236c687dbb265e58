//! Validated, immutable CVRP instance model.
//!
//! Construction validates the invariants downstream components rely on, so
//! an `Instance` that exists is always usable. There is no invalid-instance
//! sentinel; failed construction is an [`InstanceError`].

use geo::Coord;
use thiserror::Error;

/// Identifier of a node as written in the instance file.
///
/// Ids are arbitrary small positive integers; they are neither contiguous
/// nor zero-based.
pub type NodeId = u32;

/// A single node: its file id, integer position, and demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Id as written in the instance file.
    pub id: NodeId,
    /// 2D integer coordinates.
    pub position: Coord<i64>,
    /// Non-negative demand; zero for the depot.
    pub demand: i64,
}

/// A parsed CVRP instance.
///
/// Node order matches file order and is significant: it fixes the dense
/// index assignment used by the distance matrix and the solver.
///
/// # Examples
/// ```
/// use caravan_core::{Instance, Node};
/// use geo::Coord;
///
/// # fn main() -> Result<(), caravan_core::InstanceError> {
/// let nodes = vec![
///     Node { id: 1, position: Coord { x: 0, y: 0 }, demand: 0 },
///     Node { id: 2, position: Coord { x: 3, y: 4 }, demand: 7 },
/// ];
/// let instance = Instance::new("toy", "EUC_2D", 10, 1, nodes)?;
/// assert_eq!(instance.node_count(), 2);
/// assert_eq!(instance.total_demand(), 7);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    name: String,
    edge_weight_type: String,
    capacity: i64,
    depot: NodeId,
    nodes: Vec<Node>,
}

/// Errors returned by [`Instance::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstanceError {
    /// Fewer than a depot plus one customer.
    #[error("instance needs a depot and at least one customer, got {count} nodes")]
    TooFewNodes { count: usize },
    /// Vehicle capacity must be positive.
    #[error("vehicle capacity must be positive, got {capacity}")]
    NonPositiveCapacity { capacity: i64 },
    /// The same node id appeared twice.
    #[error("duplicate node id {id}")]
    DuplicateNodeId { id: NodeId },
    /// A demand was negative.
    #[error("node {id} has negative demand {demand}")]
    NegativeDemand { id: NodeId, demand: i64 },
    /// The depot id is not among the nodes.
    #[error("depot id {id} is not a node of the instance")]
    DepotNotFound { id: NodeId },
    /// The depot carried a non-zero demand.
    #[error("depot {id} must have zero demand, got {demand}")]
    DepotDemand { id: NodeId, demand: i64 },
}

impl Instance {
    /// Validates and constructs an [`Instance`].
    pub fn new(
        name: impl Into<String>,
        edge_weight_type: impl Into<String>,
        capacity: i64,
        depot: NodeId,
        nodes: Vec<Node>,
    ) -> Result<Self, InstanceError> {
        if nodes.len() < 2 {
            return Err(InstanceError::TooFewNodes { count: nodes.len() });
        }
        if capacity <= 0 {
            return Err(InstanceError::NonPositiveCapacity { capacity });
        }
        let mut seen = std::collections::HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !seen.insert(node.id) {
                return Err(InstanceError::DuplicateNodeId { id: node.id });
            }
            if node.demand < 0 {
                return Err(InstanceError::NegativeDemand {
                    id: node.id,
                    demand: node.demand,
                });
            }
        }
        let Some(depot_node) = nodes.iter().find(|node| node.id == depot) else {
            return Err(InstanceError::DepotNotFound { id: depot });
        };
        if depot_node.demand != 0 {
            return Err(InstanceError::DepotDemand {
                id: depot,
                demand: depot_node.demand,
            });
        }
        Ok(Self {
            name: name.into(),
            edge_weight_type: edge_weight_type.into(),
            capacity,
            depot,
            nodes,
        })
    }

    /// Instance name, informational only.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Edge-weight tag from the file header. Informational: the distance
    /// policy is chosen explicitly, never inferred from this tag.
    pub fn edge_weight_type(&self) -> &str {
        &self.edge_weight_type
    }

    /// Per-vehicle capacity, always positive.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Id of the depot node.
    pub fn depot(&self) -> NodeId {
        self.depot
    }

    /// Nodes in file order, depot included.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes, depot included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node by its file id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Sum of all demands.
    pub fn total_demand(&self) -> i64 {
        self.nodes.iter().map(|node| node.demand).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn nodes() -> Vec<Node> {
        vec![
            Node {
                id: 1,
                position: Coord { x: 0, y: 0 },
                demand: 0,
            },
            Node {
                id: 2,
                position: Coord { x: 3, y: 4 },
                demand: 5,
            },
            Node {
                id: 4,
                position: Coord { x: -2, y: 1 },
                demand: 3,
            },
        ]
    }

    #[rstest]
    fn accepts_valid_nodes(nodes: Vec<Node>) {
        let instance = Instance::new("toy", "EUC_2D", 10, 1, nodes).expect("valid instance");
        assert_eq!(instance.node_count(), 3);
        assert_eq!(instance.depot(), 1);
        assert_eq!(instance.total_demand(), 8);
        assert_eq!(instance.node(4).map(|node| node.demand), Some(3));
    }

    #[rstest]
    fn rejects_single_node() {
        let nodes = vec![Node {
            id: 1,
            position: Coord { x: 0, y: 0 },
            demand: 0,
        }];
        let err = Instance::new("toy", "EUC_2D", 10, 1, nodes).expect_err("too few nodes");
        assert_eq!(err, InstanceError::TooFewNodes { count: 1 });
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn rejects_non_positive_capacity(nodes: Vec<Node>, #[case] capacity: i64) {
        let err = Instance::new("toy", "EUC_2D", capacity, 1, nodes).expect_err("bad capacity");
        assert_eq!(err, InstanceError::NonPositiveCapacity { capacity });
    }

    #[rstest]
    fn rejects_duplicate_id(mut nodes: Vec<Node>) {
        nodes.push(Node {
            id: 2,
            position: Coord { x: 9, y: 9 },
            demand: 1,
        });
        let err = Instance::new("toy", "EUC_2D", 10, 1, nodes).expect_err("duplicate id");
        assert_eq!(err, InstanceError::DuplicateNodeId { id: 2 });
    }

    #[rstest]
    fn rejects_missing_depot(nodes: Vec<Node>) {
        let err = Instance::new("toy", "EUC_2D", 10, 9, nodes).expect_err("depot absent");
        assert_eq!(err, InstanceError::DepotNotFound { id: 9 });
    }

    #[rstest]
    fn rejects_depot_with_demand(nodes: Vec<Node>) {
        let err = Instance::new("toy", "EUC_2D", 10, 2, nodes).expect_err("depot demand");
        assert_eq!(err, InstanceError::DepotDemand { id: 2, demand: 5 });
    }

    #[rstest]
    fn rejects_negative_demand(mut nodes: Vec<Node>) {
        nodes.push(Node {
            id: 7,
            position: Coord { x: 1, y: 1 },
            demand: -1,
        });
        let err = Instance::new("toy", "EUC_2D", 10, 1, nodes).expect_err("negative demand");
        assert_eq!(err, InstanceError::NegativeDemand { id: 7, demand: -1 });
    }
}
