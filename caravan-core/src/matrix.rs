//! Integer distance matrix and the id/index bijection.
//!
//! Dense solver indices are assigned from node file order, so two builds of
//! the same instance always agree on the depot index and every downstream
//! index reference. The original-id and dense-index views live in one
//! [`IndexMapping`] rather than two independently maintained containers.

use std::collections::HashMap;

use thiserror::Error;

use crate::instance::{Instance, NodeId};

/// Rounding/scaling policy applied to Euclidean distances, fixed per build.
///
/// # Examples
/// ```
/// use caravan_core::DistancePolicy;
///
/// // Two nodes at (0,0) and (3,4) are exactly 5 apart.
/// assert_eq!(DistancePolicy::TruncatedSquared.arc(3, 4), 5);
/// assert_eq!(DistancePolicy::ScaledFloor { scale: 10 }.arc(3, 4), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistancePolicy {
    /// `floor(euclidean × scale)`: keeps fractional precision at integer
    /// arithmetic cost.
    ScaledFloor { scale: u32 },
    /// `floor(sqrt(dx² + dy²))`: classic CVRPLIB rounding, drops sub-unit
    /// precision.
    TruncatedSquared,
}

impl DistancePolicy {
    /// Scale used by [`Default`], matching common scaled-integer practice.
    pub const DEFAULT_SCALE: u32 = 10;

    /// Integer cost of an arc spanning `dx`, `dy`.
    pub fn arc(self, dx: i64, dy: i64) -> i64 {
        let euclidean = (dx as f64).hypot(dy as f64);
        let value = match self {
            Self::ScaledFloor { scale } => euclidean * f64::from(scale),
            Self::TruncatedSquared => euclidean,
        };
        value.floor() as i64
    }
}

impl Default for DistancePolicy {
    fn default() -> Self {
        Self::ScaledFloor {
            scale: Self::DEFAULT_SCALE,
        }
    }
}

/// Bijection between dense solver indices `[0, n)` and file node ids.
///
/// Built once per solve from node file order and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMapping {
    ids: Vec<NodeId>,
    indices: HashMap<NodeId, usize>,
}

impl IndexMapping {
    fn from_ids(ids: Vec<NodeId>) -> Self {
        let indices = ids
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, index))
            .collect();
        Self { ids, indices }
    }

    /// File id for a dense index, if the index is in range.
    pub fn id_of(&self, index: usize) -> Option<NodeId> {
        self.ids.get(index).copied()
    }

    /// Dense index for a file id, if the id belongs to the instance.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.indices.get(&id).copied()
    }

    /// Number of mapped nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Symmetric, non-negative integer cost matrix with a zero diagonal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    dimension: usize,
    cells: Vec<i64>,
}

/// A matrix lookup outside `[0, dimension)` is a programming-contract
/// violation, surfaced as an error by the lookup that observed it.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("matrix index out of range: ({from}, {to}) in a {dimension}-node matrix")]
pub struct MatrixIndexError {
    pub from: usize,
    pub to: usize,
    pub dimension: usize,
}

impl DistanceMatrix {
    /// Number of nodes (the matrix is `dimension × dimension`).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Arc cost between two dense indices.
    ///
    /// # Panics
    /// Panics when either index is out of range; callers hold indices that
    /// came from the paired [`IndexMapping`], so this indicates upstream
    /// misconfiguration rather than recoverable input.
    pub fn cost(&self, from: usize, to: usize) -> i64 {
        match self.get(from, to) {
            Ok(cost) => cost,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible arc cost lookup for callers validating untrusted indices.
    pub fn get(&self, from: usize, to: usize) -> Result<i64, MatrixIndexError> {
        if from >= self.dimension || to >= self.dimension {
            return Err(MatrixIndexError {
                from,
                to,
                dimension: self.dimension,
            });
        }
        Ok(self.cells[from * self.dimension + to])
    }
}

/// Builds the distance matrix and index mapping for an instance.
///
/// Deterministic: two builds from the same instance and policy yield
/// identical matrices and mappings.
pub fn build_matrix(instance: &Instance, policy: DistancePolicy) -> (DistanceMatrix, IndexMapping) {
    let nodes = instance.nodes();
    let dimension = nodes.len();
    let mapping = IndexMapping::from_ids(nodes.iter().map(|node| node.id).collect());

    let mut cells = vec![0_i64; dimension * dimension];
    for i in 0..dimension {
        for j in (i + 1)..dimension {
            let dx = nodes[j].position.x - nodes[i].position.x;
            let dy = nodes[j].position.y - nodes[i].position.y;
            let cost = policy.arc(dx, dy);
            cells[i * dimension + j] = cost;
            cells[j * dimension + i] = cost;
        }
    }

    (DistanceMatrix { dimension, cells }, mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Node;
    use geo::Coord;
    use proptest::prelude::*;
    use rstest::rstest;

    fn instance_from(coords: &[(i64, i64)]) -> Instance {
        let nodes = coords
            .iter()
            .enumerate()
            .map(|(offset, &(x, y))| Node {
                id: (offset + 1) as NodeId,
                position: Coord { x, y },
                demand: if offset == 0 { 0 } else { 1 },
            })
            .collect();
        Instance::new("matrix-test", "EUC_2D", 100, 1, nodes).expect("valid instance")
    }

    #[rstest]
    #[case(DistancePolicy::TruncatedSquared, 5)]
    #[case(DistancePolicy::ScaledFloor { scale: 10 }, 50)]
    fn three_four_five_triangle(#[case] policy: DistancePolicy, #[case] expected: i64) {
        let instance = instance_from(&[(0, 0), (3, 4)]);
        let (matrix, _) = build_matrix(&instance, policy);
        assert_eq!(matrix.cost(0, 1), expected);
        assert_eq!(matrix.cost(1, 0), expected);
    }

    #[rstest]
    fn scaled_floor_keeps_fractional_precision() {
        // (0,0)-(1,1) is sqrt(2) ≈ 1.4142: truncation loses the fraction,
        // scaling by 10 keeps one digit of it.
        let instance = instance_from(&[(0, 0), (1, 1)]);
        let (truncated, _) = build_matrix(&instance, DistancePolicy::TruncatedSquared);
        let (scaled, _) = build_matrix(&instance, DistancePolicy::default());
        assert_eq!(truncated.cost(0, 1), 1);
        assert_eq!(scaled.cost(0, 1), 14);
    }

    #[rstest]
    fn mapping_follows_file_order() {
        let instance = instance_from(&[(0, 0), (5, 5), (9, 9)]);
        let (_, mapping) = build_matrix(&instance, DistancePolicy::default());
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.id_of(0), Some(1));
        assert_eq!(mapping.id_of(2), Some(3));
        assert_eq!(mapping.index_of(2), Some(1));
        assert_eq!(mapping.index_of(42), None);
        assert_eq!(mapping.id_of(3), None);
    }

    #[rstest]
    fn coincident_nodes_have_zero_cost_but_zero_diagonal_is_forced() {
        let instance = instance_from(&[(2, 2), (2, 2)]);
        let (matrix, _) = build_matrix(&instance, DistancePolicy::default());
        assert_eq!(matrix.cost(0, 1), 0);
        assert_eq!(matrix.cost(0, 0), 0);
        assert_eq!(matrix.cost(1, 1), 0);
    }

    #[rstest]
    fn out_of_range_lookup_is_an_error() {
        let instance = instance_from(&[(0, 0), (3, 4)]);
        let (matrix, _) = build_matrix(&instance, DistancePolicy::default());
        assert_eq!(
            matrix.get(0, 2),
            Err(MatrixIndexError {
                from: 0,
                to: 2,
                dimension: 2,
            })
        );
    }

    proptest! {
        /// The matrix is symmetric with a zero diagonal for any coordinates.
        #[test]
        fn symmetric_with_zero_diagonal(
            coords in proptest::collection::vec((-1000_i64..1000, -1000_i64..1000), 2..12),
            truncated in proptest::bool::ANY,
        ) {
            let policy = if truncated {
                DistancePolicy::TruncatedSquared
            } else {
                DistancePolicy::default()
            };
            let instance = instance_from(&coords);
            let (matrix, _) = build_matrix(&instance, policy);
            let n = matrix.dimension();
            for i in 0..n {
                prop_assert_eq!(matrix.cost(i, i), 0);
                for j in 0..n {
                    prop_assert_eq!(matrix.cost(i, j), matrix.cost(j, i));
                    prop_assert!(matrix.cost(i, j) >= 0);
                }
            }
        }

        /// Two builds from the same inputs are bit-identical.
        #[test]
        fn build_is_idempotent(
            coords in proptest::collection::vec((-500_i64..500, -500_i64..500), 2..10),
        ) {
            let instance = instance_from(&coords);
            let (first_matrix, first_mapping) =
                build_matrix(&instance, DistancePolicy::default());
            let (second_matrix, second_mapping) =
                build_matrix(&instance, DistancePolicy::default());
            prop_assert_eq!(first_matrix, second_matrix);
            prop_assert_eq!(first_mapping, second_mapping);
        }
    }
}
