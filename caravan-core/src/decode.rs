//! Decoding solver assignments back into routes over original node ids.

use thiserror::Error;

use crate::instance::NodeId;
use crate::model::RoutingModel;
use crate::solver::Assignment;

/// One vehicle's decoded route.
///
/// `stops` begins and ends at the depot id. A depot-only route of length 2
/// with distance 0 is an unused vehicle, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedRoute {
    /// Visited node ids in order, depot first and last.
    pub stops: Vec<NodeId>,
    /// Total arc cost along the route.
    pub distance: i64,
}

impl DecodedRoute {
    /// Whether the route serves no customers.
    pub fn is_unused(&self) -> bool {
        self.stops.len() <= 2
    }
}

/// All decoded routes plus the verified total distance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// One route per vehicle, in vehicle order.
    pub routes: Vec<DecodedRoute>,
    /// Sum of all per-route distances.
    pub total_distance: i64,
}

/// Errors returned by [`decode`].
///
/// Both variants indicate upstream misconfiguration (a backend answering
/// with foreign indices or inconsistent costs); they are never ignored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The assignment referenced an index outside the model's mapping.
    #[error("assignment references node index {index} outside the mapping")]
    UnknownIndex { index: usize },
    /// The assignment's accumulated arc costs disagree with the distance
    /// matrix over the same chain.
    #[error(
        "vehicle {vehicle}: assignment reports distance {traversed} but the \
         matrix gives {recomputed}"
    )]
    DistanceMismatch {
        vehicle: usize,
        traversed: i64,
        recomputed: i64,
    },
}

/// Walks every vehicle's chain and rebuilds routes in original node ids.
///
/// Each route's distance is accumulated from the assignment's own arc costs
/// and then recomputed from the model's distance matrix; disagreement is a
/// [`DecodeError::DistanceMismatch`]. The reported total is the sum of the
/// per-route distances by construction, so downstream reports can rely on
/// the two agreeing.
pub fn decode(assignment: &dyn Assignment, model: &RoutingModel) -> Result<Solution, DecodeError> {
    let mut routes = Vec::with_capacity(model.vehicle_count());
    let mut total_distance = 0_i64;

    for vehicle in 0..model.vehicle_count() {
        let mut cursor = assignment.start(vehicle);
        let mut stops = Vec::new();
        let mut indices = Vec::new();
        let mut traversed = 0_i64;

        let start = assignment.node(cursor);
        stops.push(id_of(model, start)?);
        indices.push(start);

        while !assignment.is_end(cursor) {
            let previous = cursor;
            cursor = assignment.next(cursor);
            // Backends answer arc costs from the matrix, so the advanced
            // node must be translated (and thereby validated) first.
            let index = assignment.node(cursor);
            stops.push(id_of(model, index)?);
            indices.push(index);
            traversed += assignment.arc_cost(previous, cursor, vehicle);
        }

        let recomputed = indices
            .windows(2)
            .map(|pair| model.arc_cost(pair[0], pair[1]))
            .sum();
        if traversed != recomputed {
            return Err(DecodeError::DistanceMismatch {
                vehicle,
                traversed,
                recomputed,
            });
        }

        log::debug!(
            "vehicle {vehicle}: {} stops, distance {traversed}",
            stops.len()
        );
        total_distance += traversed;
        routes.push(DecodedRoute {
            stops,
            distance: traversed,
        });
    }

    Ok(Solution {
        routes,
        total_distance,
    })
}

fn id_of(model: &RoutingModel, index: usize) -> Result<NodeId, DecodeError> {
    model
        .mapping()
        .id_of(index)
        .ok_or(DecodeError::UnknownIndex { index })
}
