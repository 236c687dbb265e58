//! Fleet sizing from aggregate demand.

use crate::instance::Instance;

/// Minimum feasible vehicle count: `ceil(total_demand / capacity)`.
///
/// Exact integer ceiling division, so no floating-point rounding can shave a
/// vehicle off the bound. This is a lower bound only: a solver may still
/// report infeasibility at this fleet size, and retrying with more vehicles
/// is the caller's policy.
///
/// # Examples
/// ```
/// use caravan_core::{Instance, Node, min_fleet};
/// use geo::Coord;
///
/// # fn main() -> Result<(), caravan_core::InstanceError> {
/// let nodes = vec![
///     Node { id: 1, position: Coord { x: 0, y: 0 }, demand: 0 },
///     Node { id: 2, position: Coord { x: 1, y: 0 }, demand: 30 },
///     Node { id: 3, position: Coord { x: 2, y: 0 }, demand: 25 },
/// ];
/// let instance = Instance::new("demo", "EUC_2D", 20, 1, nodes)?;
/// assert_eq!(min_fleet(&instance), 3); // ceil(55 / 20)
/// # Ok(())
/// # }
/// ```
pub fn min_fleet(instance: &Instance) -> usize {
    // Instance validation guarantees non-negative demands and a positive
    // capacity, so both casts hold.
    let total = u64::try_from(instance.total_demand()).unwrap_or(0);
    if total == 0 {
        return 0;
    }
    let capacity = u64::try_from(instance.capacity()).unwrap_or(1);
    usize::try_from(total.div_ceil(capacity)).unwrap_or(usize::MAX)
}
