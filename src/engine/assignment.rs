use tracing::{debug, warn};

use crate::geo::euclidean;
use crate::models::{AgentId, GeoPoint, OrderId};

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAssignment {
    pub order_id: OrderId,
    pub agent_id: AgentId,
    pub distance: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentPlan {
    pub assignments: Vec<PlannedAssignment>,
    pub unassigned: Vec<OrderId>,
    pub drivers_exhausted: bool,
}

/// Index and distance of the closest driver; the earliest one wins a tie.
pub fn nearest_driver(drivers: &[(AgentId, GeoPoint)], target: &GeoPoint) -> Option<(usize, f64)> {
    drivers
        .iter()
        .enumerate()
        .map(|(idx, (_, location))| (idx, euclidean(location, target)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Matches `pending` (already in dispatch order, paired with each order's
/// restaurant location) against the available-driver snapshot. A driver taken
/// by one order is not offered to later orders of the same pass.
pub fn plan_assignments(
    pending: &[(OrderId, GeoPoint)],
    mut available: Vec<(AgentId, GeoPoint)>,
) -> AssignmentPlan {
    let mut plan = AssignmentPlan::default();

    for (position, (order_id, restaurant)) in pending.iter().enumerate() {
        let Some((idx, distance)) = nearest_driver(&available, restaurant) else {
            warn!(order_id = %order_id, waiting = pending.len() - position, "no drivers available");
            plan.drivers_exhausted = true;
            plan.unassigned
                .extend(pending[position..].iter().map(|(id, _)| *id));
            break;
        };

        let (agent_id, _) = available.remove(idx);
        debug!(order_id = %order_id, agent_id = %agent_id, distance, "nearest driver selected");
        plan.assignments.push(PlannedAssignment {
            order_id: *order_id,
            agent_id,
            distance,
        });
    }

    plan
}
