use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{AgentId, CustomerId, OrderId, RestaurantId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    Initiated,
    Accepted,
    Rejected,
    Deployed,
    Delivered,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Initiated, OrderStatus::Accepted)
                | (OrderStatus::Initiated, OrderStatus::Rejected)
                | (OrderStatus::Accepted, OrderStatus::Deployed)
                | (OrderStatus::Deployed, OrderStatus::Delivered)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Rejected | OrderStatus::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Initiated => "Initiated",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Deployed => "Deployed",
            OrderStatus::Delivered => "Delivered",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerId,
    pub restaurant: RestaurantId,
    pub items: BTreeSet<String>,
    pub priority: bool,
    pub status: OrderStatus,
    pub agent: Option<AgentId>,
    pub fee: f64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        id: OrderId,
        customer: CustomerId,
        restaurant: RestaurantId,
        items: BTreeSet<String>,
        priority: bool,
        fee: f64,
    ) -> Self {
        Self {
            id,
            customer,
            restaurant,
            items,
            priority,
            status: OrderStatus::Initiated,
            agent: None,
            fee,
            created_at: Utc::now(),
        }
    }

    pub fn transition(&mut self, next: OrderStatus) -> Result<(), AppError> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition {
                order: self.id,
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        Ok(())
    }

    /// Orders waiting for a driver: accepted and never bound to one.
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Accepted && self.agent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{Order, OrderStatus};
    use crate::error::AppError;
    use crate::models::{CustomerId, OrderId, RestaurantId};

    fn order() -> Order {
        Order::new(
            OrderId(0),
            CustomerId(0),
            RestaurantId(0),
            BTreeSet::from(["Pizza".to_string()]),
            false,
            50.0,
        )
    }

    #[test]
    fn new_order_starts_initiated_without_agent() {
        let order = order();
        assert_eq!(order.status, OrderStatus::Initiated);
        assert!(order.agent.is_none());
        assert!(!order.is_pending());
    }

    #[test]
    fn walks_the_happy_path() {
        let mut order = order();
        order.transition(OrderStatus::Accepted).unwrap();
        assert!(order.is_pending());
        order.transition(OrderStatus::Deployed).unwrap();
        order.transition(OrderStatus::Delivered).unwrap();
        assert!(order.status.is_terminal());
    }

    #[test]
    fn rejected_is_terminal() {
        let mut order = order();
        order.transition(OrderStatus::Rejected).unwrap();

        let err = order.transition(OrderStatus::Accepted).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTransition {
                from: OrderStatus::Rejected,
                to: OrderStatus::Accepted,
                ..
            }
        ));
        assert_eq!(order.status, OrderStatus::Rejected);
    }

    #[test]
    fn cannot_skip_acceptance() {
        let mut order = order();
        assert!(order.transition(OrderStatus::Deployed).is_err());
        assert!(order.transition(OrderStatus::Delivered).is_err());
        assert_eq!(order.status, OrderStatus::Initiated);
    }
}
