use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::engine::assignment::plan_assignments;
use crate::engine::pricing::delivery_fee;
use crate::engine::queue::dispatch_sequence;
use crate::error::AppError;
use crate::models::agent::DeliveryAgent;
use crate::models::assignment::Assignment;
use crate::models::customer::Customer;
use crate::models::order::{Order, OrderStatus};
use crate::models::restaurant::{Decision, Restaurant};
use crate::models::{AgentId, CustomerId, GeoPoint, OrderId, RestaurantId};

#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentPass {
    pub assignments: Vec<Assignment>,
    pub waiting: Vec<OrderId>,
    pub drivers_exhausted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub enum ProcessOutcome {
    Rejected { order_id: OrderId },
    Accepted { order_id: OrderId, pass: AssignmentPass },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub order_id: OrderId,
    pub agent_id: AgentId,
}

#[derive(Debug, Default)]
pub struct DeliverySystem {
    customers: Vec<Customer>,
    restaurants: Vec<Restaurant>,
    agents: Vec<DeliveryAgent>,
    orders: Vec<Order>,
    accepted: Vec<OrderId>,
    assignments: Vec<Assignment>,
}

impl DeliverySystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_customer(&mut self, name: impl Into<String>, location: GeoPoint) -> CustomerId {
        let id = CustomerId(self.customers.len());
        self.customers.push(Customer::new(id, name, location));
        id
    }

    pub fn add_restaurant(
        &mut self,
        name: impl Into<String>,
        location: GeoPoint,
        menu: BTreeMap<String, f64>,
    ) -> RestaurantId {
        let id = RestaurantId(self.restaurants.len());
        self.restaurants
            .push(Restaurant::new(id, name, location, menu));
        id
    }

    pub fn add_delivery_agent(&mut self, name: impl Into<String>, location: GeoPoint) -> AgentId {
        let id = AgentId(self.agents.len());
        self.agents.push(DeliveryAgent::new(id, name, location));
        id
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn agents(&self) -> &[DeliveryAgent] {
        &self.agents
    }

    /// Every placed order, rejected ones included.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn customer(&self, id: CustomerId) -> Result<&Customer, AppError> {
        self.customers
            .get(id.index())
            .ok_or_else(|| AppError::NotFound(format!("{id} not found")))
    }

    pub fn restaurant(&self, id: RestaurantId) -> Result<&Restaurant, AppError> {
        self.restaurants
            .get(id.index())
            .ok_or_else(|| AppError::NotFound(format!("{id} not found")))
    }

    pub fn agent(&self, id: AgentId) -> Result<&DeliveryAgent, AppError> {
        self.agents
            .get(id.index())
            .ok_or_else(|| AppError::NotFound(format!("{id} not found")))
    }

    pub fn order(&self, id: OrderId) -> Result<&Order, AppError> {
        self.orders
            .get(id.index())
            .ok_or_else(|| AppError::NotFound(format!("{id} not found")))
    }

    pub fn find_restaurant(&self, name: &str) -> Option<&Restaurant> {
        self.restaurants
            .iter()
            .find(|restaurant| restaurant.name == name)
    }

    pub fn accepted_orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.accepted.iter().map(|id| &self.orders[id.index()])
    }

    pub fn pending_count(&self) -> usize {
        self.accepted_orders().filter(|order| order.is_pending()).count()
    }

    pub fn place_order<I, S>(
        &mut self,
        customer_id: CustomerId,
        restaurant_id: RestaurantId,
        items: I,
        priority: bool,
    ) -> Result<OrderId, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let customer_location = self.customer(customer_id)?.location;
        let restaurant_location = self.restaurant(restaurant_id)?.location;

        let id = OrderId(self.orders.len());
        let items: BTreeSet<String> = items.into_iter().map(Into::into).collect();
        let fee = delivery_fee(&customer_location, &restaurant_location);

        self.orders.push(Order::new(
            id,
            customer_id,
            restaurant_id,
            items,
            priority,
            fee,
        ));
        self.customers[customer_id.index()].record_order(id);
        self.restaurants[restaurant_id.index()].receive(id);

        info!(order_id = %id, customer_id = %customer_id, restaurant_id = %restaurant_id, priority, fee, "order placed");
        Ok(id)
    }

    /// Asks the restaurant to decide on an `Initiated` order; an accepted order
    /// joins the accepted set and triggers an assignment pass.
    pub fn process_order(&mut self, order_id: OrderId) -> Result<ProcessOutcome, AppError> {
        let order = self.order(order_id)?;
        let decision = self.restaurant(order.restaurant)?.decide(&order.items);

        match decision {
            Decision::Reject => {
                self.orders[order_id.index()].transition(OrderStatus::Rejected)?;
                warn!(order_id = %order_id, "order rejected by restaurant");
                Ok(ProcessOutcome::Rejected { order_id })
            }
            Decision::Accept => {
                self.orders[order_id.index()].transition(OrderStatus::Accepted)?;
                self.accepted.push(order_id);
                info!(order_id = %order_id, "order accepted by restaurant");

                let pass = self.assign_pending()?;
                Ok(ProcessOutcome::Accepted { order_id, pass })
            }
        }
    }

    /// Runs one assignment pass over every accepted order still without a driver.
    pub fn assign_pending(&mut self) -> Result<AssignmentPass, AppError> {
        let sequence = dispatch_sequence(self.accepted_orders().filter(|order| order.is_pending()));
        let pending: Vec<(OrderId, GeoPoint)> = sequence
            .into_iter()
            .map(|id| {
                let restaurant = self.orders[id.index()].restaurant;
                (id, self.restaurants[restaurant.index()].location)
            })
            .collect();
        let available: Vec<(AgentId, GeoPoint)> = self
            .agents
            .iter()
            .filter(|agent| agent.is_available())
            .map(|agent| (agent.id, agent.location))
            .collect();

        let plan = plan_assignments(&pending, available);

        let mut pass = AssignmentPass {
            assignments: Vec::with_capacity(plan.assignments.len()),
            waiting: plan.unassigned,
            drivers_exhausted: plan.drivers_exhausted,
        };

        for planned in plan.assignments {
            let order = &mut self.orders[planned.order_id.index()];
            order.transition(OrderStatus::Deployed)?;
            order.agent = Some(planned.agent_id);

            let agent = &mut self.agents[planned.agent_id.index()];
            agent.take(planned.order_id)?;

            info!(
                order_id = %planned.order_id,
                agent = %agent.name,
                distance = planned.distance,
                "driver dispatched"
            );

            let assignment = Assignment {
                order_id: planned.order_id,
                agent_id: planned.agent_id,
                distance: planned.distance,
                assigned_at: Utc::now(),
            };
            self.assignments.push(assignment.clone());
            pass.assignments.push(assignment);
        }

        Ok(pass)
    }

    pub fn deliver_order(&mut self, agent_id: AgentId) -> Result<Delivery, AppError> {
        let order_id = self
            .agent(agent_id)?
            .current_order()
            .ok_or(AppError::AgentIdle(agent_id))?;

        self.orders[order_id.index()].transition(OrderStatus::Delivered)?;
        let agent = &mut self.agents[agent_id.index()];
        agent.release()?;

        info!(order_id = %order_id, agent = %agent.name, "order delivered");
        Ok(Delivery { order_id, agent_id })
    }

    /// Completes the current order of every busy driver.
    pub fn simulate_delivery(&mut self) -> Result<Vec<Delivery>, AppError> {
        let busy: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|agent| !agent.is_available())
            .map(|agent| agent.id)
            .collect();

        busy.into_iter()
            .map(|agent_id| self.deliver_order(agent_id))
            .collect()
    }
}
