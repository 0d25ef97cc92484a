use serde::Serialize;

use crate::models::agent::DeliveryAgent;
use crate::models::assignment::Assignment;
use crate::models::customer::Customer;
use crate::models::order::Order;
use crate::models::restaurant::Restaurant;
use crate::state::AppState;
use crate::support::{ResolvedTicket, Ticket};

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub customers: &'a [Customer],
    pub restaurants: &'a [Restaurant],
    pub agents: &'a [DeliveryAgent],
    pub orders: &'a [Order],
    pub assignments: &'a [Assignment],
    pub active_tickets: Vec<&'a Ticket>,
    pub resolved_tickets: &'a [ResolvedTicket],
}

impl<'a> RunReport<'a> {
    pub fn capture(state: &'a AppState) -> Self {
        Self {
            customers: state.system.customers(),
            restaurants: state.system.restaurants(),
            agents: state.system.agents(),
            orders: state.system.orders(),
            assignments: state.system.assignments(),
            active_tickets: state.support.view_active_tickets().collect(),
            resolved_tickets: state.support.resolved(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
