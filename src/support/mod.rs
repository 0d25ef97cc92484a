use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::models::customer::Customer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TicketId(u64);

impl TicketId {
    pub fn number(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CC-{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.trim()
            .strip_prefix("CC-")
            .and_then(|n| n.parse::<u64>().ok())
            .filter(|n| *n > 0)
            .map(TicketId)
            .ok_or_else(|| AppError::NotFound(format!("malformed ticket id {raw:?}")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub customer: String,
    pub issue: String,
    pub responses: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedTicket {
    pub ticket: Ticket,
    pub resolved_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CustomerCare {
    active: BTreeMap<TicketId, Ticket>,
    resolved: Vec<ResolvedTicket>,
    next_id: u64,
}

impl Default for CustomerCare {
    fn default() -> Self {
        Self {
            active: BTreeMap::new(),
            resolved: Vec::new(),
            next_id: 1,
        }
    }
}

impl CustomerCare {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a ticket; without a customer nothing is recorded.
    pub fn submit_ticket(
        &mut self,
        customer: Option<&Customer>,
        issue: impl Into<String>,
    ) -> Option<TicketId> {
        let Some(customer) = customer else {
            debug!("ticket submission without a customer ignored");
            return None;
        };

        let id = TicketId(self.next_id);
        self.next_id += 1;

        let ticket = Ticket {
            id,
            customer: customer.name.clone(),
            issue: issue.into(),
            responses: Vec::new(),
            submitted_at: Utc::now(),
        };
        info!(ticket_id = %id, customer = %ticket.customer, "ticket submitted");
        self.active.insert(id, ticket);

        Some(id)
    }

    pub fn respond_ticket(
        &mut self,
        id: TicketId,
        response: impl Into<String>,
    ) -> Result<&Ticket, AppError> {
        let Some(ticket) = self.active.get_mut(&id) else {
            warn!(ticket_id = %id, "response to unknown ticket ignored");
            return Err(AppError::TicketNotFound(id));
        };

        ticket.responses.push(response.into());
        info!(ticket_id = %id, responses = ticket.responses.len(), "ticket responded");
        Ok(&*ticket)
    }

    pub fn resolve_ticket(&mut self, id: TicketId) -> Result<&ResolvedTicket, AppError> {
        let Some(ticket) = self.active.remove(&id) else {
            warn!(ticket_id = %id, "resolution of unknown ticket ignored");
            return Err(AppError::TicketNotFound(id));
        };

        info!(ticket_id = %id, "ticket resolved");
        self.resolved.push(ResolvedTicket {
            ticket,
            resolved_at: Utc::now(),
        });

        let resolved = self.resolved.len() - 1;
        Ok(&self.resolved[resolved])
    }

    pub fn view_active_tickets(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.active.values()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn resolved(&self) -> &[ResolvedTicket] {
        &self.resolved
    }

    pub fn is_active(&self, id: TicketId) -> bool {
        self.active.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::{CustomerCare, TicketId};
    use crate::error::AppError;
    use crate::models::customer::Customer;
    use crate::models::{CustomerId, GeoPoint};

    fn customer() -> Customer {
        Customer::new(CustomerId(0), "Asha", GeoPoint::new(10.0, 5.0))
    }

    #[test]
    fn first_ticket_is_cc_1() {
        let mut care = CustomerCare::new();
        let id = care.submit_ticket(Some(&customer()), "cold pizza").unwrap();

        assert_eq!(id.to_string(), "CC-1");
        assert_eq!(care.active_count(), 1);
        let ticket = care.view_active_tickets().next().unwrap();
        assert_eq!(ticket.customer, "Asha");
        assert_eq!(ticket.issue, "cold pizza");
    }

    #[test]
    fn ids_are_not_reused_after_resolution() {
        let mut care = CustomerCare::new();
        let first = care.submit_ticket(Some(&customer()), "late").unwrap();
        care.resolve_ticket(first).unwrap();

        let second = care.submit_ticket(Some(&customer()), "late again").unwrap();

        assert_eq!(first.to_string(), "CC-1");
        assert_eq!(second.to_string(), "CC-2");
    }

    #[test]
    fn missing_customer_is_silently_ignored() {
        let mut care = CustomerCare::new();
        assert!(care.submit_ticket(None, "who am I").is_none());
        assert_eq!(care.active_count(), 0);
    }

    #[test]
    fn respond_records_response_on_active_ticket() {
        let mut care = CustomerCare::new();
        let id = care.submit_ticket(Some(&customer()), "late").unwrap();

        let ticket = care.respond_ticket(id, "On it").unwrap();
        assert_eq!(ticket.responses, vec!["On it".to_string()]);
    }

    #[test]
    fn respond_and_resolve_unknown_ticket_report_not_found() {
        let mut care = CustomerCare::new();
        let ghost: TicketId = "CC-7".parse().unwrap();

        assert!(matches!(
            care.respond_ticket(ghost, "hello"),
            Err(AppError::TicketNotFound(id)) if id == ghost
        ));
        assert!(matches!(
            care.resolve_ticket(ghost),
            Err(AppError::TicketNotFound(_))
        ));
        assert!(care.resolved().is_empty());
    }

    #[test]
    fn ticket_is_either_active_or_resolved() {
        let mut care = CustomerCare::new();
        let id = care.submit_ticket(Some(&customer()), "missing fries").unwrap();

        care.resolve_ticket(id).unwrap();

        assert!(!care.is_active(id));
        assert_eq!(care.resolved().len(), 1);
        assert_eq!(care.resolved()[0].ticket.id, id);
        assert!(matches!(
            care.resolve_ticket(id),
            Err(AppError::TicketNotFound(_))
        ));
        assert_eq!(care.resolved().len(), 1);
    }

    #[test]
    fn empty_desk_has_no_active_tickets() {
        let care = CustomerCare::new();
        assert_eq!(care.view_active_tickets().count(), 0);
        assert_eq!(care.active_count(), 0);
    }

    #[test]
    fn parses_ticket_ids() {
        assert_eq!("CC-3".parse::<TicketId>().unwrap().number(), 3);
        assert!("CC-0".parse::<TicketId>().is_err());
        assert!("3".parse::<TicketId>().is_err());
        assert!("CC-x".parse::<TicketId>().is_err());
    }
}
