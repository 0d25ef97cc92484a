use thiserror::Error;

use crate::models::order::OrderStatus;
use crate::models::{AgentId, OrderId};
use crate::support::TicketId;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid restaurant choice: {0:?}")]
    InvalidRestaurant(String),

    #[error("no drivers available")]
    NoDriversAvailable,

    #[error("ticket {0} not found")]
    TicketNotFound(TicketId),

    #[error("{order} cannot move from {from} to {to}")]
    InvalidTransition {
        order: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("{0} is already carrying an order")]
    AgentBusy(AgentId),

    #[error("{0} has no order to deliver")]
    AgentIdle(AgentId),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}
