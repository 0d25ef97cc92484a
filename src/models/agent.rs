use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{AgentId, GeoPoint, OrderId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgentStatus {
    Available,
    Busy { order: OrderId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAgent {
    pub id: AgentId,
    pub name: String,
    pub location: GeoPoint,
    pub status: AgentStatus,
}

impl DeliveryAgent {
    pub fn new(id: AgentId, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            status: AgentStatus::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == AgentStatus::Available
    }

    pub fn current_order(&self) -> Option<OrderId> {
        match self.status {
            AgentStatus::Available => None,
            AgentStatus::Busy { order } => Some(order),
        }
    }

    pub fn take(&mut self, order: OrderId) -> Result<(), AppError> {
        if !self.is_available() {
            return Err(AppError::AgentBusy(self.id));
        }

        self.status = AgentStatus::Busy { order };
        Ok(())
    }

    pub fn release(&mut self) -> Result<OrderId, AppError> {
        let order = self.current_order().ok_or(AppError::AgentIdle(self.id))?;
        self.status = AgentStatus::Available;
        Ok(order)
    }
}
