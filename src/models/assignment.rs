use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AgentId, OrderId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub order_id: OrderId,
    pub agent_id: AgentId,
    pub distance: f64,
    pub assigned_at: DateTime<Utc>,
}
