use serde::{Deserialize, Serialize};

use crate::models::{CustomerId, GeoPoint, OrderId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub location: GeoPoint,
    pub history: Vec<OrderId>,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            history: Vec::new(),
        }
    }

    pub fn record_order(&mut self, order: OrderId) {
        self.history.push(order);
    }
}
