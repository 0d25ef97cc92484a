use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{GeoPoint, OrderId, RestaurantId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub location: GeoPoint,
    pub menu: BTreeMap<String, f64>,
    pub received: Vec<OrderId>,
}

impl Restaurant {
    pub fn new(
        id: RestaurantId,
        name: impl Into<String>,
        location: GeoPoint,
        menu: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            menu,
            received: Vec::new(),
        }
    }

    pub fn receive(&mut self, order: OrderId) {
        self.received.push(order);
    }

    pub fn subtotal(&self, items: &BTreeSet<String>) -> Option<f64> {
        items
            .iter()
            .map(|item| self.menu.get(item).copied())
            .sum::<Option<f64>>()
    }

    pub fn decide(&self, items: &BTreeSet<String>) -> Decision {
        if !items.is_empty() && self.subtotal(items).is_some() {
            Decision::Accept
        } else {
            Decision::Reject
        }
    }
}
