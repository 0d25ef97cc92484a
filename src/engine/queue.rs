use crate::models::OrderId;
use crate::models::order::Order;

/// Priority orders first, then the rest; relative order inside each group is kept.
pub fn dispatch_sequence<'a, I>(pending: I) -> Vec<OrderId>
where
    I: IntoIterator<Item = &'a Order>,
{
    let (priority, normal): (Vec<&Order>, Vec<&Order>) =
        pending.into_iter().partition(|order| order.priority);

    priority
        .into_iter()
        .chain(normal)
        .map(|order| order.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::dispatch_sequence;
    use crate::models::order::Order;
    use crate::models::{CustomerId, OrderId, RestaurantId};

    fn order(id: usize, priority: bool) -> Order {
        Order::new(
            OrderId(id),
            CustomerId(0),
            RestaurantId(0),
            BTreeSet::new(),
            priority,
            0.0,
        )
    }

    #[test]
    fn priority_orders_come_first_and_keep_relative_order() {
        let orders = vec![
            order(0, false),
            order(1, true),
            order(2, false),
            order(3, true),
        ];

        assert_eq!(
            dispatch_sequence(&orders),
            vec![OrderId(1), OrderId(3), OrderId(0), OrderId(2)]
        );
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        let orders: Vec<Order> = Vec::new();
        assert!(dispatch_sequence(&orders).is_empty());
    }
}
