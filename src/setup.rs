use crate::models::GeoPoint;
use crate::system::DeliverySystem;

pub struct RestaurantSeed {
    pub name: &'static str,
    pub location: GeoPoint,
    /// The first entry is what the demo customer orders.
    pub menu: &'static [(&'static str, f64)],
}

pub const CUSTOMER_LOCATION: GeoPoint = GeoPoint::new(10.0, 5.0);

pub const RESTAURANTS: &[RestaurantSeed] = &[
    RestaurantSeed {
        name: "Dominoes",
        location: GeoPoint::new(5.0, 5.0),
        menu: &[("Pizza", 100.0), ("Pasta", 40.0)],
    },
    RestaurantSeed {
        name: "Burger Singh",
        location: GeoPoint::new(2.0, 6.0),
        menu: &[("Burger", 60.0), ("Fries", 35.0)],
    },
];

pub const DRIVERS: &[(&str, GeoPoint)] = &[
    ("Rakesh", GeoPoint::new(5.0, 5.0)),
    ("Sonu", GeoPoint::new(2.0, 6.0)),
];

pub fn featured_item(restaurant: &str) -> Option<&'static str> {
    RESTAURANTS
        .iter()
        .find(|seed| seed.name == restaurant)
        .and_then(|seed| seed.menu.first())
        .map(|(item, _)| *item)
}

pub fn demo_system() -> DeliverySystem {
    let mut system = DeliverySystem::new();

    for seed in RESTAURANTS {
        let menu = seed
            .menu
            .iter()
            .map(|(item, price)| (item.to_string(), *price))
            .collect();
        system.add_restaurant(seed.name, seed.location, menu);
    }

    for (name, location) in DRIVERS {
        system.add_delivery_agent(*name, *location);
    }

    system
}

#[cfg(test)]
mod tests {
    use super::{demo_system, featured_item};

    #[test]
    fn demo_world_has_two_restaurants_and_two_idle_drivers() {
        let system = demo_system();
        assert_eq!(system.restaurants().len(), 2);
        assert_eq!(system.agents().len(), 2);
        assert!(system.agents().iter().all(|agent| agent.is_available()));
        assert!(system.customers().is_empty());

        let dominoes = system.find_restaurant("Dominoes").unwrap();
        assert_eq!(dominoes.menu.get("Pizza"), Some(&100.0));
        assert!(system.find_restaurant("dominoes").is_none());
    }

    #[test]
    fn featured_item_is_first_on_the_menu() {
        assert_eq!(featured_item("Dominoes"), Some("Pizza"));
        assert_eq!(featured_item("Burger Singh"), Some("Burger"));
        assert_eq!(featured_item("Taco Town"), None);
    }
}
