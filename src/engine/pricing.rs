use crate::geo::euclidean;
use crate::models::GeoPoint;

pub const FEE_PER_UNIT: f64 = 10.0;

pub fn delivery_fee(customer: &GeoPoint, restaurant: &GeoPoint) -> f64 {
    round_cents(euclidean(customer, restaurant) * FEE_PER_UNIT)
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{delivery_fee, round_cents};
    use crate::models::GeoPoint;

    #[test]
    fn fee_scales_distance_by_ten() {
        let customer = GeoPoint::new(10.0, 5.0);
        let dominoes = GeoPoint::new(5.0, 5.0);
        assert_eq!(delivery_fee(&customer, &dominoes), 50.0);
    }

    #[test]
    fn fee_is_rounded_to_two_decimals() {
        let customer = GeoPoint::new(10.0, 5.0);
        let burger_singh = GeoPoint::new(2.0, 6.0);
        // sqrt(65) * 10 = 80.6225...
        assert_eq!(delivery_fee(&customer, &burger_singh), 80.62);
    }

    #[test]
    fn fee_matches_formula_and_is_symmetric() {
        let points = [
            (0.0, 0.0),
            (1.5, -2.25),
            (10.0, 5.0),
            (-7.3, 4.1),
            (123.456, 78.9),
        ];

        for &(x1, y1) in &points {
            for &(x2, y2) in &points {
                let a = GeoPoint::new(x1, y1);
                let b = GeoPoint::new(x2, y2);
                let expected =
                    round_cents(((x1 - x2) * (x1 - x2) + (y1 - y2) * (y1 - y2)).sqrt() * 10.0);

                assert_eq!(delivery_fee(&a, &b), expected);
                assert_eq!(delivery_fee(&a, &b), delivery_fee(&b, &a));
            }
        }
    }

    #[test]
    fn same_location_is_free() {
        let p = GeoPoint::new(3.0, 3.0);
        assert_eq!(delivery_fee(&p, &p), 0.0);
    }
}
