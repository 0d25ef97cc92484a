use crate::models::GeoPoint;

pub fn euclidean(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::euclidean;
    use crate::models::GeoPoint;

    #[test]
    fn zero_distance_for_same_point() {
        let p = GeoPoint::new(5.0, 5.0);
        assert!(euclidean(&p, &p) < 1e-12);
    }

    #[test]
    fn three_four_five_triangle() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert!((euclidean(&a, &b) - 5.0).abs() < 1e-12);
        assert!((euclidean(&b, &a) - 5.0).abs() < 1e-12);
    }
}
