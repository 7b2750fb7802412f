use crate::config::constant::EARTH_RADIUS_KM;
use crate::domain::types::Coordinate;
use crate::utils::convert_kilometer_to_miles;

/// Haversine distance in kilometers
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Clamp guards against a drifting slightly above 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Great-circle distance between pickup and delivery, in miles
pub fn compute_distance(pickup: Coordinate, delivery: Coordinate) -> f64 {
    convert_kilometer_to_miles(haversine_km(pickup, delivery))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let p = Coordinate::new(40.7128, -74.0060);
        assert_eq!(compute_distance(p, p), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // 6371 km × π / 180
        let km = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((km - 111.194_926_6).abs() < 1e-4);
    }

    #[test]
    fn test_new_york_to_los_angeles() {
        let nyc = Coordinate::new(40.7128, -74.0060);
        let la = Coordinate::new(34.0522, -118.2437);
        let miles = compute_distance(nyc, la);
        assert!((miles - 2445.0).abs() < 5.0, "got {miles}");
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinate::new(51.5074, -0.1278);
        let b = Coordinate::new(48.8566, 2.3522);
        assert!((compute_distance(a, b) - compute_distance(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal_points() {
        let km = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!((km - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }
}
