use crate::config::constant::MILES_PER_KILOMETER;

pub fn convert_kilometer_to_miles(km: f64) -> f64 {
    km * MILES_PER_KILOMETER
}

pub fn convert_miles_to_kilometer(miles: f64) -> f64 {
    miles / MILES_PER_KILOMETER
}

pub fn convert_meters_to_miles(meters: f64) -> f64 {
    convert_kilometer_to_miles(meters / 1000.0)
}

/// Relative comparison used for the conversion round trips
pub fn approx_eq(a: f64, b: f64, rel_tolerance: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= rel_tolerance * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_known_conversions() {
        assert!((convert_kilometer_to_miles(1.0) - 0.621371).abs() < 1e-12);
        assert!((convert_miles_to_kilometer(1.0) - 1.609344).abs() < 1e-5);
        assert!((convert_meters_to_miles(1609.344) - 1.0).abs() < 1e-5);
        assert_eq!(convert_kilometer_to_miles(0.0), 0.0);
    }

    #[test]
    fn test_conversion_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1_000 {
            let x: f64 = rng.gen_range(1e-6..1e7);
            assert!(approx_eq(
                convert_miles_to_kilometer(convert_kilometer_to_miles(x)),
                x,
                1e-6
            ));
            assert!(approx_eq(
                convert_kilometer_to_miles(convert_miles_to_kilometer(x)),
                x,
                1e-6
            ));
        }
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(100.0, 100.00001, 1e-6));
        assert!(!approx_eq(100.0, 100.1, 1e-6));
        assert!(approx_eq(0.0, 0.0, 1e-6));
    }
}
