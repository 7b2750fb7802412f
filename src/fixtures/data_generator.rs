use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::validation::{ComputeDeliveryEstimation, CoordinateInput, ProductInput};

const PRODUCT_NAMES: [&str; 8] = [
    "Box", "Chair", "Desk", "Lamp", "Sofa", "Mattress", "Fridge", "Pallet",
];

/// A point within roughly half a degree of `center`
fn random_coordinate(rng: &mut ChaCha8Rng, center: (f64, f64)) -> CoordinateInput {
    CoordinateInput {
        latitude: (center.0 + rng.gen_range(-0.5..0.5)).clamp(-90.0, 90.0),
        longitude: (center.1 + rng.gen_range(-0.5..0.5)).clamp(-180.0, 180.0),
    }
}

fn random_product(rng: &mut ChaCha8Rng) -> ProductInput {
    let name = PRODUCT_NAMES[rng.gen_range(0..PRODUCT_NAMES.len())];
    ProductInput {
        name: Some(name.to_string()),
        length: rng.gen_range(4..=96) as f64,
        width: rng.gen_range(4..=60) as f64,
        height: rng.gen_range(2..=48) as f64,
        weight: (rng.gen_range(1.0..400.0_f64) * 10.0).round() / 10.0,
        quantity: rng.gen_range(1..=12),
    }
}

/// Deterministic batch of requests around `center` (lat, lon).
/// Large manifests can exceed every vehicle's capacity.
pub fn generate_random_requests(
    count: usize,
    seed: u64,
    center: (f64, f64),
) -> Vec<ComputeDeliveryEstimation> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let requests: Vec<ComputeDeliveryEstimation> = (0..count)
        .map(|_| {
            let product_count = rng.gen_range(1..=5);
            ComputeDeliveryEstimation {
                products: (0..product_count).map(|_| random_product(&mut rng)).collect(),
                pickup: random_coordinate(&mut rng, center),
                delivery: random_coordinate(&mut rng, center),
                priority: if rng.gen_bool(0.3) { "express" } else { "standard" }.to_string(),
            }
        })
        .collect();

    info!("Generated {} random requests (seed {})", requests.len(), seed);
    requests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_random_requests(10, 7, (40.7, -74.0));
        let b = generate_random_requests(10, 7, (40.7, -74.0));
        assert_eq!(a, b);
        assert_ne!(a, generate_random_requests(10, 8, (40.7, -74.0)));
    }

    #[test]
    fn test_generated_requests_validate() {
        for request in generate_random_requests(50, 64, (89.9, 179.9)) {
            assert!(validate(&request).is_ok(), "{request:?}");
        }
    }
}
