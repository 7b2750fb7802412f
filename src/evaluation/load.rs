use crate::domain::types::{Load, ProductRequest};

/// Sum volume (l × w × h × qty) and weight (weight × qty) over every product.
pub fn compute_load(products: &[ProductRequest]) -> Load {
    products.iter().fold(Load::default(), |acc, item| {
        let quantity = item.quantity as f64;
        Load {
            total_volume_cubic_inches: acc.total_volume_cubic_inches
                + item.product.dimensions.volume() * quantity,
            total_weight_lbs: acc.total_weight_lbs + item.product.weight_lbs * quantity,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Dimensions, Product};

    fn item(l: f64, w: f64, h: f64, weight: f64, quantity: u32) -> ProductRequest {
        ProductRequest {
            product: Product {
                name: None,
                dimensions: Dimensions {
                    length: l,
                    width: w,
                    height: h,
                },
                weight_lbs: weight,
            },
            quantity,
        }
    }

    #[test]
    fn test_single_product() {
        let load = compute_load(&[item(10.0, 10.0, 10.0, 50.0, 1)]);
        assert_eq!(load.total_volume_cubic_inches, 1000.0);
        assert_eq!(load.total_weight_lbs, 50.0);
    }

    #[test]
    fn test_quantities_multiply() {
        let load = compute_load(&[item(12.0, 12.0, 12.0, 20.5, 3), item(2.0, 3.0, 4.0, 1.25, 4)]);
        assert_eq!(load.total_volume_cubic_inches, 1728.0 * 3.0 + 24.0 * 4.0);
        assert_eq!(load.total_weight_lbs, 61.5 + 5.0);
    }

    #[test]
    fn test_fractional_dimensions_are_not_rounded() {
        let load = compute_load(&[item(0.5, 0.5, 0.5, 0.1, 1)]);
        assert_eq!(load.total_volume_cubic_inches, 0.125);
        assert_eq!(load.total_weight_lbs, 0.1);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(compute_load(&[]), Load::default());
    }
}
