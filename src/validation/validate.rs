use tracing::debug;

use super::schema::{ComputeDeliveryEstimation, CoordinateInput, ProductInput};
use crate::domain::types::{
    Coordinate, DeliveryEstimationRequest, Dimensions, OrderPriority, Product, ProductRequest,
};
use crate::error::{ValidationError, ValidationIssue};

/// Turn a wire request into a typed request, or report the first offending field.
pub fn validate(
    input: &ComputeDeliveryEstimation,
) -> Result<DeliveryEstimationRequest, ValidationError> {
    if input.products.is_empty() {
        return Err(ValidationError::new("products", ValidationIssue::Empty));
    }

    let products = input
        .products
        .iter()
        .enumerate()
        .map(|(idx, product)| validate_product(idx, product))
        .collect::<Result<Vec<_>, _>>()?;

    let pickup = validate_coordinate("pickup", &input.pickup)?;
    let delivery = validate_coordinate("delivery", &input.delivery)?;
    let priority: OrderPriority = input.priority.parse()?;

    debug!(
        "Validated request: {} products, {} -> {}, {}",
        products.len(),
        pickup,
        delivery,
        priority
    );

    Ok(DeliveryEstimationRequest {
        products,
        pickup,
        delivery,
        priority,
    })
}

fn validate_product(idx: usize, input: &ProductInput) -> Result<ProductRequest, ValidationError> {
    let field = |name: &str| format!("products[{idx}].{name}");

    let dimensions = Dimensions {
        length: positive(field("dimensions.length"), input.length)?,
        width: positive(field("dimensions.width"), input.width)?,
        height: positive(field("dimensions.height"), input.height)?,
    };
    let weight_lbs = positive(field("weight"), input.weight)?;

    let quantity = u32::try_from(input.quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or_else(|| {
            ValidationError::new(field("quantity"), ValidationIssue::InvalidQuantity(input.quantity))
        })?;

    Ok(ProductRequest {
        product: Product {
            name: input.name.clone(),
            dimensions,
            weight_lbs,
        },
        quantity,
    })
}

fn validate_coordinate(name: &str, input: &CoordinateInput) -> Result<Coordinate, ValidationError> {
    let latitude = in_range(format!("{name}.latitude"), input.latitude, -90.0, 90.0)?;
    let longitude = in_range(format!("{name}.longitude"), input.longitude, -180.0, 180.0)?;
    Ok(Coordinate::new(latitude, longitude))
}

fn positive(field: String, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::new(field, ValidationIssue::NotPositive(value)))
    }
}

fn in_range(field: String, value: f64, min: f64, max: f64) -> Result<f64, ValidationError> {
    // NaN fails both comparisons, so it is rejected here too
    if value >= min && value <= max {
        Ok(value)
    } else {
        Err(ValidationError::new(
            field,
            ValidationIssue::OutOfRange { value, min, max },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(l: f64, w: f64, h: f64, weight: f64, quantity: i64) -> ProductInput {
        ProductInput {
            name: None,
            length: l,
            width: w,
            height: h,
            weight,
            quantity,
        }
    }

    fn request(products: Vec<ProductInput>) -> ComputeDeliveryEstimation {
        ComputeDeliveryEstimation {
            products,
            pickup: CoordinateInput {
                latitude: 40.0,
                longitude: -73.0,
            },
            delivery: CoordinateInput {
                latitude: 41.0,
                longitude: -74.0,
            },
            priority: "standard".to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        let validated = validate(&request(vec![product(10.0, 10.0, 10.0, 50.0, 3)])).unwrap();
        assert_eq!(validated.products().len(), 1);
        assert_eq!(validated.products()[0].quantity, 3);
        assert_eq!(validated.priority(), OrderPriority::Standard);
        assert_eq!(validated.pickup(), Coordinate::new(40.0, -73.0));
    }

    #[test]
    fn test_empty_products() {
        let err = validate(&request(vec![])).unwrap_err();
        assert_eq!(err.field, "products");
        assert_eq!(err.issue, ValidationIssue::Empty);
    }

    #[test]
    fn test_non_positive_dimension_names_field() {
        let err = validate(&request(vec![
            product(1.0, 1.0, 1.0, 1.0, 1),
            product(1.0, 1.0, 0.0, 1.0, 1),
        ]))
        .unwrap_err();
        assert_eq!(err.field, "products[1].dimensions.height");
        assert_eq!(err.issue, ValidationIssue::NotPositive(0.0));
    }

    #[test]
    fn test_bad_weight_and_nan() {
        let err = validate(&request(vec![product(1.0, 1.0, 1.0, -5.0, 1)])).unwrap_err();
        assert_eq!(err.field, "products[0].weight");

        let err = validate(&request(vec![product(f64::NAN, 1.0, 1.0, 1.0, 1)])).unwrap_err();
        assert_eq!(err.field, "products[0].dimensions.length");

        let err =
            validate(&request(vec![product(1.0, f64::INFINITY, 1.0, 1.0, 1)])).unwrap_err();
        assert_eq!(err.field, "products[0].dimensions.width");
    }

    #[test]
    fn test_quantity_must_be_at_least_one() {
        for quantity in [0, -1, i64::from(u32::MAX) + 1] {
            let err = validate(&request(vec![product(1.0, 1.0, 1.0, 1.0, quantity)])).unwrap_err();
            assert_eq!(err.field, "products[0].quantity");
            assert_eq!(err.issue, ValidationIssue::InvalidQuantity(quantity));
        }
    }

    #[test]
    fn test_coordinate_bounds() {
        let mut input = request(vec![product(1.0, 1.0, 1.0, 1.0, 1)]);
        input.pickup.latitude = 90.0;
        input.delivery.longitude = -180.0;
        assert!(validate(&input).is_ok());

        input.pickup.latitude = 90.0001;
        let err = validate(&input).unwrap_err();
        assert_eq!(err.field, "pickup.latitude");

        input.pickup.latitude = 0.0;
        input.delivery.longitude = 181.0;
        let err = validate(&input).unwrap_err();
        assert_eq!(err.field, "delivery.longitude");
        assert_eq!(
            err.issue,
            ValidationIssue::OutOfRange {
                value: 181.0,
                min: -180.0,
                max: 180.0
            }
        );
    }

    #[test]
    fn test_unknown_priority() {
        let mut input = request(vec![product(1.0, 1.0, 1.0, 1.0, 1)]);
        input.priority = "teleport".to_string();
        let err = validate(&input).unwrap_err();
        assert_eq!(err.field, "priority");
    }
}
