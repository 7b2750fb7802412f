use rayon::prelude::*;
use tracing::{debug, info, span, Level};

use crate::config::RetryPolicy;
use crate::distance::{compute_distance, lookup_distance, DistanceSource};
use crate::domain::catalog::VehicleCatalog;
use crate::domain::types::{DeliveryEstimationRequest, DeliveryEstimationResult, Load, VehicleInfo};
use crate::error::{EstimationError, Result};
use crate::evaluation::{compute_load, price_estimate, select_vehicle, time_estimate_minutes, PricingPolicy};
use crate::validation::{validate, ComputeDeliveryEstimation};

/// A validated request with its load and vehicle chosen, waiting for a distance
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationPlan {
    pub request: DeliveryEstimationRequest,
    pub load: Load,
    pub vehicle: VehicleInfo,
}

/// Pure estimation pipeline over an injected catalog and pricing policy.
/// Holds no mutable state; share it by reference across threads.
#[derive(Debug, Clone)]
pub struct Estimator {
    catalog: VehicleCatalog,
    pricing: PricingPolicy,
}

impl Estimator {
    pub fn new(catalog: VehicleCatalog, pricing: PricingPolicy) -> Self {
        Self { catalog, pricing }
    }

    pub fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// validate → load → vehicle selection
    pub fn plan(&self, input: &ComputeDeliveryEstimation) -> Result<EstimationPlan> {
        let request = validate(input)?;
        let load = compute_load(request.products());
        let vehicle = select_vehicle(&load, &self.catalog)?;
        Ok(EstimationPlan {
            request,
            load,
            vehicle,
        })
    }

    /// Price a plan for a known distance
    pub fn finish(&self, plan: EstimationPlan, distance_miles: f64) -> DeliveryEstimationResult {
        let priority = plan.request.priority();
        let price = price_estimate(&plan.vehicle, distance_miles, priority, &self.pricing);
        let estimated_minutes = time_estimate_minutes(distance_miles, priority, &self.pricing);

        debug!(
            "{} over {:.2} mi at {} priority: ${:.2}, {:.1} min",
            plan.vehicle.vehicle_type, distance_miles, priority, price, estimated_minutes
        );

        DeliveryEstimationResult {
            vehicle_type: plan.vehicle.vehicle_type,
            price_per_mile: plan.vehicle.price_per_mile,
            load: plan.load,
            distance_miles,
            price,
            estimated_minutes,
            priority,
        }
    }

    /// Full pipeline using great-circle distance. Stops at the first error.
    pub fn estimate(&self, input: &ComputeDeliveryEstimation) -> Result<DeliveryEstimationResult> {
        let span = span!(Level::DEBUG, "estimate", products = input.products.len());
        let _guard = span.enter();

        let plan = self.plan(input)?;
        let distance_miles = compute_distance(plan.request.pickup(), plan.request.delivery());
        Ok(self.finish(plan, distance_miles))
    }

    /// Same pipeline, with the distance taken from `source`.
    /// Retries and timeouts for network sources are governed by `retry`.
    pub async fn estimate_with_source(
        &self,
        input: &ComputeDeliveryEstimation,
        source: &DistanceSource,
        retry: &RetryPolicy,
    ) -> Result<DeliveryEstimationResult> {
        let plan = self.plan(input)?;
        let distance_miles = lookup_distance(
            source,
            plan.request.pickup(),
            plan.request.delivery(),
            retry,
        )
        .await?;
        Ok(self.finish(plan, distance_miles))
    }

    /// Estimate independent requests in parallel, preserving order
    pub fn estimate_batch(
        &self,
        inputs: &[ComputeDeliveryEstimation],
    ) -> Vec<Result<DeliveryEstimationResult>> {
        info!("Estimating batch of {} requests", inputs.len());
        inputs.par_iter().map(|input| self.estimate(input)).collect()
    }

    pub fn plan_batch(&self, inputs: &[ComputeDeliveryEstimation]) -> Vec<Result<EstimationPlan>> {
        inputs.par_iter().map(|input| self.plan(input)).collect()
    }
}

/// True when an estimate failed because the load is too large
pub fn is_unfulfillable(err: &EstimationError) -> bool {
    matches!(err, EstimationError::NoFeasibleVehicle(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{OrderPriority, VehicleType};
    use crate::evaluation::PriorityTerms;
    use crate::validation::{CoordinateInput, ProductInput};
    use std::collections::HashMap;

    fn estimator() -> Estimator {
        let terms = HashMap::from([
            (
                OrderPriority::Standard,
                PriorityTerms {
                    price_multiplier: 1.0,
                    time_multiplier: 1.0,
                },
            ),
            (
                OrderPriority::Express,
                PriorityTerms {
                    price_multiplier: 2.0,
                    time_multiplier: 0.5,
                },
            ),
        ]);
        Estimator::new(
            VehicleCatalog::standard(),
            PricingPolicy::from_terms(terms, 30.0).unwrap(),
        )
    }

    fn input(products: Vec<ProductInput>, priority: &str) -> ComputeDeliveryEstimation {
        ComputeDeliveryEstimation {
            products,
            pickup: CoordinateInput {
                latitude: 0.0,
                longitude: 0.0,
            },
            delivery: CoordinateInput {
                latitude: 0.1,
                longitude: 0.0,
            },
            priority: priority.to_string(),
        }
    }

    fn boxes(quantity: i64) -> ProductInput {
        ProductInput {
            name: Some("box".to_string()),
            length: 10.0,
            width: 10.0,
            height: 10.0,
            weight: 50.0,
            quantity,
        }
    }

    #[test]
    fn test_estimate_prices_distance() {
        let result = estimator().estimate(&input(vec![boxes(1)], "standard")).unwrap();
        let expected_miles = compute_distance(
            crate::domain::types::Coordinate::new(0.0, 0.0),
            crate::domain::types::Coordinate::new(0.1, 0.0),
        );
        assert_eq!(result.vehicle_type, VehicleType::CompactSedan);
        assert!((result.distance_miles - expected_miles).abs() < 1e-12);
        assert!((result.price - 1.5 * expected_miles).abs() < 1e-9);
        assert!((result.estimated_minutes - expected_miles * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_express_multiplier_applies() {
        let standard = estimator().estimate(&input(vec![boxes(1)], "standard")).unwrap();
        let express = estimator().estimate(&input(vec![boxes(1)], "express")).unwrap();
        assert!((express.price - standard.price * 2.0).abs() < 1e-9);
        assert!((express.estimated_minutes - standard.estimated_minutes * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_validation_error_short_circuits() {
        let err = estimator().estimate(&input(vec![boxes(0)], "standard")).unwrap_err();
        assert!(matches!(err, EstimationError::Validation(ref e) if e.field == "products[0].quantity"));
    }

    #[test]
    fn test_infeasible_load() {
        // 1000 boxes × 50 lbs = 50 000 lbs, above freight's 45 000
        let err = estimator().estimate(&input(vec![boxes(1000)], "standard")).unwrap_err();
        assert!(is_unfulfillable(&err));
    }

    #[test]
    fn test_batch_preserves_order() {
        let inputs = vec![
            input(vec![boxes(1)], "standard"),
            input(vec![], "standard"),
            input(vec![boxes(30)], "express"),
        ];
        let results = estimator().estimate_batch(&inputs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().vehicle_type, VehicleType::CompactSedan);
        assert!(matches!(results[1], Err(EstimationError::Validation(_))));
        // 30 000 in³ / 1500 lbs: sedan volume fits but weight needs the SUV
        assert_eq!(results[2].as_ref().unwrap().vehicle_type, VehicleType::Suv);
    }

    #[tokio::test]
    async fn test_estimate_with_great_circle_source_matches_sync() {
        let est = estimator();
        let request = input(vec![boxes(2)], "express");
        let sync = est.estimate(&request).unwrap();
        let async_result = est
            .estimate_with_source(&request, &DistanceSource::GreatCircle, &RetryPolicy::default())
            .await
            .unwrap();
        assert_eq!(sync, async_result);
    }
}
