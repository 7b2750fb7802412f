use std::collections::HashMap;

use crate::domain::types::{OrderPriority, VehicleInfo};
use crate::error::ConfigurationError;

/// Multipliers applied for one priority tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityTerms {
    pub price_multiplier: f64,
    pub time_multiplier: f64,
}

/// Priority-to-multiplier mapping injected into the estimator.
/// Construction guarantees every tier has terms.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingPolicy {
    standard: PriorityTerms,
    express: PriorityTerms,
    average_speed_mph: f64,
}

impl PricingPolicy {
    pub fn from_terms(
        mut terms: HashMap<OrderPriority, PriorityTerms>,
        average_speed_mph: f64,
    ) -> Result<Self, ConfigurationError> {
        let mut take = |priority: OrderPriority| {
            terms
                .remove(&priority)
                .ok_or_else(|| ConfigurationError::IncompletePolicy(priority.to_string()))
        };
        let standard = take(OrderPriority::Standard)?;
        let express = take(OrderPriority::Express)?;

        for (priority, tier) in [
            (OrderPriority::Standard, &standard),
            (OrderPriority::Express, &express),
        ] {
            let tag = priority.as_str().to_ascii_uppercase();
            ensure_positive(&format!("PRICE_MULTIPLIER_{tag}"), tier.price_multiplier)?;
            ensure_positive(&format!("TIME_MULTIPLIER_{tag}"), tier.time_multiplier)?;
        }
        ensure_positive("AVERAGE_SPEED_MPH", average_speed_mph)?;

        Ok(Self {
            standard,
            express,
            average_speed_mph,
        })
    }

    pub fn terms(&self, priority: OrderPriority) -> &PriorityTerms {
        match priority {
            OrderPriority::Standard => &self.standard,
            OrderPriority::Express => &self.express,
        }
    }

    pub fn average_speed_mph(&self) -> f64 {
        self.average_speed_mph
    }
}

fn ensure_positive(key: &str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a finite number greater than zero".to_string(),
        })
    }
}

/// `price_per_mile × distance × priority multiplier`
pub fn price_estimate(
    vehicle: &VehicleInfo,
    distance_miles: f64,
    priority: OrderPriority,
    policy: &PricingPolicy,
) -> f64 {
    vehicle.price_per_mile * distance_miles * policy.terms(priority).price_multiplier
}

/// Driving time in minutes, scaled by the tier's time multiplier
pub fn time_estimate_minutes(
    distance_miles: f64,
    priority: OrderPriority,
    policy: &PricingPolicy,
) -> f64 {
    distance_miles / policy.average_speed_mph() * 60.0 * policy.terms(priority).time_multiplier
}
