use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationIssue};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }
}

/// A physical item to ship. Dimensions in inches, weight in pounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: Option<String>,
    pub dimensions: Dimensions,
    pub weight_lbs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub product: Product,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

// Declaration order is catalog order: smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleType {
    CompactSedan,
    Suv,
    Van,
    Truck,
    Freight,
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            VehicleType::CompactSedan => "compact-sedan",
            VehicleType::Suv => "suv",
            VehicleType::Van => "van",
            VehicleType::Truck => "truck",
            VehicleType::Freight => "freight",
        };
        f.write_str(tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub vehicle_type: VehicleType,
    pub price_per_mile: f64,
    pub max_capacity_in_cubic_inches: f64,
    pub max_weight_in_lbs: f64,
}

impl VehicleInfo {
    /// Both limits are inclusive.
    pub fn can_carry(&self, load: &Load) -> bool {
        self.max_capacity_in_cubic_inches >= load.total_volume_cubic_inches
            && self.max_weight_in_lbs >= load.total_weight_lbs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPriority {
    Standard,
    Express,
}

impl OrderPriority {
    pub const ALL: [OrderPriority; 2] = [OrderPriority::Standard, OrderPriority::Express];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderPriority::Standard => "standard",
            OrderPriority::Express => "express",
        }
    }
}

impl fmt::Display for OrderPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(OrderPriority::Standard),
            "express" => Ok(OrderPriority::Express),
            _ => Err(ValidationError::new(
                "priority",
                ValidationIssue::UnknownPriority(s.to_string()),
            )),
        }
    }
}

/// Aggregate volume and weight of every requested product and quantity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Load {
    pub total_volume_cubic_inches: f64,
    pub total_weight_lbs: f64,
}

impl Load {
    /// True when every component is no larger than `other`'s.
    pub fn fits_within(&self, other: &Load) -> bool {
        self.total_volume_cubic_inches <= other.total_volume_cubic_inches
            && self.total_weight_lbs <= other.total_weight_lbs
    }
}

/// A request that has passed validation. Only `validation::validate` builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryEstimationRequest {
    pub(crate) products: Vec<ProductRequest>,
    pub(crate) pickup: Coordinate,
    pub(crate) delivery: Coordinate,
    pub(crate) priority: OrderPriority,
}

impl DeliveryEstimationRequest {
    pub fn products(&self) -> &[ProductRequest] {
        &self.products
    }

    pub fn pickup(&self) -> Coordinate {
        self.pickup
    }

    pub fn delivery(&self) -> Coordinate {
        self.delivery
    }

    pub fn priority(&self) -> OrderPriority {
        self.priority
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEstimationResult {
    pub vehicle_type: VehicleType,
    pub price_per_mile: f64,
    pub load: Load,
    pub distance_miles: f64,
    pub price: f64,
    pub estimated_minutes: f64,
    pub priority: OrderPriority,
}

impl DeliveryEstimationResult {
    /// `None` when the estimate does not fit in a representable timestamp.
    pub fn estimated_delivery_at(&self, requested_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let seconds = (self.estimated_minutes * 60.0).round();
        if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
            return None;
        }
        let offset = Duration::try_seconds(seconds as i64)?;
        requested_at.checked_add_signed(offset)
    }
}
