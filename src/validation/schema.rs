//! Wire-level shape of an estimation request.
//!
//! Numbers are kept loose (`f64`, signed quantity, free-form priority) so that
//! out-of-range values reach `validate` and come back as field-level errors
//! instead of opaque deserialization failures.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<String>,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateInput {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeDeliveryEstimation {
    pub products: Vec<ProductInput>,
    pub pickup: CoordinateInput,
    pub delivery: CoordinateInput,
    pub priority: String,
}

impl ComputeDeliveryEstimation {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
