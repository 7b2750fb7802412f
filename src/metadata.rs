//! Flat string-keyed metadata for payment records.
//!
//! Payment providers only accept string values, so every value is
//! JSON-encoded on the way in and JSON-decoded on the way out.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::types::DeliveryEstimationResult;
use crate::error::MetadataError;

pub type StripeMeta = Map<String, Value>;

/// Encode each value to its JSON text
pub fn serialize_to_stripe_meta(values: &Map<String, Value>) -> Result<StripeMeta, MetadataError> {
    values
        .iter()
        .map(|(key, value)| {
            serde_json::to_string(value)
                .map(|encoded| (key.clone(), Value::String(encoded)))
                .map_err(|source| MetadataError::Encode {
                    key: key.clone(),
                    source,
                })
        })
        .collect()
}

/// Decode every string value as JSON. Non-string values pass through untouched.
pub fn parse_stripe_meta(meta: &StripeMeta) -> Result<Map<String, Value>, MetadataError> {
    meta.iter()
        .map(|(key, value)| match value {
            Value::String(text) => serde_json::from_str(text)
                .map(|decoded| (key.clone(), decoded))
                .map_err(|source| MetadataError::Decode {
                    key: key.clone(),
                    source,
                }),
            other => Ok((key.clone(), other.clone())),
        })
        .collect()
}

/// Serialize any struct into flat metadata via its JSON object form
pub fn to_stripe_meta<T: Serialize>(value: &T) -> Result<StripeMeta, MetadataError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => serialize_to_stripe_meta(&map),
        Ok(_) => Err(MetadataError::NotAnObject),
        Err(source) => Err(MetadataError::Encode {
            key: String::new(),
            source,
        }),
    }
}

impl DeliveryEstimationResult {
    pub fn to_stripe_meta(&self) -> Result<StripeMeta, MetadataError> {
        to_stripe_meta(self)
    }

    pub fn from_stripe_meta(meta: &StripeMeta) -> Result<Self, MetadataError> {
        let decoded = parse_stripe_meta(meta)?;
        serde_json::from_value(Value::Object(decoded)).map_err(|source| MetadataError::Decode {
            key: String::new(),
            source,
        })
    }
}
