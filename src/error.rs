//! Error types for the delivery estimation core

use thiserror::Error;

use crate::domain::types::VehicleType;

/// What was wrong with a single field of an estimation request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("at least one product is required")]
    Empty,

    #[error("must be a finite number greater than zero, got {0}")]
    NotPositive(f64),

    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    #[error("must be within [{min}, {max}], got {value}")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("unrecognized priority '{0}'")]
    UnknownPriority(String),
}

/// Malformed or out-of-range input, tagged with the offending field path
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {field}: {issue}")]
pub struct ValidationError {
    pub field: String,
    pub issue: ValidationIssue,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, issue: ValidationIssue) -> Self {
        Self {
            field: field.into(),
            issue,
        }
    }
}

/// The load does not fit in any catalog entry
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "no vehicle can carry {total_volume_cubic_inches} in³ / {total_weight_lbs} lbs (largest is {largest:?})"
)]
pub struct NoFeasibleVehicleError {
    pub total_volume_cubic_inches: f64,
    pub total_weight_lbs: f64,
    pub largest: Option<VehicleType>,
}

/// Startup configuration problems. The binary refuses to run on any of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("required setting {0} is not set")]
    Missing(String),

    #[error("setting {key} has invalid value '{value}': {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },

    #[error("pricing policy has no terms for priority {0}")]
    IncompletePolicy(String),
}

/// Failures of a distance lookup collaborator
#[derive(Debug, Error)]
pub enum DistanceError {
    #[error("distance request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("distance request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("distance provider returned HTTP {0}")]
    Status(u16),

    #[error("malformed distance response: {0}")]
    Malformed(String),

    #[error("no route between pickup and delivery")]
    NoRoute,
}

impl DistanceError {
    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            DistanceError::Http(_) | DistanceError::Timeout(_) => true,
            DistanceError::Status(code) => *code == 429 || *code >= 500,
            DistanceError::Malformed(_) | DistanceError::NoRoute => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata value for '{key}' could not be encoded: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("metadata value for '{key}' is not valid JSON: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("metadata must be a JSON object")]
    NotAnObject,
}

/// Everything `estimate` can fail with. The wrapped kind is preserved as-is.
#[derive(Debug, Error)]
pub enum EstimationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NoFeasibleVehicle(#[from] NoFeasibleVehicleError),

    #[error(transparent)]
    Distance(#[from] DistanceError),
}

pub type Result<T, E = EstimationError> = std::result::Result<T, E>;
