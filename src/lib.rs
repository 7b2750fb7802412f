pub mod config;
pub mod distance;
pub mod domain;
pub mod error;
pub mod estimator;
pub mod evaluation;
pub mod fixtures;
pub mod metadata;
pub mod utils;
pub mod validation;

pub use domain::catalog::VehicleCatalog;
pub use domain::types::{
    Coordinate, DeliveryEstimationRequest, DeliveryEstimationResult, Load, OrderPriority,
    VehicleInfo, VehicleType,
};
pub use error::{
    ConfigurationError, DistanceError, EstimationError, NoFeasibleVehicleError, ValidationError,
};
pub use estimator::Estimator;
pub use validation::{validate, ComputeDeliveryEstimation};
