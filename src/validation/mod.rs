pub mod schema;
pub mod validate;

pub use schema::{ComputeDeliveryEstimation, CoordinateInput, ProductInput};
pub use validate::validate;
