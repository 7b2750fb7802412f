pub mod catalog;
pub mod types;

pub use catalog::{VehicleCatalog, STANDARD_VEHICLES};
pub use types::*;
