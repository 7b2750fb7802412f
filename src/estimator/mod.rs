pub mod engine;
pub mod manifest;
pub mod run;

pub use engine::{is_unfulfillable, EstimationPlan, Estimator};
