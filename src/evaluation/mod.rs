pub mod load;
pub mod pricing;
pub mod selection;

pub use load::compute_load;
pub use pricing::{price_estimate, time_estimate_minutes, PricingPolicy, PriorityTerms};
pub use selection::select_vehicle;
