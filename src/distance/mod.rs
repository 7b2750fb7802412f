pub mod great_circle;
pub mod lookup;
pub mod providers;

pub use great_circle::compute_distance;
pub use lookup::{lookup_distance, lookup_distances, retry_with_backoff, DistanceSource};
