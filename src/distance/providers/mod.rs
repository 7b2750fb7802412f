pub mod osrm;

pub use osrm::{parse_route_response, OsrmRouter};
