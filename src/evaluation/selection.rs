use tracing::{debug, trace};

use crate::domain::catalog::VehicleCatalog;
use crate::domain::types::{Load, VehicleInfo};
use crate::error::NoFeasibleVehicleError;

/// Scan the catalog in order and take the first vehicle whose capacity and
/// weight limits both cover the load.
pub fn select_vehicle(
    load: &Load,
    catalog: &VehicleCatalog,
) -> Result<VehicleInfo, NoFeasibleVehicleError> {
    for vehicle in catalog.vehicles() {
        if vehicle.can_carry(load) {
            debug!(
                "Selected {} for {:.1} in³ / {:.1} lbs",
                vehicle.vehicle_type, load.total_volume_cubic_inches, load.total_weight_lbs
            );
            return Ok(*vehicle);
        }
        trace!(
            "{} rejected ({} in³ / {} lbs limit)",
            vehicle.vehicle_type,
            vehicle.max_capacity_in_cubic_inches,
            vehicle.max_weight_in_lbs
        );
    }

    Err(NoFeasibleVehicleError {
        total_volume_cubic_inches: load.total_volume_cubic_inches,
        total_weight_lbs: load.total_weight_lbs,
        largest: catalog.largest().map(|v| v.vehicle_type),
    })
}
