use crate::domain::types::{VehicleInfo, VehicleType};

/// The vehicle classes offered, smallest to largest.
pub const STANDARD_VEHICLES: [VehicleInfo; 5] = [
    VehicleInfo {
        vehicle_type: VehicleType::CompactSedan,
        price_per_mile: 1.5,
        max_capacity_in_cubic_inches: 14.0 * 60.0 * 40.0,
        max_weight_in_lbs: 1_000.0,
    },
    VehicleInfo {
        vehicle_type: VehicleType::Suv,
        price_per_mile: 2.0,
        max_capacity_in_cubic_inches: 36.0 * 60.0 * 40.0,
        max_weight_in_lbs: 1_500.0,
    },
    VehicleInfo {
        vehicle_type: VehicleType::Van,
        price_per_mile: 2.5,
        max_capacity_in_cubic_inches: 50.0 * 96.0 * 96.0,
        max_weight_in_lbs: 3_500.0,
    },
    VehicleInfo {
        vehicle_type: VehicleType::Truck,
        price_per_mile: 3.0,
        max_capacity_in_cubic_inches: 96.0 * 96.0 * 96.0,
        max_weight_in_lbs: 5_000.0,
    },
    VehicleInfo {
        vehicle_type: VehicleType::Freight,
        price_per_mile: 4.0,
        max_capacity_in_cubic_inches: 102.0 * 96.0 * 636.0,
        max_weight_in_lbs: 45_000.0,
    },
];

/// Read-only, ordered vehicle table. Selection scans it front to back, so the
/// first entry that fits is the cheapest feasible one.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleCatalog {
    vehicles: Vec<VehicleInfo>,
}

impl VehicleCatalog {
    pub fn new(vehicles: Vec<VehicleInfo>) -> Self {
        Self { vehicles }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_VEHICLES.to_vec())
    }

    pub fn vehicles(&self) -> &[VehicleInfo] {
        &self.vehicles
    }

    pub fn largest(&self) -> Option<&VehicleInfo> {
        self.vehicles.last()
    }

    /// Rank of a vehicle type in scan order
    pub fn position_of(&self, vehicle_type: VehicleType) -> Option<usize> {
        self.vehicles
            .iter()
            .position(|v| v.vehicle_type == vehicle_type)
    }

    pub fn get(&self, vehicle_type: VehicleType) -> Option<&VehicleInfo> {
        self.vehicles
            .iter()
            .find(|v| v.vehicle_type == vehicle_type)
    }
}

impl Default for VehicleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
