mod inventory;
mod lookup;
mod vehicle;

pub use inventory::land_rover_inventory;
pub use lookup::VehicleMatch;
pub use vehicle::Vehicle;

/// Read-only vehicle reference data.
#[derive(Debug, Clone)]
pub struct Catalog {
    vehicles: Vec<Vehicle>,
}

impl Catalog {
    /// Builds a catalog; callers must supply at least one vehicle so that
    /// lookups always have a fallback entry.
    pub fn new(vehicles: Vec<Vehicle>) -> Option<Self> {
        if vehicles.is_empty() {
            return None;
        }
        Some(Self { vehicles })
    }

    /// The dealership lineup shipped with the concierge.
    pub fn land_rover() -> Self {
        Self {
            vehicles: land_rover_inventory(),
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn first(&self) -> &Vehicle {
        &self.vehicles[0]
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::land_rover()
    }
}
