// In-memory record store

use super::RecordStore;
use crate::error::{RecordRef, StoreError, StoreResult};
use crate::models::{FuelType, NewProperty, NewVehicle, PropertyRecord, VehicleRecord};
use tracing::debug;

/// Records held for the lifetime of the process, in insertion order
#[derive(Debug)]
pub struct MemoryStore {
    properties: Vec<PropertyRecord>,
    vehicles: Vec<VehicleRecord>,
    next_property_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            vehicles: Vec::new(),
            next_property_id: 1,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn add_property(&mut self, property: NewProperty) -> StoreResult<i64> {
        let id = self.next_property_id;
        self.next_property_id += 1;
        self.properties.push(PropertyRecord::new(id, property));
        debug!(id, "add_property: stored");
        Ok(id)
    }

    fn add_vehicle(&mut self, vehicle: NewVehicle) -> StoreResult<i64> {
        let key = vehicle.registration_number;
        if self.vehicles.iter().any(|v| v.registration_number == key) {
            return Err(StoreError::DuplicateRegistration(key));
        }
        self.vehicles.push(VehicleRecord::new(vehicle));
        debug!(registration_number = key, "add_vehicle: stored");
        Ok(key)
    }

    fn get_property(&self, id: i64) -> StoreResult<Option<PropertyRecord>> {
        Ok(self.properties.iter().find(|p| p.id == id).cloned())
    }

    fn get_vehicle(&self, registration_number: i64) -> StoreResult<Option<VehicleRecord>> {
        Ok(self
            .vehicles
            .iter()
            .find(|v| v.registration_number == registration_number)
            .cloned())
    }

    fn update_property_tax(&mut self, id: i64, tax: f64) -> StoreResult<()> {
        let record = self
            .properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(RecordRef::Property(id)))?;
        record.tax = tax;
        Ok(())
    }

    fn update_vehicle_tax(
        &mut self,
        registration_number: i64,
        fuel_type: FuelType,
        purchase_cost: i64,
        tax: f64,
    ) -> StoreResult<()> {
        let record = self
            .vehicles
            .iter_mut()
            .find(|v| v.registration_number == registration_number)
            .ok_or(StoreError::NotFound(RecordRef::Vehicle(registration_number)))?;
        record.fuel_type = fuel_type;
        record.purchase_cost = purchase_cost;
        record.tax = tax;
        Ok(())
    }

    fn list_properties(&self) -> StoreResult<Vec<PropertyRecord>> {
        Ok(self.properties.clone())
    }

    fn list_vehicles(&self) -> StoreResult<Vec<VehicleRecord>> {
        Ok(self.vehicles.clone())
    }
}
