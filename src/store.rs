// Record store contract shared by the memory and SQLite backends

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::StoreResult;
use crate::models::{FuelType, NewProperty, NewVehicle, PropertyRecord, VehicleRecord};
use clap::ValueEnum;
use std::path::Path;
use tracing::info;

/// Owns every property and vehicle record for its lifetime
///
/// Lookups return `None` for unknown keys; updates return
/// `StoreError::NotFound`. Backend failures are returned as-is and never
/// retried.
pub trait RecordStore {
    /// Store an uncalculated property and return its new sequential id
    fn add_property(&mut self, property: NewProperty) -> StoreResult<i64>;

    /// Store an uncalculated vehicle and return its registration number
    ///
    /// Registration numbers are unique; a repeat fails with
    /// `StoreError::DuplicateRegistration` and leaves the store unchanged.
    fn add_vehicle(&mut self, vehicle: NewVehicle) -> StoreResult<i64>;

    fn get_property(&self, id: i64) -> StoreResult<Option<PropertyRecord>>;

    fn get_vehicle(&self, registration_number: i64) -> StoreResult<Option<VehicleRecord>>;

    fn update_property_tax(&mut self, id: i64, tax: f64) -> StoreResult<()>;

    fn update_vehicle_tax(
        &mut self,
        registration_number: i64,
        fuel_type: FuelType,
        purchase_cost: i64,
        tax: f64,
    ) -> StoreResult<()>;

    /// All properties in insertion order
    fn list_properties(&self) -> StoreResult<Vec<PropertyRecord>>;

    /// All vehicles in insertion order
    fn list_vehicles(&self) -> StoreResult<Vec<VehicleRecord>>;

    fn sum_property_tax(&self) -> StoreResult<f64> {
        Ok(self.list_properties()?.iter().map(|p| p.tax).sum())
    }

    fn sum_vehicle_tax(&self) -> StoreResult<f64> {
        Ok(self.list_vehicles()?.iter().map(|v| v.tax).sum())
    }
}

/// Which backend holds the records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// SQLite database under the store path
    #[default]
    Sqlite,
    /// Process-lifetime lists, nothing written to disk
    Memory,
}

/// Open the selected backend
pub fn open_store(backend: Backend, path: &Path) -> StoreResult<Box<dyn RecordStore>> {
    info!(?backend, path = %path.display(), "Opening record store");
    match backend {
        Backend::Sqlite => Ok(Box::new(SqliteStore::open(path)?)),
        Backend::Memory => Ok(Box::new(MemoryStore::new())),
    }
}
