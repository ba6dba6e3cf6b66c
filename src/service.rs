// Operations combining the record store with the tax formulas

use crate::error::{RecordRef, TaxError};
use crate::models::{FuelType, VehicleRecord};
use crate::record::{TaxRecord, Taxable};
use crate::store::RecordStore;
use serde::Serialize;
use tracing::info;

/// Counts and tax totals across the whole store
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub property_count: usize,
    pub property_tax: f64,
    pub vehicle_count: usize,
    pub vehicle_tax: f64,
}

impl Summary {
    pub fn total_count(&self) -> usize {
        self.property_count + self.vehicle_count
    }

    pub fn total_tax(&self) -> f64 {
        self.property_tax + self.vehicle_tax
    }
}

/// Compute and store the tax for a property, returning the new figure
pub fn calculate_property_tax<S: RecordStore + ?Sized>(store: &mut S, id: i64) -> Result<f64, TaxError> {
    let property = store
        .get_property(id)?
        .ok_or(TaxError::NotFound(RecordRef::Property(id)))?;

    let tax = property.compute_tax()?;
    store.update_property_tax(id, tax)?;

    info!(id, tax, "Property tax calculated");
    Ok(tax)
}

/// Compute and store the tax for a vehicle with the given fuel type and cost
///
/// Fuel type, cost and tax are written together and only when the
/// calculation succeeds; on error the stored record is left as it was.
pub fn calculate_vehicle_tax<S: RecordStore + ?Sized>(
    store: &mut S,
    registration_number: i64,
    fuel_type: FuelType,
    purchase_cost: i64,
) -> Result<f64, TaxError> {
    let stored = store
        .get_vehicle(registration_number)?
        .ok_or(TaxError::NotFound(RecordRef::Vehicle(registration_number)))?;

    let candidate = VehicleRecord {
        fuel_type,
        purchase_cost,
        ..stored
    };
    let tax = candidate.compute_tax()?;
    store.update_vehicle_tax(registration_number, fuel_type, purchase_cost, tax)?;

    info!(registration_number, %fuel_type, tax, "Vehicle tax calculated");
    Ok(tax)
}

pub fn summary<S: RecordStore + ?Sized>(store: &S) -> Result<Summary, TaxError> {
    Ok(Summary {
        property_count: store.list_properties()?.len(),
        property_tax: store.sum_property_tax()?,
        vehicle_count: store.list_vehicles()?.len(),
        vehicle_tax: store.sum_vehicle_tax()?,
    })
}

/// Every stored record, properties first, each kind in insertion order
pub fn all_records<S: RecordStore + ?Sized>(store: &S) -> Result<Vec<TaxRecord>, TaxError> {
    let properties = store.list_properties()?.into_iter().map(TaxRecord::from);
    let vehicles = store.list_vehicles()?.into_iter().map(TaxRecord::from);
    Ok(properties.chain(vehicles).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SqliteStore, contract};

    #[test]
    fn test_calculate_property_tax() {
        let mut store = MemoryStore::new();
        let city = store.add_property(contract::property(1000, true)).unwrap();
        let rural = store.add_property(contract::property(1000, false)).unwrap();

        assert_eq!(calculate_property_tax(&mut store, city).unwrap(), 2_500_250.0);
        assert_eq!(calculate_property_tax(&mut store, rural).unwrap(), 2_500_000.0);
        assert_eq!(store.get_property(city).unwrap().unwrap().tax, 2_500_250.0);
    }

    #[test]
    fn test_calculate_missing_property_leaves_store_unchanged() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.add_property(contract::property(1000, true)).unwrap();
        let before = store.list_properties().unwrap();

        let result = calculate_property_tax(&mut store, 2);
        assert!(matches!(result, Err(TaxError::NotFound(RecordRef::Property(2)))));
        assert_eq!(store.list_properties().unwrap(), before);
    }

    #[test]
    fn test_calculate_vehicle_tax() {
        let mut store = MemoryStore::new();
        store.add_vehicle(contract::vehicle(10, "Tata")).unwrap();

        let tax = calculate_vehicle_tax(&mut store, 10, FuelType::Diesel, 500_000).unwrap();
        assert_eq!(tax, 55125.0);

        let stored = store.get_vehicle(10).unwrap().unwrap();
        assert_eq!(stored.fuel_type, FuelType::Diesel);
        assert_eq!(stored.purchase_cost, 500_000);
        assert_eq!(stored.tax, 55125.0);
    }

    #[test]
    fn test_invalid_fuel_type_keeps_prior_state() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.add_vehicle(contract::vehicle(10, "Tata")).unwrap();
        calculate_vehicle_tax(&mut store, 10, FuelType::Petrol, 500_000).unwrap();
        let before = store.get_vehicle(10).unwrap().unwrap();

        let result = calculate_vehicle_tax(&mut store, 10, FuelType::from_code(9), 1);
        assert!(matches!(result, Err(TaxError::InvalidFuelType)));
        assert_eq!(store.get_vehicle(10).unwrap().unwrap(), before);
    }

    #[test]
    fn test_calculate_missing_vehicle() {
        let mut store = MemoryStore::new();
        let result = calculate_vehicle_tax(&mut store, 404, FuelType::Cng, 1);
        assert!(matches!(result, Err(TaxError::NotFound(RecordRef::Vehicle(404)))));
    }

    #[test]
    fn test_summary() {
        let mut store = MemoryStore::new();
        let id = store.add_property(contract::property(1000, false)).unwrap();
        store.add_property(contract::property(1, false)).unwrap();
        store.add_vehicle(contract::vehicle(1, "A")).unwrap();
        calculate_property_tax(&mut store, id).unwrap();
        calculate_vehicle_tax(&mut store, 1, FuelType::Petrol, 500_000).unwrap();

        let summary = summary(&store).unwrap();
        assert_eq!(summary.property_count, 2);
        assert_eq!(summary.property_tax, 2_500_000.0);
        assert_eq!(summary.vehicle_count, 1);
        assert_eq!(summary.vehicle_tax, 5125.0);
        assert_eq!(summary.total_count(), 3);
        assert_eq!(summary.total_tax(), 2_505_125.0);
    }

    #[test]
    fn test_all_records_order() {
        let mut store = MemoryStore::new();
        store.add_vehicle(contract::vehicle(5, "V")).unwrap();
        store.add_property(contract::property(1, true)).unwrap();

        let records = all_records(&store).unwrap();
        assert_eq!(records.len(), 2);
        assert!(matches!(records[0], TaxRecord::Property(_)));
        assert!(matches!(records[1], TaxRecord::Vehicle(_)));
    }
}
