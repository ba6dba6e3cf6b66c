// Taxable capability shared by every record kind

use crate::error::TaxError;
use crate::models::{PropertyRecord, VehicleRecord};
use crate::tax;
use serde::Serialize;

/// Capability every stored record provides
pub trait Taxable {
    /// Compute the tax from the record's current fields
    fn compute_tax(&self) -> Result<f64, TaxError>;

    /// One fixed-width report row for this record
    fn describe(&self) -> String;
}

impl Taxable for PropertyRecord {
    fn compute_tax(&self) -> Result<f64, TaxError> {
        Ok(tax::property_tax(
            self.base_value,
            self.built_up_area,
            self.age,
            self.in_city,
        ))
    }

    fn describe(&self) -> String {
        format!(
            "{:>5} {:>15} {:>10} {:>10} {:>10.2}",
            self.id,
            self.built_up_area,
            self.base_value,
            self.location_flag(),
            self.tax
        )
    }
}

impl Taxable for VehicleRecord {
    fn compute_tax(&self) -> Result<f64, TaxError> {
        tax::vehicle_tax(self.velocity, self.seat_capacity, self.fuel_type, self.purchase_cost)
    }

    fn describe(&self) -> String {
        format!(
            "{:>5} {:>15} {:>10} {:>10} {:>10} {:>10} {:>10.2}",
            self.registration_number,
            self.brand,
            self.velocity,
            self.seat_capacity,
            self.fuel_type,
            self.purchase_cost,
            self.tax
        )
    }
}

/// Any stored record, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TaxRecord {
    Property(PropertyRecord),
    Vehicle(VehicleRecord),
}

impl TaxRecord {
    pub fn tax(&self) -> f64 {
        match self {
            TaxRecord::Property(p) => p.tax,
            TaxRecord::Vehicle(v) => v.tax,
        }
    }
}

impl Taxable for TaxRecord {
    fn compute_tax(&self) -> Result<f64, TaxError> {
        match self {
            TaxRecord::Property(p) => p.compute_tax(),
            TaxRecord::Vehicle(v) => v.compute_tax(),
        }
    }

    fn describe(&self) -> String {
        match self {
            TaxRecord::Property(p) => p.describe(),
            TaxRecord::Vehicle(v) => v.describe(),
        }
    }
}

impl From<PropertyRecord> for TaxRecord {
    fn from(record: PropertyRecord) -> Self {
        TaxRecord::Property(record)
    }
}

impl From<VehicleRecord> for TaxRecord {
    fn from(record: VehicleRecord) -> Self {
        TaxRecord::Vehicle(record)
    }
}
