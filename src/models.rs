// Data models for property and vehicle records

use serde::{Deserialize, Serialize};
use std::fmt;

/// A property registered for tax
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: i64,
    pub base_value: i64,
    pub built_up_area: i64,
    pub age: i64,
    pub in_city: bool,
    pub tax: f64,
}

impl PropertyRecord {
    /// Build an uncalculated record from the fields captured on add
    pub fn new(id: i64, fields: NewProperty) -> Self {
        Self {
            id,
            base_value: fields.base_value,
            built_up_area: fields.built_up_area,
            age: fields.age,
            in_city: fields.in_city,
            tax: 0.0,
        }
    }

    /// Single-character location flag as stored and displayed
    pub fn location_flag(&self) -> char {
        if self.in_city { 'Y' } else { 'N' }
    }
}

/// Fields supplied when adding a property
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewProperty {
    pub base_value: i64,
    pub built_up_area: i64,
    pub age: i64,
    pub in_city: bool,
}

/// A vehicle registered for tax, keyed by registration number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub registration_number: i64,
    pub brand: String,
    pub velocity: i64,
    pub seat_capacity: i64,
    pub fuel_type: FuelType,
    pub purchase_cost: i64,
    pub tax: f64,
}

impl VehicleRecord {
    /// Build an uncalculated record; fuel type and cost are set on calculation
    pub fn new(fields: NewVehicle) -> Self {
        Self {
            registration_number: fields.registration_number,
            brand: fields.brand,
            velocity: fields.velocity,
            seat_capacity: fields.seat_capacity,
            fuel_type: FuelType::Unknown,
            purchase_cost: 0,
            tax: 0.0,
        }
    }
}

/// Fields supplied when adding a vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub registration_number: i64,
    pub brand: String,
    pub velocity: i64,
    pub seat_capacity: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Cng,
    #[default]
    Unknown,
}

impl FuelType {
    /// Map the menu/database code (1 Petrol, 2 Diesel, 3 CNG)
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => FuelType::Petrol,
            2 => FuelType::Diesel,
            3 => FuelType::Cng,
            _ => FuelType::Unknown,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            FuelType::Petrol => 1,
            FuelType::Diesel => 2,
            FuelType::Cng => 3,
            FuelType::Unknown => 0,
        }
    }

    /// Multiplier applied to the purchase cost, None when the type is unset
    pub fn cost_rate(self) -> Option<f64> {
        match self {
            FuelType::Petrol => Some(0.01),
            FuelType::Diesel => Some(0.11),
            FuelType::Cng => Some(0.12),
            FuelType::Unknown => None,
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Cng => "CNG",
            FuelType::Unknown => "Unknown",
        };
        // pad() so width specifiers in report rows apply
        f.pad(name)
    }
}

/// Parse a Y/N answer; only the first character counts
pub fn parse_location_flag(input: &str) -> Option<bool> {
    match input.trim().chars().next() {
        Some('Y' | 'y') => Some(true),
        Some('N' | 'n') => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_property_is_uncalculated() {
        let record = PropertyRecord::new(
            1,
            NewProperty {
                base_value: 1000,
                built_up_area: 500,
                age: 5,
                in_city: true,
            },
        );
        assert_eq!(record.tax, 0.0);
        assert_eq!(record.location_flag(), 'Y');
    }

    #[test]
    fn test_new_vehicle_has_unknown_fuel() {
        let record = VehicleRecord::new(NewVehicle {
            registration_number: 42,
            brand: "Tata".to_string(),
            velocity: 120,
            seat_capacity: 5,
        });
        assert_eq!(record.fuel_type, FuelType::Unknown);
        assert_eq!(record.purchase_cost, 0);
        assert_eq!(record.tax, 0.0);
    }

    #[test]
    fn test_fuel_type_codes() {
        assert_eq!(FuelType::from_code(1), FuelType::Petrol);
        assert_eq!(FuelType::from_code(2), FuelType::Diesel);
        assert_eq!(FuelType::from_code(3), FuelType::Cng);
        assert_eq!(FuelType::from_code(0), FuelType::Unknown);
        assert_eq!(FuelType::from_code(7), FuelType::Unknown);
        assert_eq!(FuelType::Cng.code(), 3);
        assert_eq!(FuelType::Unknown.code(), 0);
    }

    #[test]
    fn test_fuel_type_display() {
        assert_eq!(FuelType::Cng.to_string(), "CNG");
        assert_eq!(format!("{:>8}", FuelType::Petrol), "  Petrol");
    }

    #[test]
    fn test_fuel_type_serialization() {
        let json = serde_json::to_string(&FuelType::Diesel).unwrap();
        assert_eq!(json, "\"diesel\"");
    }

    #[test]
    fn test_parse_location_flag() {
        assert_eq!(parse_location_flag("Y"), Some(true));
        assert_eq!(parse_location_flag("yes"), Some(true));
        assert_eq!(parse_location_flag("n"), Some(false));
        assert_eq!(parse_location_flag(" N "), Some(false));
        assert_eq!(parse_location_flag("x"), None);
        assert_eq!(parse_location_flag(""), None);
    }
}
