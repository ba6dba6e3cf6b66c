// Tax formulas for properties and vehicles

use crate::error::TaxError;
use crate::models::FuelType;

/// Surcharge per unit of built-up area for properties inside city limits
const CITY_AREA_RATE: f64 = 0.5;

/// Property tax: `base * area * age`, plus `0.5 * area` inside the city
///
/// Inputs are not range-checked; negative values give negative tax.
pub fn property_tax(base_value: i64, built_up_area: i64, age: i64, in_city: bool) -> f64 {
    let tax = base_value as f64 * built_up_area as f64 * age as f64;
    if in_city {
        tax + CITY_AREA_RATE * built_up_area as f64
    } else {
        tax
    }
}

/// Vehicle tax: `velocity + seats + rate * purchase_cost`, rate by fuel type
pub fn vehicle_tax(velocity: i64, seat_capacity: i64, fuel_type: FuelType, purchase_cost: i64) -> Result<f64, TaxError> {
    let rate = fuel_type.cost_rate().ok_or(TaxError::InvalidFuelType)?;
    Ok(velocity as f64 + seat_capacity as f64 + rate * purchase_cost as f64)
}
