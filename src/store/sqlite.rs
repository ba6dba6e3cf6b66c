// SQLite-backed record store

use super::RecordStore;
use crate::error::{RecordRef, StoreError, StoreResult};
use crate::models::{FuelType, NewProperty, NewVehicle, PropertyRecord, VehicleRecord, parse_location_flag};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const CURRENT_VERSION: u32 = 1;

const STORE_DIR: &str = ".taxcalc";
const DB_FILE: &str = "taxcalc.db";

const PROPERTY_SELECT_SQL: &str = "SELECT id, base_value, built_up_area, age, location, tax FROM property_tax";
const VEHICLE_SELECT_SQL: &str =
    "SELECT registration_number, brand, velocity, seat_capacity, type, price, tax FROM vehicle_tax";

/// Record store persisted in a SQLite database
///
/// Each call is a single blocking round trip; nothing spans operations.
pub struct SqliteStore {
    db: Connection,
}

impl SqliteStore {
    /// Open or create a store at the given path
    ///
    /// The database is created in a `.taxcalc` subdirectory of the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let base_path = path.as_ref().join(STORE_DIR);

        // Create directory if it doesn't exist
        fs::create_dir_all(&base_path)?;

        let db_path = base_path.join(DB_FILE);
        let db = Connection::open(&db_path)?;
        info!(path = %db_path.display(), "Opened SQLite database");

        let store = Self { db };
        store.create_schema()?;
        Self::write_version(&base_path)?;

        Ok(store)
    }

    /// Open a store that lives only as long as this value
    pub fn open_in_memory() -> StoreResult<Self> {
        let store = Self {
            db: Connection::open_in_memory()?,
        };
        store.create_schema()?;
        Ok(store)
    }

    /// Get a reference to the SQLite database connection
    pub fn db(&self) -> &Connection {
        &self.db
    }

    /// Create database schema
    fn create_schema(&self) -> StoreResult<()> {
        debug!("Creating database schema");

        self.db.execute_batch(
            r#"
            -- AUTOINCREMENT keeps ids from ever being reused
            CREATE TABLE IF NOT EXISTS property_tax (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                base_value INTEGER NOT NULL,
                built_up_area INTEGER NOT NULL,
                age INTEGER NOT NULL,
                location TEXT NOT NULL,
                tax REAL NOT NULL DEFAULT 0
            );

            -- type: 0 unset, 1 Petrol, 2 Diesel, 3 CNG
            CREATE TABLE IF NOT EXISTS vehicle_tax (
                registration_number INTEGER NOT NULL UNIQUE,
                brand TEXT NOT NULL,
                velocity INTEGER NOT NULL,
                seat_capacity INTEGER NOT NULL,
                type INTEGER NOT NULL DEFAULT 0,
                price INTEGER NOT NULL DEFAULT 0,
                tax REAL NOT NULL DEFAULT 0
            );
            "#,
        )?;

        Ok(())
    }

    /// Write version file
    fn write_version(base_path: &Path) -> StoreResult<()> {
        let version_path = base_path.join(".version");
        if !version_path.exists() {
            fs::write(version_path, CURRENT_VERSION.to_string())?;
        }
        Ok(())
    }

    fn property_from_row(row: &Row<'_>) -> rusqlite::Result<PropertyRecord> {
        let location: String = row.get(4)?;
        Ok(PropertyRecord {
            id: row.get(0)?,
            base_value: row.get(1)?,
            built_up_area: row.get(2)?,
            age: row.get(3)?,
            in_city: parse_location_flag(&location) == Some(true),
            tax: row.get(5)?,
        })
    }

    fn vehicle_from_row(row: &Row<'_>) -> rusqlite::Result<VehicleRecord> {
        Ok(VehicleRecord {
            registration_number: row.get(0)?,
            brand: row.get(1)?,
            velocity: row.get(2)?,
            seat_capacity: row.get(3)?,
            fuel_type: FuelType::from_code(row.get(4)?),
            purchase_cost: row.get(5)?,
            tax: row.get(6)?,
        })
    }

    fn is_unique_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }
}

impl RecordStore for SqliteStore {
    fn add_property(&mut self, property: NewProperty) -> StoreResult<i64> {
        let location = if property.in_city { "Y" } else { "N" };
        self.db.execute(
            "INSERT INTO property_tax (base_value, built_up_area, age, location) VALUES (?1, ?2, ?3, ?4)",
            params![property.base_value, property.built_up_area, property.age, location],
        )?;

        let id = self.db.last_insert_rowid();
        debug!(id, "add_property: inserted");
        Ok(id)
    }

    fn add_vehicle(&mut self, vehicle: NewVehicle) -> StoreResult<i64> {
        let key = vehicle.registration_number;
        let result = self.db.execute(
            "INSERT INTO vehicle_tax (registration_number, brand, velocity, seat_capacity) VALUES (?1, ?2, ?3, ?4)",
            params![key, vehicle.brand, vehicle.velocity, vehicle.seat_capacity],
        );

        match result {
            Ok(_) => {
                debug!(registration_number = key, "add_vehicle: inserted");
                Ok(key)
            }
            Err(e) if Self::is_unique_violation(&e) => Err(StoreError::DuplicateRegistration(key)),
            Err(e) => Err(e.into()),
        }
    }

    fn get_property(&self, id: i64) -> StoreResult<Option<PropertyRecord>> {
        let mut stmt = self.db.prepare(&format!("{PROPERTY_SELECT_SQL} WHERE id = ?1"))?;
        let record = stmt.query_row([id], Self::property_from_row).optional()?;
        Ok(record)
    }

    fn get_vehicle(&self, registration_number: i64) -> StoreResult<Option<VehicleRecord>> {
        let mut stmt = self
            .db
            .prepare(&format!("{VEHICLE_SELECT_SQL} WHERE registration_number = ?1"))?;
        let record = stmt
            .query_row([registration_number], Self::vehicle_from_row)
            .optional()?;
        Ok(record)
    }

    fn update_property_tax(&mut self, id: i64, tax: f64) -> StoreResult<()> {
        let changed = self
            .db
            .execute("UPDATE property_tax SET tax = ?1 WHERE id = ?2", params![tax, id])?;

        if changed == 0 {
            return Err(StoreError::NotFound(RecordRef::Property(id)));
        }
        Ok(())
    }

    fn update_vehicle_tax(
        &mut self,
        registration_number: i64,
        fuel_type: FuelType,
        purchase_cost: i64,
        tax: f64,
    ) -> StoreResult<()> {
        let changed = self.db.execute(
            "UPDATE vehicle_tax SET type = ?1, price = ?2, tax = ?3 WHERE registration_number = ?4",
            params![fuel_type.code(), purchase_cost, tax, registration_number],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(RecordRef::Vehicle(registration_number)));
        }
        Ok(())
    }

    fn list_properties(&self) -> StoreResult<Vec<PropertyRecord>> {
        let mut stmt = self.db.prepare(&format!("{PROPERTY_SELECT_SQL} ORDER BY id"))?;
        let rows = stmt.query_map([], Self::property_from_row)?;

        let mut results = Vec::new();
        for row_result in rows {
            results.push(row_result?);
        }
        Ok(results)
    }

    fn list_vehicles(&self) -> StoreResult<Vec<VehicleRecord>> {
        let mut stmt = self.db.prepare(&format!("{VEHICLE_SELECT_SQL} ORDER BY rowid"))?;
        let rows = stmt.query_map([], Self::vehicle_from_row)?;

        let mut results = Vec::new();
        for row_result in rows {
            results.push(row_result?);
        }
        Ok(results)
    }

    fn sum_property_tax(&self) -> StoreResult<f64> {
        let total = self
            .db
            .query_row("SELECT COALESCE(SUM(tax), 0.0) FROM property_tax", [], |row| row.get(0))?;
        Ok(total)
    }

    fn sum_vehicle_tax(&self) -> StoreResult<f64> {
        let total = self
            .db
            .query_row("SELECT COALESCE(SUM(tax), 0.0) FROM vehicle_tax", [], |row| row.get(0))?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;
    use tempfile::TempDir;

    #[test]
    fn test_sqlite_store_contract() {
        contract::run_all(|| SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn test_store_open_creates_directory() {
        let temp = TempDir::new().unwrap();

        let _store = SqliteStore::open(temp.path()).unwrap();
        let store_path = temp.path().join(".taxcalc");
        assert!(store_path.exists());
        assert!(store_path.join("taxcalc.db").exists());
        assert!(store_path.join(".version").exists());
    }

    #[test]
    fn test_records_survive_reopen() {
        let temp = TempDir::new().unwrap();

        {
            let mut store = SqliteStore::open(temp.path()).unwrap();
            let id = store.add_property(contract::property(1000, true)).unwrap();
            store.update_property_tax(id, 2_500_250.0).unwrap();
            store.add_vehicle(contract::vehicle(55, "Skoda")).unwrap();
            store.update_vehicle_tax(55, FuelType::Cng, 500_000, 60125.0).unwrap();
        }

        let store = SqliteStore::open(temp.path()).unwrap();
        let property = store.get_property(1).unwrap().unwrap();
        assert!(property.in_city);
        assert_eq!(property.tax, 2_500_250.0);

        let vehicle = store.get_vehicle(55).unwrap().unwrap();
        assert_eq!(vehicle.fuel_type, FuelType::Cng);
        assert_eq!(vehicle.purchase_cost, 500_000);
        assert_eq!(vehicle.tax, 60125.0);
    }

    #[test]
    fn test_ids_not_reused_after_reopen() {
        let temp = TempDir::new().unwrap();

        {
            let mut store = SqliteStore::open(temp.path()).unwrap();
            store.add_property(contract::property(1, false)).unwrap();
            store.add_property(contract::property(2, false)).unwrap();
        }

        let mut store = SqliteStore::open(temp.path()).unwrap();
        let id = store.add_property(contract::property(3, false)).unwrap();
        assert_eq!(id, 3);
    }

    #[test]
    fn test_storage_layout() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.add_property(contract::property(1000, false)).unwrap();
        store.add_vehicle(contract::vehicle(9, "Ford")).unwrap();
        store.update_vehicle_tax(9, FuelType::Diesel, 100, 136.0).unwrap();

        let location: String = store
            .db()
            .query_row("SELECT location FROM property_tax WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(location, "N");

        let code: i64 = store
            .db()
            .query_row("SELECT type FROM vehicle_tax WHERE registration_number = 9", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(code, 2);
    }

    #[test]
    fn test_lowercase_location_reads_as_in_city() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .db()
            .execute(
                "INSERT INTO property_tax (base_value, built_up_area, age, location) VALUES (1, 2, 3, 'y')",
                [],
            )
            .unwrap();

        let property = store.get_property(1).unwrap().unwrap();
        assert!(property.in_city);
        assert_eq!(property.tax, 0.0);
    }
}
