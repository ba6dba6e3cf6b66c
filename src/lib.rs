// taxcalc - Property and vehicle tax records with SQLite or in-memory storage

pub mod auth;
pub mod console;
pub mod error;
pub mod menu;
pub mod models;
pub mod record;
pub mod report;
pub mod service;
pub mod store;
pub mod tax;

// Re-export main types for convenience
pub use console::Console;
pub use error::{RecordRef, StoreError, StoreResult, TaxError};
pub use menu::{MenuState, Session};
pub use models::{FuelType, NewProperty, NewVehicle, PropertyRecord, VehicleRecord};
pub use record::{TaxRecord, Taxable};
pub use service::Summary;
pub use store::{Backend, MemoryStore, RecordStore, SqliteStore, open_store};
