// Error types for the tax calculator

use std::fmt;
use thiserror::Error;

/// Identifies a stored record for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef {
    Property(i64),
    Vehicle(i64),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRef::Property(id) => write!(f, "Property ID {}", id),
            RecordRef::Vehicle(reg) => write!(f, "Registration Number {}", reg),
        }
    }
}

/// Errors raised by a record store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(RecordRef),

    #[error("a vehicle with registration number {0} already exists")]
    DuplicateRegistration(i64),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the menu session
#[derive(Debug, Error)]
pub enum TaxError {
    #[error("Invalid choice '{0}'! Please select a valid option.")]
    InvalidChoice(String),

    #[error("Invalid input type. Expected {expected}, got '{input}'.")]
    InvalidInputType { expected: &'static str, input: String },

    #[error("{0} not found.")]
    NotFound(RecordRef),

    #[error("Registration Number {0} is already registered.")]
    DuplicateRegistration(i64),

    #[error("Invalid fuel type!")]
    InvalidFuelType,

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed")]
    InputClosed,
}

impl TaxError {
    /// Whether the session can report this error and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TaxError::InvalidChoice(_)
                | TaxError::InvalidInputType { .. }
                | TaxError::NotFound(_)
                | TaxError::DuplicateRegistration(_)
                | TaxError::InvalidFuelType
        )
    }
}

impl From<StoreError> for TaxError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(record) => TaxError::NotFound(record),
            StoreError::DuplicateRegistration(reg) => TaxError::DuplicateRegistration(reg),
            other => TaxError::StoreUnavailable(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ref_display() {
        assert_eq!(RecordRef::Property(3).to_string(), "Property ID 3");
        assert_eq!(RecordRef::Vehicle(4711).to_string(), "Registration Number 4711");
    }

    #[test]
    fn test_store_error_mapping() {
        let err: TaxError = StoreError::NotFound(RecordRef::Property(9)).into();
        assert!(matches!(err, TaxError::NotFound(RecordRef::Property(9))));
        assert!(err.is_recoverable());

        let err: TaxError = StoreError::DuplicateRegistration(12).into();
        assert!(matches!(err, TaxError::DuplicateRegistration(12)));
        assert!(err.is_recoverable());

        let err: TaxError = StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows).into();
        assert!(matches!(err, TaxError::StoreUnavailable(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_fatal_errors() {
        assert!(!TaxError::InputClosed.is_recoverable());
        assert!(!TaxError::Io(std::io::Error::other("broken pipe")).is_recoverable());
        assert!(TaxError::InvalidFuelType.is_recoverable());
        assert!(TaxError::InvalidChoice("9".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TaxError::InvalidFuelType.to_string(), "Invalid fuel type!");
        assert_eq!(
            TaxError::NotFound(RecordRef::Property(5)).to_string(),
            "Property ID 5 not found."
        );
    }
}
