use thiserror::Error;

/// Errors raised while building an emission-factor table.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("factor for {key:?} must be a finite non-negative number, got {value}")]
    InvalidFactor { key: String, value: f64 },
    #[error("duplicate key {0:?} in {1} table")]
    DuplicateKey(String, &'static str),
    #[error("required key {0:?} missing from {1} table")]
    MissingKey(&'static str, &'static str),
}

/// Errors for entry payloads rejected at the boundary, before any calculation runs.
#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("unknown category {0:?}; expected Energy, Transportation, Food or Waste")]
    UnknownCategory(String),
    #[error("Appliance name or power watts required for Energy category")]
    MissingPower,
    #[error("Hours used required for Energy category")]
    MissingHours,
    #[error("Appliance not found or power rating not provided")]
    UnknownAppliance(String),
    #[error("Transport type and distance required")]
    MissingTransport,
    #[error("Food type and quantity required")]
    MissingFood,
    #[error("Quantity in kg required for Waste category")]
    MissingWasteQuantity,
    #[error("{field} must be a finite number >= 0, got {value}")]
    NegativeValue { field: &'static str, value: f64 },
    #[error("powerWatts must be greater than zero, got {0}")]
    NonPositivePower(f64),
    #[error("invalid ISO 8601 date {0:?}")]
    InvalidDate(String),
    #[error("malformed entry payload: {0}")]
    Malformed(String),
}

/// Errors while loading runtime configuration from the environment.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
