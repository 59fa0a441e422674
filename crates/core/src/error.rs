//! Input validation errors

use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Which location field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Location,
    PreviousLocation,
}

impl fmt::Display for LocationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationField::Location => write!(f, "location"),
            LocationField::PreviousLocation => write!(f, "previous_location"),
        }
    }
}

/// Malformed transaction input
///
/// Raised before any rule runs. There is no partial evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    #[error("Unknown device status: {0:?} (expected trusted, new or suspicious)")]
    UnknownDeviceStatus(String),

    #[error("Location identifier is empty: {field}")]
    EmptyLocation { field: LocationField },
}
