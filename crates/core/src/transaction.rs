//! TransactionInput - Caller-supplied transaction snapshot
//!
//! Built fresh per evaluation and never mutated by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::device::DeviceStatus;
use crate::error::{InputError, LocationField};

/// A single transaction as entered by the caller
///
/// Fields are public so callers can build literals; [`TransactionInput::validate`]
/// re-checks the invariants and the engine always calls it before evaluating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Amount in currency units (must be >= 0)
    pub amount: Decimal,
    /// Device trust level
    pub device_status: DeviceStatus,
    /// Where the transaction happens now (place name or code)
    pub location: String,
    /// Where the previous transaction happened
    pub previous_location: String,
}

impl TransactionInput {
    /// Create a validated transaction input. Locations are stored trimmed.
    pub fn new(
        amount: Decimal,
        device_status: DeviceStatus,
        location: impl Into<String>,
        previous_location: impl Into<String>,
    ) -> Result<Self, InputError> {
        let input = Self {
            amount,
            device_status,
            location: location.into().trim().to_string(),
            previous_location: previous_location.into().trim().to_string(),
        };
        input.validate()?;
        Ok(input)
    }

    /// Build from untyped form values (device status as text)
    pub fn from_raw(
        amount: Decimal,
        device_status: &str,
        location: &str,
        previous_location: &str,
    ) -> Result<Self, InputError> {
        // Amount is checked first so a negative amount wins over a bad device string
        if amount < Decimal::ZERO {
            return Err(InputError::NegativeAmount(amount));
        }
        let device_status = DeviceStatus::parse(device_status)?;
        Self::new(amount, device_status, location, previous_location)
    }

    /// Check all invariants
    pub fn validate(&self) -> Result<(), InputError> {
        if self.amount < Decimal::ZERO {
            return Err(InputError::NegativeAmount(self.amount));
        }
        if self.location.trim().is_empty() {
            return Err(InputError::EmptyLocation {
                field: LocationField::Location,
            });
        }
        if self.previous_location.trim().is_empty() {
            return Err(InputError::EmptyLocation {
                field: LocationField::PreviousLocation,
            });
        }
        Ok(())
    }

    /// Current location without surrounding whitespace
    pub fn current_location(&self) -> &str {
        self.location.trim()
    }

    /// Previous location without surrounding whitespace
    pub fn last_location(&self) -> &str {
        self.previous_location.trim()
    }

    /// True if the transaction moved away from the previous location
    pub fn is_relocation(&self) -> bool {
        self.current_location() != self.last_location()
    }
}
