//! Device status reported with a transaction

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::InputError;

/// Trust level of the device a transaction was submitted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize, EnumString, EnumIter, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    /// Previously seen and trusted device
    #[default]
    Trusted,

    /// First time this device is seen
    New,

    /// Device already flagged by an upstream system
    Suspicious,
}

impl DeviceStatus {
    /// Parse a device status from free text (case-insensitive, surrounding whitespace ignored)
    pub fn parse(value: &str) -> Result<Self, InputError> {
        DeviceStatus::from_str(value.trim())
            .map_err(|_| InputError::UnknownDeviceStatus(value.to_string()))
    }
}
