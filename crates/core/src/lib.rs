//! FraudWatch Core - Domain types
//!
//! This crate contains the input types shared by the engine and its callers:
//! - `TransactionInput`: Caller-supplied transaction snapshot
//! - `DeviceStatus`: Trust level of the device the transaction came from
//! - `InputError`: Validation failures (the only error the engine raises)

pub mod device;
pub mod error;
pub mod transaction;

pub use device::DeviceStatus;
pub use error::{InputError, LocationField};
pub use transaction::TransactionInput;
