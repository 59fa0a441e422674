//! FraudWatch CLI library
//!
//! Wiring and command handlers shared by the `fraudwatch` binary and its tests.

pub mod commands;
pub mod context;

pub use context::{AppContext, PolicyArg, Settings, VariantArg};
