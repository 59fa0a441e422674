//! FraudWatch Decision Engine
//!
//! A pure, stateless function from a transaction snapshot to a verdict:
//!
//! ```text
//! TransactionInput ──► validate ──► rules (fixed order) ──► score ──► label policy
//!                                     │                      │
//!                          DistanceTable + RandomSource    Clock
//! ```
//!
//! ## Key Components
//!
//! - [`config::EngineConfig`] - Thresholds, weights, variant and label policy
//! - [`distance::DistanceTable`] - Symmetric location-pair distances
//! - [`random::RandomSource`] / [`clock::Clock`] - Injected entropy and time
//! - [`rules`] - The individual threshold rules
//! - [`engine::DecisionEngine`] - Runs the rules and builds a [`decision::VerdictResult`]
//!
//! The engine holds no mutable state. Randomness and time are always passed
//! in, so identical inputs with identical sources give identical verdicts.

pub mod clock;
pub mod config;
pub mod decision;
pub mod distance;
pub mod engine;
pub mod error;
pub mod random;
pub mod rules;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, LabelPolicy, RuleWeights, Variant};
pub use decision::{
    Distance, DistanceSource, Finding, RiskBand, RuleId, VerdictLabel, VerdictResult,
    ALL_CHECKS_PASSED, HIGH_RISK_SCORE_DETECTED,
};
pub use distance::{DistanceEntry, DistanceTable};
pub use engine::{evaluate, DecisionEngine};
pub use error::{EngineError, EngineResult};
pub use random::{FixedSource, RandomSource, RngSource, SequenceSource, StdRngSource};

pub use fraudwatch_core::{DeviceStatus, InputError, TransactionInput};
