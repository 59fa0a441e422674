//! FraudWatch Session Layer
//!
//! Everything the caller owns around the stateless engine:
//!
//! ```text
//!  submit ──► DecisionEngine::evaluate ──► Flagged? ──► Verifier (biometrics)
//!                                              │
//!                                              ▼
//!                                   AuditLog (append-only, newest first)
//!                                              │
//!                                   filters / SessionStats
//! ```
//!
//! ## Key Components
//!
//! - [`log::AuditLog`] - Append-only in-memory audit trail
//! - [`stats::SessionStats`] - Totals, fraud rate and risk level
//! - [`verification::Verifier`] - External biometric capability
//! - [`sample`] - Generated demo transactions and quick-test scenarios
//! - [`monitor::TransactionMonitor`] - Orchestrator used by front ends

pub mod confidence;
pub mod error;
pub mod log;
pub mod monitor;
pub mod record;
pub mod sample;
pub mod stats;
pub mod verification;

pub use confidence::simulate_confidence;
pub use error::{SessionError, SessionResult};
pub use log::{AuditFilter, AuditLog};
pub use monitor::{Submission, TransactionMonitor};
pub use record::AuditRecord;
pub use sample::{SampleGenerator, SampleTransaction, Scenario};
pub use stats::{RiskLevel, SessionStats};
pub use verification::{
    verify_with, BiometricModality, SimulatedVerifier, VerificationAttempt, VerificationRecord,
    Verifier,
};
