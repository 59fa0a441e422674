//! Engine errors

use fraudwatch_core::InputError;
use thiserror::Error;

/// Errors from the Decision Engine
///
/// `evaluate` only ever returns [`EngineError::InvalidInput`]. The other
/// variants come from loading or validating configuration and distance tables.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl EngineError {
    /// True for the fail-fast input validation error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EngineError::InvalidInput(_))
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
