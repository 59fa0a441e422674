//! Session errors

use fraudwatch_engine::EngineError;
use thiserror::Error;

/// Errors from the session layer
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Customer name is required")]
    MissingCustomer,
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
