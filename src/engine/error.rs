//! Error types for the order engine.

use crate::model::UserId;
use thiserror::Error;

/// Errors returned by [`OrderEngine`](crate::engine::OrderEngine) operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// No order exists for this user. Callers should send the diner back to
    /// user creation.
    #[error("Unknown user: {0}")]
    UnknownUser(UserId),

    /// User ids must be non-empty.
    #[error("User id must not be empty")]
    EmptyUserId,
}
