//! Error types for the todo service.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the HTTP layer answers it with
//! 404 and a fixed message. Every rejected payload lands in `Validation` with
//! the exact user-facing message. `Store` carries failures of the record store
//! collaborator; its message is logged but never shown to clients.

use thiserror::Error;

/// Errors returned by `TodoService` operations and `TodoStore` implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No record has the requested id.
    #[error("Todo not found")]
    NotFound,

    /// The request payload or query failed validation.
    #[error("{0}")]
    Validation(String),

    /// The record store could not complete the operation.
    #[error("store failure: {0}")]
    Store(String),
}

impl TodoError {
    pub fn validation(message: impl Into<String>) -> Self {
        TodoError::Validation(message.into())
    }
}
