//! Collaborator contracts
//!
//! The allocation and till components never talk to the persistence layer
//! directly: they consume narrow collaborator traits (defined in each domain
//! crate) and return updated entries for the caller to persist inside its own
//! transaction. `StoreError` is the error type all of those collaborators
//! share.

use std::fmt;
use thiserror::Error;

/// Error type for persistence collaborators
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record was not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The underlying store failed
    #[error("store failure: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Creates a NotFound error
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a Backend error without a source
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
