//! Account domain errors

use core_ledger::StoreError;
use thiserror::Error;

/// Errors raised by the credit allocator
///
/// Only caller-contract and data-integrity violations are errors; expected
/// business outcomes (blocked debits, insufficient eligible capacity, empty
/// pool) are reported through the allocation result instead.
#[derive(Debug, Error)]
pub enum AccountError {
    /// The caller supplied a structurally invalid act
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The persisted data is inconsistent
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    /// A persistence collaborator failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AccountError {
    /// Creates an InvalidArgument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        AccountError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates an InvalidState error
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        AccountError::InvalidState {
            reason: reason.into(),
        }
    }
}
