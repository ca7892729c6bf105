//! Test Utilities Crate
//!
//! Shared test infrastructure for the ledger test suite:
//!
//! - `builders`: builder patterns for test entries
//! - `stores`: in-memory fakes for the persistence collaborators

pub mod builders;
pub mod stores;

pub use builders::*;
pub use stores::*;
