//! Core Ledger - foundational types for the customer-account subsystem
//!
//! This crate provides the building blocks shared by the account and till
//! domains:
//! - The ledger entry model (financial acts and their allocation bookkeeping)
//! - Strongly-typed identifiers
//! - The error contract for persistence collaborators

pub mod entry;
pub mod identifiers;
pub mod ports;

pub use entry::{EntryKind, EntryStatus, LedgerEntry, Polarity};
pub use identifiers::{
    ClaimId, CustomerId, DepositAccountId, EntryId, TillBalanceId, TillId,
};
pub use ports::StoreError;
