//! Customer Account Domain - Credit Allocation
//!
//! This crate applies credit acts (payments, credit notes, refunds) against a
//! customer's outstanding debit acts (invoices, counter sales), maintaining
//! each act's running allocated amount.
//!
//! # Allocation model
//!
//! - Debits are settled oldest-first (FIFO over the persisted creation order)
//! - A debit that is the subject of an open insurance gap claim is blocked
//!   from automatic allocation; explicit caller selection overrides the block
//! - Expected business outcomes (insufficient eligible capacity, blocked
//!   debits, empty pool) are reported through [`AllocationResult`], never as
//!   errors
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_account::CreditAllocator;
//!
//! let allocator = CreditAllocator::new(debits, claims);
//! let result = allocator.allocate(&payment)?;
//! if result.requires_manual_intervention() {
//!     // surface result.blocked to an operator
//! } else {
//!     store.save(&result.modified)?;
//! }
//! ```

pub mod allocator;
pub mod block;
pub mod calculator;
pub mod error;
pub mod ports;
pub mod result;
pub mod updater;

pub use allocator::CreditAllocator;
pub use block::{AllocationBlock, AllocationBlockResolver};
pub use error::AccountError;
pub use ports::{DebitSource, GapClaimSource};
pub use result::AllocationResult;
pub use updater::{BalanceUpdater, Distribution};
