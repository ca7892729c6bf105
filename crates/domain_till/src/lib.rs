//! Till Domain - Cash Drawer Reconciliation
//!
//! A till accumulates cash-affecting acts (payments and refunds) into its
//! current uncleared [`TillBalance`]. Clearing a balance reconciles the
//! drawer: the balance closes, the counted amount becomes the till's new
//! float, and the takings move to a deposit account.
//!
//! The crate's central invariant: **at most one uncleared balance may exist
//! per till**. [`TillRules`] enforces it, and relies on the caller to wrap
//! each operation's reads and writes in one transaction — the checks here
//! are check-then-act and need that isolation.

pub mod balance;
pub mod error;
pub mod ports;
pub mod rules;

pub use balance::{Till, TillBalance, TillBalanceStatus};
pub use error::TillError;
pub use ports::TillStore;
pub use rules::{ClearOutcome, TillRules, Transfer};
