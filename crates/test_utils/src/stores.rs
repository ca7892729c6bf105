//! In-memory collaborator fakes
//!
//! Plain-struct stand-ins for the persistence collaborators. Tests load them
//! up front and hand them to the component under test; nothing is written
//! back (the components return copies for the caller to persist).

use std::collections::HashMap;

use core_ledger::{ClaimId, CustomerId, EntryId, LedgerEntry, StoreError, TillBalanceId, TillId};
use domain_account::{calculator, DebitSource, GapClaimSource};
use domain_till::{Till, TillBalance, TillStore};

/// In-memory ledger backing the allocator and till rules in tests
#[derive(Default)]
pub struct InMemoryLedger {
    /// Debit entries, in creation (FIFO) order
    pub debits: Vec<LedgerEntry>,
    /// Open gap claims by invoice
    pub claims: HashMap<EntryId, Vec<ClaimId>>,
    /// Persisted till balances
    pub balances: Vec<TillBalance>,
    /// Tills
    pub tills: Vec<Till>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a debit entry to the ledger
    pub fn with_debit(mut self, debit: LedgerEntry) -> Self {
        self.debits.push(debit);
        self
    }

    /// Records open gap claims against an invoice
    pub fn with_claims(mut self, invoice: EntryId, claims: Vec<ClaimId>) -> Self {
        self.claims.insert(invoice, claims);
        self
    }

    /// Adds a till
    pub fn with_till(mut self, till: Till) -> Self {
        self.tills.push(till);
        self
    }

    /// Adds a persisted till balance
    pub fn with_balance(mut self, balance: TillBalance) -> Self {
        self.balances.push(balance);
        self
    }
}

impl DebitSource for InMemoryLedger {
    fn unallocated_debits(&self, customer: CustomerId) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(self
            .debits
            .iter()
            .filter(|d| {
                d.customer == Some(customer)
                    && d.is_debit()
                    && d.is_posted()
                    && !calculator::is_allocated(d)
            })
            .cloned()
            .collect())
    }
}

impl GapClaimSource for InMemoryLedger {
    fn open_gap_claims(&self, invoice: EntryId) -> Result<Vec<ClaimId>, StoreError> {
        Ok(self.claims.get(&invoice).cloned().unwrap_or_default())
    }
}

impl TillStore for InMemoryLedger {
    fn find_uncleared_balance(&self, till: TillId) -> Result<Option<TillBalance>, StoreError> {
        Ok(self
            .balances
            .iter()
            .find(|b| b.till == till && b.is_uncleared())
            .cloned())
    }

    fn balance(&self, id: TillBalanceId) -> Result<Option<TillBalance>, StoreError> {
        Ok(self.balances.iter().find(|b| b.id == id).cloned())
    }

    fn till(&self, id: TillId) -> Result<Option<Till>, StoreError> {
        Ok(self.tills.iter().find(|t| t.id == id).cloned())
    }
}
