//! Account domain collaborator traits
//!
//! Implemented by the surrounding system and injected into the allocator.
//! Both traits are synchronous: the engine runs inside whatever transaction
//! context the caller provides, and the caller's transaction boundary must
//! cover the reads made here together with the writes it performs afterwards
//! (the allocation invariants are check-then-act).

use core_ledger::{ClaimId, CustomerId, EntryId, LedgerEntry, StoreError};

/// Fetches the debit pool for a customer
pub trait DebitSource {
    /// Returns every posted, not-fully-allocated debit entry for the
    /// customer, oldest first
    ///
    /// The returned order fixes the FIFO settlement order for the allocation
    /// attempt.
    fn unallocated_debits(&self, customer: CustomerId) -> Result<Vec<LedgerEntry>, StoreError>;
}

/// Looks up open insurance gap claims
pub trait GapClaimSource {
    /// Returns the open gap claims referencing an invoice
    ///
    /// Claims that have been settled, cancelled, or declined are not
    /// returned.
    fn open_gap_claims(&self, invoice: EntryId) -> Result<Vec<ClaimId>, StoreError>;
}

impl<T: DebitSource + ?Sized> DebitSource for &T {
    fn unallocated_debits(&self, customer: CustomerId) -> Result<Vec<LedgerEntry>, StoreError> {
        (**self).unallocated_debits(customer)
    }
}

impl<T: GapClaimSource + ?Sized> GapClaimSource for &T {
    fn open_gap_claims(&self, invoice: EntryId) -> Result<Vec<ClaimId>, StoreError> {
        (**self).open_gap_claims(invoice)
    }
}
