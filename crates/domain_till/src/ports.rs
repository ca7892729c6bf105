//! Till domain collaborator trait

use core_ledger::{StoreError, TillBalanceId, TillId};

use crate::balance::{Till, TillBalance};

/// Read access to persisted tills and balances
///
/// Synchronous by design: the rules run inside the caller's transaction, and
/// the one-uncleared-balance invariant only holds if these reads share that
/// transaction (or an equivalent unique constraint) with the writes the
/// caller performs afterwards.
pub trait TillStore {
    /// Returns the till's current uncleared balance, if one exists
    fn find_uncleared_balance(&self, till: TillId) -> Result<Option<TillBalance>, StoreError>;

    /// Returns the persisted copy of a balance, if it exists
    fn balance(&self, id: TillBalanceId) -> Result<Option<TillBalance>, StoreError>;

    /// Returns a till by id
    fn till(&self, id: TillId) -> Result<Option<Till>, StoreError>;
}

impl<T: TillStore + ?Sized> TillStore for &T {
    fn find_uncleared_balance(&self, till: TillId) -> Result<Option<TillBalance>, StoreError> {
        (**self).find_uncleared_balance(till)
    }

    fn balance(&self, id: TillBalanceId) -> Result<Option<TillBalance>, StoreError> {
        (**self).balance(id)
    }

    fn till(&self, id: TillId) -> Result<Option<Till>, StoreError> {
        (**self).till(id)
    }
}
