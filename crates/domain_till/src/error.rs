//! Till domain errors

use core_ledger::{EntryId, EntryKind, StoreError, TillBalanceId, TillId};
use thiserror::Error;

/// Errors raised by the till reconciliation rules
///
/// These are business-rule conflicts for an operator to resolve, not
/// transient failures; the caller should surface them rather than retry.
#[derive(Debug, Error)]
pub enum TillError {
    /// Another uncleared balance already exists for the till
    #[error("an uncleared balance already exists for till {0}")]
    UnclearedTillExists(TillId),

    /// The act or balance carries no till reference
    #[error("{0} has no till")]
    MissingTill(String),

    /// The act is not a kind that can be added to a till
    #[error("a {0} cannot be added to a till")]
    CantAddActToTill(EntryKind),

    /// The entry is not a till balance
    #[error("expected a till balance, got a {0}")]
    InvalidTillArchetype(EntryKind),

    /// The balance has already been cleared
    #[error("till balance {0} has been cleared")]
    ClearedTill(TillBalanceId),

    /// The act is not linked to the balance
    #[error("act {act} is not an item of till balance {balance}")]
    MissingRelationship { balance: TillBalanceId, act: EntryId },

    /// The transfer target is the till the act is already on
    #[error("cannot transfer to till {0}: the act is already on it")]
    InvalidTransferTill(TillId),

    /// A persistence collaborator failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
