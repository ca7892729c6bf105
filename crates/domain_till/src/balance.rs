//! Tills and till balances
//!
//! A [`TillBalance`] is the running total of a cash drawer for one uncleared
//! period. Cash acts are linked to it as child items; clearing the balance
//! ends the period and a new balance opens lazily on the next cash
//! transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_ledger::{EntryId, EntryKind, EntryStatus, LedgerEntry, Polarity, TillBalanceId, TillId};

use crate::error::TillError;

/// A cash drawer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Till {
    /// Unique identifier
    pub id: TillId,
    /// Display name
    pub name: String,
    /// The float left in the drawer at the last clear
    pub cash_float: Decimal,
    /// When the till was last cleared
    pub last_cleared: Option<DateTime<Utc>>,
}

impl Till {
    /// Creates a till with a zero float
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TillId::new_v7(),
            name: name.into(),
            cash_float: Decimal::ZERO,
            last_cleared: None,
        }
    }

    /// Sets the cash float
    pub fn with_cash_float(mut self, cash_float: Decimal) -> Self {
        self.cash_float = cash_float;
        self
    }
}

/// Till balance lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TillBalanceStatus {
    /// Accumulating cash acts for the current period
    Uncleared,
    /// Reconciled; terminal for this balance instance
    Cleared,
}

/// A cash drawer's running total for one uncleared period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TillBalance {
    /// Unique identifier
    pub id: TillBalanceId,
    /// The owning till
    pub till: TillId,
    /// Lifecycle status
    pub status: TillBalanceStatus,
    /// Running total of linked cash acts
    pub amount: Decimal,
    /// The till's float when this period opened
    pub cash_float: Decimal,
    /// Linked cash acts, in the order they were added
    pub items: Vec<EntryId>,
    /// When this period opened
    pub start_time: DateTime<Utc>,
    /// When the balance was cleared
    pub end_time: Option<DateTime<Utc>>,
}

impl TillBalance {
    /// Opens a new uncleared balance for a till
    ///
    /// The balance records the till's float as it stood when the period
    /// opened.
    pub fn open(till: &Till) -> Self {
        Self {
            id: TillBalanceId::new_v7(),
            till: till.id,
            status: TillBalanceStatus::Uncleared,
            amount: Decimal::ZERO,
            cash_float: till.cash_float,
            items: Vec::new(),
            start_time: Utc::now(),
            end_time: None,
        }
    }

    /// Builds a balance from a persisted ledger entry
    ///
    /// Stores that persist till balances as generic ledger entries convert
    /// at this boundary. An in-progress entry is an uncleared balance; the
    /// terminal statuses map to cleared.
    ///
    /// # Errors
    ///
    /// - `InvalidTillArchetype` if the entry is not a till balance
    /// - `MissingTill` if the entry carries no till reference
    pub fn from_entry(entry: &LedgerEntry, items: Vec<EntryId>) -> Result<Self, TillError> {
        if entry.kind != EntryKind::TillBalance {
            return Err(TillError::InvalidTillArchetype(entry.kind));
        }
        let till = entry
            .till
            .ok_or_else(|| TillError::MissingTill(entry.id.to_string()))?;
        let status = match entry.status {
            EntryStatus::InProgress => TillBalanceStatus::Uncleared,
            EntryStatus::Posted | EntryStatus::Cancelled => TillBalanceStatus::Cleared,
        };
        Ok(Self {
            id: TillBalanceId::from_uuid(*entry.id.as_uuid()),
            till,
            status,
            amount: entry.total,
            cash_float: Decimal::ZERO,
            items,
            start_time: entry.created_at,
            end_time: match status {
                TillBalanceStatus::Cleared => Some(entry.updated_at),
                TillBalanceStatus::Uncleared => None,
            },
        })
    }

    /// Returns true while the balance is still accumulating
    pub fn is_uncleared(&self) -> bool {
        self.status == TillBalanceStatus::Uncleared
    }

    /// Returns true if the act is linked to this balance
    pub fn contains(&self, act: EntryId) -> bool {
        self.items.contains(&act)
    }
}

/// Returns the signed contribution of a cash act to a till balance
///
/// Payments add to the drawer, refunds take from it. Adjustments follow
/// their polarity: a debit adjustment adds, a credit adjustment subtracts.
pub(crate) fn signed_amount(act: &LedgerEntry) -> Decimal {
    match act.kind {
        EntryKind::Payment => act.total,
        EntryKind::Refund => -act.total,
        _ => match act.polarity {
            Polarity::Debit => act.total,
            Polarity::Credit => -act.total,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_ledger::CustomerId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_open_seeds_float_from_till() {
        let till = Till::new("Front desk").with_cash_float(dec!(200));
        let balance = TillBalance::open(&till);

        assert_eq!(balance.till, till.id);
        assert_eq!(balance.cash_float, dec!(200));
        assert_eq!(balance.amount, Decimal::ZERO);
        assert!(balance.is_uncleared());
        assert!(balance.items.is_empty());
    }

    #[test]
    fn test_from_entry_rejects_non_balance() {
        let invoice = LedgerEntry::invoice(CustomerId::new(), dec!(100));
        let result = TillBalance::from_entry(&invoice, Vec::new());
        assert!(matches!(
            result,
            Err(TillError::InvalidTillArchetype(EntryKind::Invoice))
        ));
    }

    #[test]
    fn test_from_entry_requires_till() {
        let mut entry = LedgerEntry::invoice(CustomerId::new(), dec!(0));
        entry.kind = EntryKind::TillBalance;
        entry.customer = None;
        let result = TillBalance::from_entry(&entry, Vec::new());
        assert!(matches!(result, Err(TillError::MissingTill(_))));
    }

    #[test]
    fn test_from_entry_status_mapping() {
        let till = TillId::new();
        let mut entry = LedgerEntry::till_adjustment(till, dec!(30), false);
        entry.kind = EntryKind::TillBalance;

        let open = TillBalance::from_entry(&entry, Vec::new()).unwrap();
        assert!(open.is_uncleared());
        assert!(open.end_time.is_none());

        entry.post();
        let cleared = TillBalance::from_entry(&entry, Vec::new()).unwrap();
        assert_eq!(cleared.status, TillBalanceStatus::Cleared);
        assert!(cleared.end_time.is_some());
    }

    #[test]
    fn test_signed_amounts() {
        let customer = CustomerId::new();
        let till = TillId::new();
        let payment = LedgerEntry::payment(customer, dec!(80));
        let refund = LedgerEntry::refund(customer, dec!(20));
        let short = LedgerEntry::till_adjustment(till, dec!(5), true);
        let over = LedgerEntry::till_adjustment(till, dec!(5), false);

        assert_eq!(signed_amount(&payment), dec!(80));
        assert_eq!(signed_amount(&refund), dec!(-20));
        assert_eq!(signed_amount(&short), dec!(-5));
        assert_eq!(signed_amount(&over), dec!(5));
    }
}
