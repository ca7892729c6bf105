//! The ledger entry model
//!
//! A ledger entry represents one financial act on a customer account or a
//! till: an invoice, counter sale, payment, credit note, refund, or one of
//! the till bookkeeping acts. Each entry tracks how much of its total has
//! been matched against entries of the opposite polarity via the running
//! `allocated` amount.
//!
//! # Invariants
//!
//! - `0 <= allocated <= total`
//! - an entry is fully allocated iff `allocated == total` (or `total == 0`)
//! - `allocated` is mutated only by the balance updater

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::{CustomerId, EntryId, TillId};

/// Whether an entry increases or reduces customer debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// Reduces customer debt (payment, credit note, refund)
    Credit,
    /// Increases customer debt (invoice, counter sale)
    Debit,
}

/// The recognized kinds of financial act
///
/// A closed set: callers match exhaustively instead of comparing archetype
/// name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Charge for goods and services
    Invoice,
    /// Over-the-counter sale
    CounterSale,
    /// Customer payment
    Payment,
    /// Credit note issued to the customer
    CreditNote,
    /// Refund to the customer
    Refund,
    /// Running total for a cash drawer's uncleared period
    TillBalance,
    /// Manual correction to a till balance
    TillAdjustment,
}

impl EntryKind {
    /// Returns the natural polarity of this kind of act
    pub fn polarity(&self) -> Polarity {
        match self {
            EntryKind::Invoice | EntryKind::CounterSale => Polarity::Debit,
            EntryKind::Payment | EntryKind::CreditNote | EntryKind::Refund => Polarity::Credit,
            EntryKind::TillBalance | EntryKind::TillAdjustment => Polarity::Debit,
        }
    }

    /// Returns true for the cash-affecting kinds that belong in a till
    pub fn is_cash(&self) -> bool {
        matches!(self, EntryKind::Payment | EntryKind::Refund)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Invoice => "invoice",
            EntryKind::CounterSale => "counter sale",
            EntryKind::Payment => "payment",
            EntryKind::CreditNote => "credit note",
            EntryKind::Refund => "refund",
            EntryKind::TillBalance => "till balance",
            EntryKind::TillAdjustment => "till adjustment",
        };
        write!(f, "{}", name)
    }
}

/// Entry lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Being edited by upstream workflow; not yet eligible for allocation
    InProgress,
    /// Finalized; participates in the customer balance
    Posted,
    /// Cancelled; never participates
    Cancelled,
}

/// A financial act on a customer account or till
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: EntryId,
    /// Kind of act
    pub kind: EntryKind,
    /// Credit or debit
    pub polarity: Polarity,
    /// Lifecycle status
    pub status: EntryStatus,
    /// Total amount of the act
    pub total: Decimal,
    /// Running sum of amounts applied to/from this entry
    pub allocated: Decimal,
    /// Owning customer, where applicable
    pub customer: Option<CustomerId>,
    /// Till the act was taken against, for cash-affecting entries
    pub till: Option<TillId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl LedgerEntry {
    fn new(kind: EntryKind, customer: Option<CustomerId>, total: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: EntryId::new_v7(),
            kind,
            polarity: kind.polarity(),
            status: EntryStatus::InProgress,
            total,
            allocated: Decimal::ZERO,
            customer,
            till: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a new in-progress invoice
    pub fn invoice(customer: CustomerId, total: Decimal) -> Self {
        Self::new(EntryKind::Invoice, Some(customer), total)
    }

    /// Creates a new in-progress counter sale
    pub fn counter_sale(customer: CustomerId, total: Decimal) -> Self {
        Self::new(EntryKind::CounterSale, Some(customer), total)
    }

    /// Creates a new in-progress payment
    pub fn payment(customer: CustomerId, total: Decimal) -> Self {
        Self::new(EntryKind::Payment, Some(customer), total)
    }

    /// Creates a new in-progress credit note
    pub fn credit_note(customer: CustomerId, total: Decimal) -> Self {
        Self::new(EntryKind::CreditNote, Some(customer), total)
    }

    /// Creates a new in-progress refund
    pub fn refund(customer: CustomerId, total: Decimal) -> Self {
        Self::new(EntryKind::Refund, Some(customer), total)
    }

    /// Creates a till balance adjustment against a till
    ///
    /// A credit adjustment reduces the till's running total, a debit
    /// adjustment increases it.
    pub fn till_adjustment(till: TillId, amount: Decimal, credit: bool) -> Self {
        let mut entry = Self::new(EntryKind::TillAdjustment, None, amount);
        entry.polarity = if credit { Polarity::Credit } else { Polarity::Debit };
        entry.till = Some(till);
        entry
    }

    /// Associates the entry with a till
    pub fn with_till(mut self, till: TillId) -> Self {
        self.till = Some(till);
        self
    }

    /// Posts the entry, making it eligible for allocation
    pub fn post(&mut self) {
        self.status = EntryStatus::Posted;
        self.updated_at = Utc::now();
    }

    /// Cancels the entry
    pub fn cancel(&mut self) {
        self.status = EntryStatus::Cancelled;
        self.updated_at = Utc::now();
    }

    /// Returns true if this entry reduces customer debt
    pub fn is_credit(&self) -> bool {
        self.polarity == Polarity::Credit
    }

    /// Returns true if this entry increases customer debt
    pub fn is_debit(&self) -> bool {
        self.polarity == Polarity::Debit
    }

    /// Returns true if the entry has been posted
    pub fn is_posted(&self) -> bool {
        self.status == EntryStatus::Posted
    }
}
