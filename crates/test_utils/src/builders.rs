//! Test data builders
//!
//! Builders for constructing test entries with sensible defaults, so tests
//! specify only the fields they care about.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_ledger::{CustomerId, EntryKind, EntryStatus, LedgerEntry, TillId};

/// Builder for test ledger entries
///
/// Defaults to a posted invoice for 100.00 with nothing allocated.
pub struct EntryBuilder {
    kind: EntryKind,
    status: EntryStatus,
    total: Decimal,
    allocated: Decimal,
    customer: Option<CustomerId>,
    till: Option<TillId>,
}

impl Default for EntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            kind: EntryKind::Invoice,
            status: EntryStatus::Posted,
            total: dec!(100),
            allocated: Decimal::ZERO,
            customer: Some(CustomerId::new()),
            till: None,
        }
    }

    /// Sets the entry kind
    pub fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the status
    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the total
    pub fn with_total(mut self, total: Decimal) -> Self {
        self.total = total;
        self
    }

    /// Sets the allocated amount
    pub fn with_allocated(mut self, allocated: Decimal) -> Self {
        self.allocated = allocated;
        self
    }

    /// Sets the owning customer
    pub fn with_customer(mut self, customer: CustomerId) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Sets the till
    pub fn with_till(mut self, till: TillId) -> Self {
        self.till = Some(till);
        self
    }

    /// Builds the entry
    pub fn build(self) -> LedgerEntry {
        let customer = self.customer.unwrap_or_default();
        let mut entry = match self.kind {
            EntryKind::Invoice => LedgerEntry::invoice(customer, self.total),
            EntryKind::CounterSale => LedgerEntry::counter_sale(customer, self.total),
            EntryKind::Payment => LedgerEntry::payment(customer, self.total),
            EntryKind::CreditNote => LedgerEntry::credit_note(customer, self.total),
            EntryKind::Refund => LedgerEntry::refund(customer, self.total),
            EntryKind::TillAdjustment => {
                LedgerEntry::till_adjustment(self.till.unwrap_or_default(), self.total, false)
            }
            EntryKind::TillBalance => {
                let mut entry = LedgerEntry::till_adjustment(
                    self.till.unwrap_or_default(),
                    self.total,
                    false,
                );
                entry.kind = EntryKind::TillBalance;
                entry
            }
        };
        entry.status = self.status;
        entry.allocated = self.allocated;
        entry.till = self.till.or(entry.till);
        entry
    }
}

/// Shorthand for a posted invoice
pub fn posted_invoice(customer: CustomerId, total: Decimal) -> LedgerEntry {
    EntryBuilder::new()
        .with_customer(customer)
        .with_total(total)
        .build()
}

/// Shorthand for a posted payment
pub fn posted_payment(customer: CustomerId, total: Decimal) -> LedgerEntry {
    EntryBuilder::new()
        .with_kind(EntryKind::Payment)
        .with_customer(customer)
        .with_total(total)
        .build()
}
