//! Balance arithmetic
//!
//! Pure functions over an entry's persisted state. Amounts use decimal
//! arithmetic with exact comparison; no rounding happens here.

use rust_decimal::Decimal;

use core_ledger::LedgerEntry;

/// Returns how much of the entry remains to be matched
///
/// This is `total - allocated`, clamped to be non-negative so that a stale or
/// over-written allocated amount can never produce a negative remainder.
pub fn allocatable(entry: &LedgerEntry) -> Decimal {
    let remaining = entry.total - entry.allocated;
    if remaining.is_sign_negative() {
        Decimal::ZERO
    } else {
        remaining
    }
}

/// Returns true if the entry has been fully allocated
///
/// Zero-total entries are trivially allocated.
pub fn is_allocated(entry: &LedgerEntry) -> bool {
    allocatable(entry).is_zero()
}
