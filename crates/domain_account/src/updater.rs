//! Balance updater
//!
//! Distributes a credit's unmatched amount across an ordered run of debits,
//! updating each touched entry's running allocated amount. The updater
//! consumes its inputs and returns updated copies; nothing it touches aliases
//! state held elsewhere.

use chrono::Utc;
use rust_decimal::Decimal;

use core_ledger::{EntryId, LedgerEntry};

use crate::calculator;

/// The outcome of one distribution pass
#[derive(Debug, Clone)]
pub struct Distribution {
    /// The credit, with its allocated amount advanced by the distributed sum
    pub credit: LedgerEntry,
    /// The debits, in the order they were processed
    pub debits: Vec<LedgerEntry>,
    /// Ids of every entry whose allocated amount changed, credit included
    pub touched: Vec<EntryId>,
}

impl Distribution {
    /// Returns copies of every modified entry, credit first
    pub fn modified(&self) -> Vec<LedgerEntry> {
        let mut entries = Vec::with_capacity(self.touched.len());
        if self.touched.contains(&self.credit.id) {
            entries.push(self.credit.clone());
        }
        entries.extend(
            self.debits
                .iter()
                .filter(|d| self.touched.contains(&d.id))
                .cloned(),
        );
        entries
    }
}

/// Applies credit amounts to debit entries
pub struct BalanceUpdater;

impl BalanceUpdater {
    /// Distributes up to `amount` of the credit across the debits in order
    ///
    /// For each debit, takes `min(allocatable(debit), remaining)`, adds it to
    /// both the debit's and the credit's allocated amount, and stops once the
    /// amount is exhausted. The amount is first capped at the credit's own
    /// allocatable remainder, so by construction no entry's allocated amount
    /// can exceed its total.
    pub fn distribute(
        mut credit: LedgerEntry,
        mut debits: Vec<LedgerEntry>,
        amount: Decimal,
    ) -> Distribution {
        let mut remaining = amount.min(calculator::allocatable(&credit));
        let mut touched = Vec::new();
        let now = Utc::now();

        for debit in debits.iter_mut() {
            if remaining.is_zero() {
                break;
            }
            let take = calculator::allocatable(debit).min(remaining);
            if take.is_zero() {
                continue;
            }
            debit.allocated += take;
            debit.updated_at = now;
            credit.allocated += take;
            remaining -= take;
            touched.push(debit.id);
        }

        if !touched.is_empty() {
            credit.updated_at = now;
            touched.insert(0, credit.id);
        }

        Distribution {
            credit,
            debits,
            touched,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use core_ledger::CustomerId;
    use proptest::prelude::*;

    proptest! {
        /// The sum taken from the credit equals the sum added across debits,
        /// and no entry ends up allocated beyond its total.
        #[test]
        fn distribution_conserves_amounts(
            credit_total in 0i64..100_000,
            debit_totals in prop::collection::vec(0i64..10_000, 0..12)
        ) {
            let customer = CustomerId::new();
            let mut credit = LedgerEntry::payment(customer, Decimal::new(credit_total, 2));
            credit.post();
            let debits: Vec<_> = debit_totals
                .iter()
                .map(|t| {
                    let mut d = LedgerEntry::invoice(customer, Decimal::new(*t, 2));
                    d.post();
                    d
                })
                .collect();

            let amount = Decimal::new(credit_total, 2);
            let dist = BalanceUpdater::distribute(credit, debits, amount);

            let debit_sum: Decimal = dist.debits.iter().map(|d| d.allocated).sum();
            prop_assert_eq!(debit_sum, dist.credit.allocated);
            prop_assert!(dist.credit.allocated <= dist.credit.total);
            for debit in &dist.debits {
                prop_assert!(debit.allocated >= Decimal::ZERO);
                prop_assert!(debit.allocated <= debit.total);
            }
        }
    }
}
