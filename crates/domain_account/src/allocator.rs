//! Credit allocator
//!
//! Applies a posted credit against a customer's outstanding debits. Two
//! paths exist: the discovering path ([`CreditAllocator::allocate`] /
//! [`CreditAllocator::allocate_with`]) which builds the candidate pool,
//! honors gap-claim blocks, and reports outcomes through an
//! [`AllocationResult`]; and the unconditional path
//! ([`CreditAllocator::apply`]) for callers that have already decided the
//! exact allocation.
//!
//! The allocator performs no persistence: every returned entry is an updated
//! copy the caller must save inside its own transaction.

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use core_ledger::{EntryId, LedgerEntry};

use crate::block::{AllocationBlock, AllocationBlockResolver};
use crate::calculator;
use crate::error::AccountError;
use crate::ports::{DebitSource, GapClaimSource};
use crate::result::AllocationResult;
use crate::updater::BalanceUpdater;

/// Allocates credits against outstanding debits
pub struct CreditAllocator<D, C> {
    debits: D,
    claims: C,
}

impl<D: DebitSource, C: GapClaimSource> CreditAllocator<D, C> {
    /// Creates an allocator over the given collaborators
    pub fn new(debits: D, claims: C) -> Self {
        Self { debits, claims }
    }

    /// Allocates a credit against the customer's unallocated debits
    ///
    /// Equivalent to [`allocate_with`](Self::allocate_with) with no explicit
    /// debits and partial allocation disabled.
    pub fn allocate(&self, credit: &LedgerEntry) -> Result<AllocationResult, AccountError> {
        self.allocate_with(credit, &[], false)
    }

    /// Allocates a credit, optionally against caller-selected debits
    ///
    /// The candidate pool is the explicit debits followed by every other
    /// unallocated posted debit of the credit's customer, oldest first.
    /// Debits blocked by open gap claims are withheld from automatic
    /// allocation, but an explicit debit is always treated as eligible:
    /// caller intent overrides the block.
    ///
    /// When blocks exist or explicit debits were supplied, the allocation
    /// proceeds only if the eligible debits can absorb the credit's full
    /// unmatched amount, or `allow_partial` is set and they can absorb some
    /// of it. Otherwise nothing is modified and the result carries the full
    /// pool and the blocks, signalling that an operator has to decide.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the supplied act is not a credit, or any
    ///   explicit debit is not a posted debit
    /// - `InvalidState` if the credit has no customer
    pub fn allocate_with(
        &self,
        credit: &LedgerEntry,
        explicit: &[LedgerEntry],
        allow_partial: bool,
    ) -> Result<AllocationResult, AccountError> {
        check_credit_polarity(credit)?;
        check_posted_debits(explicit)?;

        if !credit.is_posted() || calculator::is_allocated(credit) {
            return Ok(AllocationResult::unmodified(credit.clone()));
        }
        let amount = calculator::allocatable(credit);

        let customer = credit.customer.ok_or_else(|| {
            AccountError::invalid_state(format!("credit {} has no customer", credit.id))
        })?;

        // Candidate pool: explicit debits first, then the customer's other
        // unallocated debits in creation order. Order fixes the FIFO
        // settlement order.
        let explicit_ids: HashSet<EntryId> = explicit.iter().map(|e| e.id).collect();
        let mut pool: Vec<LedgerEntry> = explicit.to_vec();
        for debit in self.debits.unallocated_debits(customer)? {
            if !explicit_ids.contains(&debit.id) {
                pool.push(debit);
            }
        }
        if pool.is_empty() {
            return Ok(AllocationResult::unmodified(credit.clone()));
        }

        let resolver = AllocationBlockResolver::new(&self.claims);
        let mut eligible: Vec<LedgerEntry> = Vec::new();
        let mut withheld: Vec<(LedgerEntry, AllocationBlock)> = Vec::new();
        for debit in pool {
            if explicit_ids.contains(&debit.id) {
                eligible.push(debit);
                continue;
            }
            match resolver.resolve(&debit)? {
                Some(block) => withheld.push((debit, block)),
                None => eligible.push(debit),
            }
        }

        let proceed = if withheld.is_empty() && explicit.is_empty() {
            // Happy path: no blocks, no manual selection. Allocate whatever
            // matches; the credit may remain partly unallocated.
            true
        } else {
            let unallocated: Decimal = eligible.iter().map(calculator::allocatable).sum();
            unallocated >= amount || (allow_partial && unallocated > Decimal::ZERO)
        };

        let blocked: HashMap<EntryId, AllocationBlock> = withheld
            .iter()
            .map(|(debit, block)| (debit.id, block.clone()))
            .collect();

        if !proceed {
            debug!(
                credit = %credit.id,
                customer = %customer,
                blocked = withheld.len(),
                "allocation requires manual intervention"
            );
            let mut debits = eligible;
            debits.extend(withheld.into_iter().map(|(debit, _)| debit));
            return Ok(AllocationResult {
                credit: credit.clone(),
                debits,
                blocked,
                modified: Vec::new(),
            });
        }

        let distribution = BalanceUpdater::distribute(credit.clone(), eligible, amount);
        let modified = distribution.modified();
        debug!(
            credit = %credit.id,
            customer = %customer,
            modified = modified.len(),
            "credit allocated"
        );
        Ok(AllocationResult {
            credit: distribution.credit,
            debits: distribution.debits,
            blocked,
            modified,
        })
    }

    /// Applies a credit across the given debits unconditionally
    ///
    /// No pool discovery and no blocking logic: the caller has already
    /// decided the allocation. Returns every entry that was modified, or an
    /// empty list if the credit is already fully allocated.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the act is not a posted credit or any debit is
    /// not a posted debit. Checked before any mutation.
    pub fn apply(
        &self,
        credit: &LedgerEntry,
        debits: &[LedgerEntry],
    ) -> Result<Vec<LedgerEntry>, AccountError> {
        check_credit_polarity(credit)?;
        if !credit.is_posted() {
            return Err(AccountError::invalid_argument(format!(
                "credit {} is not posted",
                credit.id
            )));
        }
        check_posted_debits(debits)?;

        if calculator::is_allocated(credit) {
            return Ok(Vec::new());
        }
        let amount = calculator::allocatable(credit);
        let distribution = BalanceUpdater::distribute(credit.clone(), debits.to_vec(), amount);
        Ok(distribution.modified())
    }

    /// Applies a credit against a single debit
    pub fn apply_one(
        &self,
        credit: &LedgerEntry,
        debit: &LedgerEntry,
    ) -> Result<Vec<LedgerEntry>, AccountError> {
        self.apply(credit, std::slice::from_ref(debit))
    }
}

fn check_credit_polarity(credit: &LedgerEntry) -> Result<(), AccountError> {
    if !credit.is_credit() {
        return Err(AccountError::invalid_argument(format!(
            "act {} is a {}, not a credit",
            credit.id, credit.kind
        )));
    }
    Ok(())
}

fn check_posted_debits(debits: &[LedgerEntry]) -> Result<(), AccountError> {
    for debit in debits {
        if !debit.is_debit() {
            return Err(AccountError::invalid_argument(format!(
                "act {} is a {}, not a debit",
                debit.id, debit.kind
            )));
        }
        if !debit.is_posted() {
            return Err(AccountError::invalid_argument(format!(
                "debit {} is not posted",
                debit.id
            )));
        }
    }
    Ok(())
}
