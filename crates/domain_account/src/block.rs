//! Allocation blocks
//!
//! A block is a reason a debit cannot currently receive automatic
//! allocation. The one modeled reason is an open insurance gap claim: paying
//! off the invoice while the insurer's share is still pending would misstate
//! what the customer owes, so the invoice is held back until an operator
//! decides.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_ledger::{ClaimId, EntryKind, LedgerEntry};

use crate::error::AccountError;
use crate::ports::GapClaimSource;

/// A reason a debit is ineligible for automatic allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AllocationBlock {
    /// The debit is the subject of one or more open gap claims
    GapClaim { claims: Vec<ClaimId> },
}

impl fmt::Display for AllocationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationBlock::GapClaim { claims } => {
                write!(f, "blocked by {} open gap claim(s)", claims.len())
            }
        }
    }
}

/// Determines whether a debit is blocked from automatic allocation
///
/// The single extension point for future block reasons. Resolution is not
/// cached: claim state can change between allocation attempts, so the
/// allocator queries once per candidate debit per attempt.
pub struct AllocationBlockResolver<'a, C> {
    claims: &'a C,
}

impl<'a, C: GapClaimSource> AllocationBlockResolver<'a, C> {
    /// Creates a resolver over the given claim lookup
    pub fn new(claims: &'a C) -> Self {
        Self { claims }
    }

    /// Returns the block for a debit, if any
    ///
    /// Only invoices can be claimed against; every other kind is eligible.
    pub fn resolve(&self, debit: &LedgerEntry) -> Result<Option<AllocationBlock>, AccountError> {
        if debit.kind != EntryKind::Invoice {
            return Ok(None);
        }
        let claims = self.claims.open_gap_claims(debit.id)?;
        if claims.is_empty() {
            Ok(None)
        } else {
            Ok(Some(AllocationBlock::GapClaim { claims }))
        }
    }
}
