//! Allocation results
//!
//! An [`AllocationResult`] is the immutable record of one allocation
//! attempt. It owns post-allocation copies of every act involved; the caller
//! persists `modified` and decides what to do with `blocked`. The result
//! itself has no persistence responsibility.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_ledger::{EntryId, LedgerEntry};

use crate::block::AllocationBlock;

/// The outcome of one allocation attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResult {
    /// The credit, in its post-allocation state
    pub credit: LedgerEntry,
    /// The debits considered, in FIFO order
    ///
    /// When the attempt proceeded these are the debits that were allocated
    /// to; when manual intervention is required they are the full candidate
    /// pool (eligible first, then blocked) for display.
    pub debits: Vec<LedgerEntry>,
    /// Debits withheld from automatic allocation, by entry id
    pub blocked: HashMap<EntryId, AllocationBlock>,
    /// Every entry whose allocated amount changed; the caller must persist
    /// these
    pub modified: Vec<LedgerEntry>,
}

impl AllocationResult {
    /// Creates a no-op result: nothing considered, nothing modified
    pub(crate) fn unmodified(credit: LedgerEntry) -> Self {
        Self {
            credit,
            debits: Vec::new(),
            blocked: HashMap::new(),
            modified: Vec::new(),
        }
    }

    /// Returns true if at least one entry was modified
    pub fn was_allocated(&self) -> bool {
        !self.modified.is_empty()
    }

    /// Returns true if nothing was modified but blocks exist
    ///
    /// The caller is expected to surface the blocked debits to an operator
    /// rather than retry.
    pub fn requires_manual_intervention(&self) -> bool {
        self.modified.is_empty() && !self.blocked.is_empty()
    }
}
