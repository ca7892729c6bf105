//! Till reconciliation rules
//!
//! Enforces the one-uncleared-balance-per-till invariant and moves cash acts
//! between balances. Every operation returns updated copies for the caller
//! to persist; on error nothing is modified.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use core_ledger::{DepositAccountId, EntryKind, LedgerEntry, StoreError};

use crate::balance::{signed_amount, Till, TillBalance, TillBalanceStatus};
use crate::error::TillError;
use crate::ports::TillStore;

/// The result of clearing a till
#[derive(Debug, Clone)]
pub struct ClearOutcome {
    /// The cleared balance
    pub balance: TillBalance,
    /// The till, with its float and last-cleared time updated
    pub till: Till,
    /// Adjustment emitted when the counted amount differed from the till's
    /// previous float, already folded into the balance
    pub adjustment: Option<LedgerEntry>,
    /// Where the takings are to be deposited
    pub deposit_account: DepositAccountId,
}

/// The result of transferring an act between tills
#[derive(Debug, Clone)]
pub struct Transfer {
    /// The source balance, with the act unlinked and its total reduced
    pub from: TillBalance,
    /// The act, now carrying the target till
    pub act: LedgerEntry,
    /// The target till's uncleared balance (found or newly opened), with the
    /// act linked
    pub to: TillBalance,
}

/// Till business rules
pub struct TillRules<S> {
    store: S,
}

impl<S: TillStore> TillRules<S> {
    /// Creates the rules over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Checks whether a till balance can be saved
    ///
    /// Re-saving the same uncleared instance is allowed. Saving fails if the
    /// persisted copy has already been cleared, or another uncleared balance
    /// exists for the same till.
    pub fn check_can_save(&self, balance: &TillBalance) -> Result<(), TillError> {
        if let Some(stored) = self.store.balance(balance.id)? {
            if stored.status == TillBalanceStatus::Cleared {
                return Err(TillError::ClearedTill(balance.id));
            }
        }
        if balance.is_uncleared() {
            if let Some(current) = self.store.find_uncleared_balance(balance.till)? {
                if current.id != balance.id {
                    return Err(TillError::UnclearedTillExists(balance.till));
                }
            }
        }
        Ok(())
    }

    /// Adds a cash act to its till's uncleared balance
    ///
    /// Invoked when a payment or refund transitions to posted, and when an
    /// adjustment is created. If no uncleared balance exists for the till one
    /// is opened. Linking is idempotent: an act already on the balance
    /// leaves it unchanged.
    ///
    /// Returns the balance to persist, or `None` for a cash act that is not
    /// posted yet (it joins the till when it is).
    ///
    /// # Errors
    ///
    /// - `CantAddActToTill` if the act is not a payment, refund, or
    ///   adjustment
    /// - `MissingTill` if the act carries no till reference
    pub fn add_to_till(&self, act: &LedgerEntry) -> Result<Option<TillBalance>, TillError> {
        let is_adjustment = act.kind == EntryKind::TillAdjustment;
        if !act.kind.is_cash() && !is_adjustment {
            return Err(TillError::CantAddActToTill(act.kind));
        }
        if act.kind.is_cash() && !act.is_posted() {
            return Ok(None);
        }
        let till_id = act
            .till
            .ok_or_else(|| TillError::MissingTill(act.id.to_string()))?;

        let mut balance = match self.store.find_uncleared_balance(till_id)? {
            Some(balance) => balance,
            None => {
                let till = self
                    .store
                    .till(till_id)?
                    .ok_or_else(|| StoreError::not_found("till", till_id))?;
                TillBalance::open(&till)
            }
        };
        if balance.contains(act.id) {
            return Ok(Some(balance));
        }
        balance.items.push(act.id);
        balance.amount += signed_amount(act);
        debug!(till = %till_id, act = %act.id, amount = %balance.amount, "act added to till");
        Ok(Some(balance))
    }

    /// Clears a till balance
    ///
    /// Closes the period: the balance becomes cleared, the till records the
    /// clear time, and the counted amount becomes its new float. If the
    /// counted amount differs from the previous float a posted adjustment is
    /// emitted and folded into the balance before it closes. An
    /// already-cleared balance is returned unchanged.
    pub fn clear_till(
        &self,
        balance: &TillBalance,
        counted: Decimal,
        account: DepositAccountId,
        till: &Till,
    ) -> Result<ClearOutcome, TillError> {
        let mut balance = balance.clone();
        let mut till = till.clone();
        if !balance.is_uncleared() {
            return Ok(ClearOutcome {
                balance,
                till,
                adjustment: None,
                deposit_account: account,
            });
        }

        let difference = counted - till.cash_float;
        let adjustment = if difference.is_zero() {
            None
        } else {
            // drawer short of the expected float -> credit adjustment
            let mut adjustment = LedgerEntry::till_adjustment(
                till.id,
                difference.abs(),
                difference.is_sign_negative(),
            );
            adjustment.post();
            balance.items.push(adjustment.id);
            balance.amount += signed_amount(&adjustment);
            Some(adjustment)
        };

        let now = Utc::now();
        balance.status = TillBalanceStatus::Cleared;
        balance.end_time = Some(now);
        till.last_cleared = Some(now);
        till.cash_float = counted;
        debug!(till = %till.id, balance = %balance.id, amount = %balance.amount, "till cleared");

        Ok(ClearOutcome {
            balance,
            till,
            adjustment,
            deposit_account: account,
        })
    }

    /// Transfers a cash act from one till's balance to another till
    ///
    /// The act is unlinked from the source balance, its amount backed out,
    /// and added to the target till's uncleared balance (opened if none
    /// exists).
    ///
    /// # Errors
    ///
    /// - `CantAddActToTill` if the act is not a payment or refund
    /// - `InvalidTransferTill` if the target is the balance's own till
    /// - `ClearedTill` if the source balance is no longer uncleared
    /// - `MissingTill` if the act carries no till reference
    /// - `MissingRelationship` if the act is not linked to the source
    ///   balance
    pub fn transfer(
        &self,
        balance: &TillBalance,
        act: &LedgerEntry,
        to_till: &Till,
    ) -> Result<Transfer, TillError> {
        if !act.kind.is_cash() {
            return Err(TillError::CantAddActToTill(act.kind));
        }
        if balance.till == to_till.id {
            return Err(TillError::InvalidTransferTill(to_till.id));
        }
        if !balance.is_uncleared() {
            return Err(TillError::ClearedTill(balance.id));
        }
        if act.till.is_none() {
            return Err(TillError::MissingTill(act.id.to_string()));
        }
        if !balance.contains(act.id) {
            return Err(TillError::MissingRelationship {
                balance: balance.id,
                act: act.id,
            });
        }

        let mut from = balance.clone();
        from.items.retain(|item| *item != act.id);
        from.amount -= signed_amount(act);

        let mut act = act.clone();
        act.till = Some(to_till.id);
        act.updated_at = Utc::now();

        let mut to = self
            .store
            .find_uncleared_balance(to_till.id)?
            .unwrap_or_else(|| TillBalance::open(to_till));
        if !to.contains(act.id) {
            to.items.push(act.id);
            to.amount += signed_amount(&act);
        }
        debug!(act = %act.id, from = %from.till, to = %to.till, "act transferred between tills");

        Ok(Transfer { from, act, to })
    }
}
