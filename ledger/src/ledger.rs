//! Voting power ledger: balances, delegation, and checkpointed weight

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::checkpoint::CheckpointSeries;
use crate::error::{LedgerError, Result};

/// Account identifier, as rendered by the wallet layer
pub type AccountId = String;

/// Stake-weighted voting power ledger.
///
/// Balances track the underlying stake or membership units; voting weight
/// is tracked separately, attributed to whichever account currently holds
/// each balance's delegation. Every weight and total-supply change lands
/// as a checkpoint at the current ordinal, which is what lets proposals
/// freeze voting power at a snapshot point without copying the ledger.
///
/// An account with no delegation entry contributes its balance to no one:
/// voting power stays zero until the account delegates, to itself or to
/// another account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VotingLedger {
    ordinal: u64,
    balances: HashMap<AccountId, u64>,
    delegates: HashMap<AccountId, AccountId>,
    weights: HashMap<AccountId, CheckpointSeries>,
    total_supply: CheckpointSeries,
}

impl VotingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current ordinal (e.g. block height), advanced by the embedding system
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    /// Move the clock forward by `by` ordinals
    pub fn advance(&mut self, by: u64) {
        self.ordinal += by;
    }

    pub fn balance_of(&self, account: &str) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// The account currently receiving `account`'s weight, if any
    pub fn delegate_of(&self, account: &str) -> Option<&AccountId> {
        self.delegates.get(account)
    }

    /// Create `amount` new units for `account`.
    ///
    /// Checkpoints the account's current delegate (when delegated) and the
    /// global total-supply track at the current ordinal.
    pub fn mint(&mut self, account: &str, amount: u64) -> Result<()> {
        let balance = self.balance_of(account);
        let new_balance = balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(account.to_string()))?;
        let new_supply = self
            .total_supply
            .latest()
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow("total supply".to_string()))?;

        self.total_supply.write(self.ordinal, new_supply)?;
        self.move_weight(None, self.delegates.get(account).cloned().as_ref(), amount)?;
        self.balances.insert(account.to_string(), new_balance);
        Ok(())
    }

    /// Destroy `amount` units held by `account`
    pub fn burn(&mut self, account: &str, amount: u64) -> Result<()> {
        let balance = self.balance_of(account);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available: balance,
            });
        }
        let new_supply = self.total_supply.latest().saturating_sub(amount);

        self.total_supply.write(self.ordinal, new_supply)?;
        self.move_weight(self.delegates.get(account).cloned().as_ref(), None, amount)?;
        self.balances.insert(account.to_string(), balance - amount);
        Ok(())
    }

    /// Move `amount` units from `from` to `to`.
    ///
    /// Weight follows each side's current delegate; total supply is
    /// untouched.
    pub fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<()> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available: from_balance,
            });
        }
        if from == to {
            return Ok(());
        }
        let new_to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(to.to_string()))?;

        self.move_weight(
            self.delegates.get(from).cloned().as_ref(),
            self.delegates.get(to).cloned().as_ref(),
            amount,
        )?;
        self.balances.insert(from.to_string(), from_balance - amount);
        self.balances.insert(to.to_string(), new_to_balance);
        Ok(())
    }

    /// Reassign `account`'s delegation to `to`, atomically moving its full
    /// balance from the old delegate's weight track to the new one. No-op
    /// when `to` already is the current delegate.
    pub fn delegate(&mut self, account: &str, to: &str) -> Result<()> {
        if self.delegates.get(account).map(String::as_str) == Some(to) {
            return Ok(());
        }
        let balance = self.balance_of(account);
        let old = self.delegates.get(account).cloned();
        let new = to.to_string();

        self.move_weight(old.as_ref(), Some(&new), balance)?;
        debug!(
            "delegation of {} ({} units) moved from {:?} to {}",
            account, balance, old, to
        );
        self.delegates.insert(account.to_string(), new);
        Ok(())
    }

    /// Latest voting weight delegated to `account`
    pub fn voting_power_of(&self, account: &str) -> u64 {
        self.weights.get(account).map(|s| s.latest()).unwrap_or(0)
    }

    /// Voting weight delegated to `account` as of ordinal `at`.
    ///
    /// Historical queries must target the past: `at` at or beyond the
    /// current ordinal is a `FutureLookup` error, because that ordinal's
    /// checkpoints are not sealed yet.
    pub fn voting_power_at(&self, account: &str, at: u64) -> Result<u64> {
        self.check_past(at)?;
        Ok(self.weights.get(account).map(|s| s.value_at(at)).unwrap_or(0))
    }

    /// Total supply as of ordinal `at`, same past-only rule as
    /// [`voting_power_at`](Self::voting_power_at)
    pub fn total_supply_at(&self, at: u64) -> Result<u64> {
        self.check_past(at)?;
        Ok(self.total_supply.value_at(at))
    }

    pub fn current_total_supply(&self) -> u64 {
        self.total_supply.latest()
    }

    fn check_past(&self, at: u64) -> Result<()> {
        if at >= self.ordinal {
            return Err(LedgerError::FutureLookup {
                requested: at,
                current: self.ordinal,
            });
        }
        Ok(())
    }

    /// Apply a weight delta between two delegates as checkpoints at the
    /// current ordinal. `None` on either side means the weight appears or
    /// disappears there (mint, burn, or an undelegated account).
    fn move_weight(
        &mut self,
        from: Option<&AccountId>,
        to: Option<&AccountId>,
        amount: u64,
    ) -> Result<()> {
        if amount == 0 || from == to {
            return Ok(());
        }
        if let Some(from) = from {
            let series = self.weights.entry(from.clone()).or_default();
            let current = series.latest();
            let reduced = current
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientBalance {
                    requested: amount,
                    available: current,
                })?;
            series.write(self.ordinal, reduced)?;
        }
        if let Some(to) = to {
            let series = self.weights.entry(to.clone()).or_default();
            let current = series.latest();
            let raised = current
                .checked_add(amount)
                .ok_or_else(|| LedgerError::BalanceOverflow(to.clone()))?;
            series.write(self.ordinal, raised)?;
        }
        Ok(())
    }
}
