//! Ledger error types

use thiserror::Error;

/// Checkpoint and balance errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Checkpoints must be written in increasing ordinal order. Hitting
    /// this means the embedding system broke its serialization contract.
    #[error("Non-monotonic checkpoint write: last ordinal {last}, attempted {attempted}")]
    NonMonotonicWrite { last: u64, attempted: u64 },

    #[error("Future lookup: requested ordinal {requested}, current {current}")]
    FutureLookup { requested: u64, current: u64 },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u64, available: u64 },

    #[error("Balance overflow for {0}")]
    BalanceOverflow(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
