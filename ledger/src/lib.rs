//! Checkpointed voting-power ledger
//!
//! Tracks stake balances, delegation, and per-delegate voting weight as
//! append-only checkpoint history, so "what was this account's weight as
//! of ordinal B" costs O(log n) in the number of recorded changes.
//!
//! All timing is expressed in ordinals (monotonic discrete time units,
//! e.g. block heights) advanced by the embedding system. The ledger never
//! consults wall-clock time.

pub mod checkpoint;
pub mod error;
pub mod ledger;

pub use checkpoint::{Checkpoint, CheckpointSeries};
pub use error::{LedgerError, Result};
pub use ledger::{AccountId, VotingLedger};
