//! Agora governance engine
//!
//! Proposal lifecycle over the checkpointed voting ledger: proposals are
//! identified by a content hash, voting weight is frozen at a per-proposal
//! snapshot ordinal, and a succeeded proposal dispatches its calls to an
//! external target atomically, exactly once.
//!
//! The engine is a sequential single-writer state machine; the embedding
//! system orders all mutating calls and advances the ledger's ordinal.

pub mod config;
pub mod error;
pub mod executor;
pub mod governor;
pub mod proposal;
pub mod state;
pub mod vote;

pub use config::GovernanceConfig;
pub use error::{GovernanceError, Result};
pub use executor::ExecutionBackend;
pub use governor::Governor;
pub use proposal::{hash_description, hash_proposal, Proposal, ProposalAction, ProposalId};
pub use state::ProposalState;
pub use vote::{VoteChoice, VoteReceipt};
