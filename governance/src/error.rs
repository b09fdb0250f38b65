//! Governance error types

use agora_ledger::LedgerError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("Insufficient voting power: have {have}, required {required}")]
    InsufficientVotingPower { have: u64, required: u64 },

    #[error("Duplicate proposal: {0} is still live")]
    DuplicateProposal(String),

    #[error("Proposal has no actions")]
    EmptyProposal,

    #[error("Proposal not found: {0}")]
    UnknownProposal(String),

    #[error("Proposal not active: {0}")]
    ProposalNotActive(String),

    #[error("Already voted: {voter} on proposal {id}")]
    AlreadyVoted { id: String, voter: String },

    #[error("Proposal not executable: {0}")]
    NotExecutable(String),

    #[error("Execution reverted: {0}")]
    ExecutionReverted(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Proposal not cancelable: {0}")]
    NotCancelable(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, GovernanceError>;
