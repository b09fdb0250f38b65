//! Vote choices and per-voter receipts

use serde::{Deserialize, Serialize};

/// Ballot options, wire-coded to the convention callers use:
/// 0 = Against, 1 = For, 2 = Abstain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    Against = 0,
    For = 1,
    Abstain = 2,
}

impl VoteChoice {
    /// Decode the wire value submitted by clients
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(VoteChoice::Against),
            1 => Some(VoteChoice::For),
            2 => Some(VoteChoice::Abstain),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Record of one cast vote.
///
/// At most one receipt exists per (proposal, voter) pair; casting is
/// exactly-once and non-retractable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub choice: VoteChoice,
    /// Weight counted for this vote, as of the proposal's snapshot point
    pub weight: u64,
}
