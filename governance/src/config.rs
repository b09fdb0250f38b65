//! Governance configuration

use serde::{Deserialize, Serialize};

/// Governance parameters.
///
/// Each proposal captures the values in force at its creation (as stored
/// snapshot and deadline ordinals), so changing the live configuration
/// never affects proposals already in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Ordinals between proposal creation and its voting-power snapshot
    pub voting_delay: u64,
    /// Ordinals the voting window stays open after the snapshot
    pub voting_period: u64,
    /// Minimum current voting power required to create a proposal
    pub proposal_threshold: u64,
    /// Quorum as a percentage of the snapshot total supply (0-100)
    pub quorum_fraction: u64,
    /// Ordinals a succeeded proposal remains executable past its deadline.
    /// `None` means it never expires.
    pub execution_window: Option<u64>,
}

impl Default for GovernanceConfig {
    /// One-ordinal delay, roughly a week of voting at ~13s per ordinal,
    /// 4% quorum, open proposing, no expiry.
    fn default() -> Self {
        Self {
            voting_delay: 1,
            voting_period: 45_818,
            proposal_threshold: 0,
            quorum_fraction: 4,
            execution_window: None,
        }
    }
}
