//! Proposal lifecycle states

use serde::{Deserialize, Serialize};

/// Lifecycle states, wire-coded 0-7 to the numbering governance clients
/// rely on.
///
/// The state is always derived from a proposal's stored fields and the
/// current ordinal, never stored itself; only the `executed` and
/// `canceled` flags persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    Pending = 0,
    Active = 1,
    Canceled = 2,
    Defeated = 3,
    Succeeded = 4,
    /// Reserved for timelocked deployments; this engine never produces it
    Queued = 5,
    Expired = 6,
    Executed = 7,
}

impl ProposalState {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Terminal states never transition again. A terminal proposal's ID
    /// may be taken over by a fresh proposal with identical content.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProposalState::Canceled
                | ProposalState::Defeated
                | ProposalState::Expired
                | ProposalState::Executed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_numbering() {
        assert_eq!(ProposalState::Pending.as_u8(), 0);
        assert_eq!(ProposalState::Active.as_u8(), 1);
        assert_eq!(ProposalState::Canceled.as_u8(), 2);
        assert_eq!(ProposalState::Defeated.as_u8(), 3);
        assert_eq!(ProposalState::Succeeded.as_u8(), 4);
        assert_eq!(ProposalState::Queued.as_u8(), 5);
        assert_eq!(ProposalState::Expired.as_u8(), 6);
        assert_eq!(ProposalState::Executed.as_u8(), 7);
    }

    #[test]
    fn test_terminal_states() {
        assert!(ProposalState::Defeated.is_terminal());
        assert!(ProposalState::Canceled.is_terminal());
        assert!(ProposalState::Expired.is_terminal());
        assert!(ProposalState::Executed.is_terminal());
        assert!(!ProposalState::Pending.is_terminal());
        assert!(!ProposalState::Active.is_terminal());
        assert!(!ProposalState::Succeeded.is_terminal());
    }
}
