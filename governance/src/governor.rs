//! Proposal registry and lifecycle engine

use std::collections::HashMap;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use agora_ledger::VotingLedger;

use crate::config::GovernanceConfig;
use crate::error::{GovernanceError, Result};
use crate::executor::ExecutionBackend;
use crate::proposal::{hash_description, hash_proposal, Proposal, ProposalAction, ProposalId};
use crate::state::ProposalState;
use crate::vote::{VoteChoice, VoteReceipt};

/// Governance engine.
///
/// Owns the proposal registry (proposals and vote receipts) and the
/// voting ledger (checkpoints and delegations); the registry touches the
/// ledger only through read-only historical queries. Every mutating call
/// is one atomic serialized step: it either commits all of its writes or
/// fails leaving the stores untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Governor {
    config: GovernanceConfig,
    ledger: VotingLedger,
    proposals: HashMap<ProposalId, Proposal>,
}

impl Governor {
    pub fn new(config: GovernanceConfig, ledger: VotingLedger) -> Self {
        Self {
            config,
            ledger,
            proposals: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Replace the live configuration. In-flight proposals keep the
    /// snapshot and deadline ordinals captured when they were created.
    pub fn set_config(&mut self, config: GovernanceConfig) {
        self.config = config;
    }

    pub fn ledger(&self) -> &VotingLedger {
        &self.ledger
    }

    /// Mutable ledger access for the embedding system (mint, transfer,
    /// delegation, ordinal advance)
    pub fn ledger_mut(&mut self) -> &mut VotingLedger {
        &mut self.ledger
    }

    /// Create a proposal from its actions and description.
    ///
    /// The proposer's *current* voting power must meet the threshold. The
    /// returned ID is the content hash, so identical content collides:
    /// while an earlier instance is live the call fails, whereas a
    /// terminal record (defeated, canceled, expired, executed) is
    /// replaced by the fresh proposal.
    pub fn propose(
        &mut self,
        proposer: &str,
        actions: Vec<ProposalAction>,
        description: &str,
    ) -> Result<ProposalId> {
        if actions.is_empty() {
            return Err(GovernanceError::EmptyProposal);
        }
        let have = self.ledger.voting_power_of(proposer);
        if have < self.config.proposal_threshold {
            return Err(GovernanceError::InsufficientVotingPower {
                have,
                required: self.config.proposal_threshold,
            });
        }

        let description_hash = hash_description(description);
        let id = hash_proposal(&actions, &description_hash);
        if let Some(existing) = self.proposals.get(&id) {
            if !self.derive_state(existing)?.is_terminal() {
                return Err(GovernanceError::DuplicateProposal(id.to_string()));
            }
        }

        let snapshot_point = self.ledger.ordinal() + self.config.voting_delay;
        let deadline_point = snapshot_point + self.config.voting_period;
        info!(
            "proposal {} created by {} (snapshot {}, deadline {})",
            id, proposer, snapshot_point, deadline_point
        );
        self.proposals.insert(
            id,
            Proposal::new(
                id,
                proposer,
                actions,
                description_hash,
                snapshot_point,
                deadline_point,
            ),
        );
        Ok(id)
    }

    /// Cast `voter`'s ballot on an active proposal, weighted by the
    /// voter's power at the proposal's snapshot point. Returns the
    /// counted weight. Exactly-once per (proposal, voter); a rejected
    /// call leaves the tally untouched.
    pub fn cast_vote(&mut self, id: &ProposalId, voter: &str, choice: VoteChoice) -> Result<u64> {
        let state = self.state(id)?;
        if state != ProposalState::Active {
            return Err(GovernanceError::ProposalNotActive(format!(
                "{} is {:?}",
                id, state
            )));
        }

        let snapshot_point = {
            let proposal = self.get(id)?;
            if proposal.receipts.contains_key(voter) {
                return Err(GovernanceError::AlreadyVoted {
                    id: id.to_string(),
                    voter: voter.to_string(),
                });
            }
            proposal.snapshot_point
        };
        let weight = self.snapshot_weight(voter, snapshot_point)?;

        let proposal = self.get_mut(id)?;
        match choice {
            VoteChoice::Against => proposal.against_votes += weight,
            VoteChoice::For => proposal.for_votes += weight,
            VoteChoice::Abstain => proposal.abstain_votes += weight,
        }
        proposal
            .receipts
            .insert(voter.to_string(), VoteReceipt { choice, weight });
        debug!("vote on {} by {}: {:?}, weight {}", id, voter, choice, weight);
        Ok(weight)
    }

    /// Current lifecycle state, derived from the stored record, the
    /// captured configuration, and the ledger's clock
    pub fn state(&self, id: &ProposalId) -> Result<ProposalState> {
        let proposal = self.get(id)?;
        self.derive_state(proposal)
    }

    /// Execute a succeeded proposal, exactly once.
    ///
    /// The ID is recomputed from the arguments and must match `id` and a
    /// stored proposal in state Succeeded. The batch is dispatched inside
    /// the backend's transactional scope; on any call failure the scope
    /// is aborted, the failure surfaces as `ExecutionReverted`, and the
    /// proposal stays Succeeded for a later retry.
    pub fn execute(
        &mut self,
        id: &ProposalId,
        actions: &[ProposalAction],
        description_hash: &[u8; 32],
        backend: &mut dyn ExecutionBackend,
    ) -> Result<()> {
        let state = self.state(id)?;
        let derived = hash_proposal(actions, description_hash);
        if derived != *id {
            return Err(GovernanceError::NotExecutable(format!(
                "arguments hash to {}, not {}",
                derived, id
            )));
        }
        if state != ProposalState::Succeeded {
            return Err(GovernanceError::NotExecutable(format!(
                "{} is {:?}",
                id, state
            )));
        }

        backend.begin();
        for action in actions {
            if let Err(reason) = backend.call(action) {
                backend.abort();
                warn!("execution of proposal {} reverted: {}", id, reason);
                return Err(GovernanceError::ExecutionReverted(reason));
            }
        }
        backend.commit();

        self.get_mut(id)?.executed = true;
        info!("proposal {} executed ({} calls)", id, actions.len());
        Ok(())
    }

    /// Cancel a pending or active proposal. Proposer only.
    pub fn cancel(&mut self, id: &ProposalId, caller: &str) -> Result<()> {
        let state = self.state(id)?;
        if self.get(id)?.proposer != caller {
            return Err(GovernanceError::Unauthorized(format!(
                "only the proposer may cancel {}",
                id
            )));
        }
        if !matches!(state, ProposalState::Pending | ProposalState::Active) {
            return Err(GovernanceError::NotCancelable(format!(
                "{} is {:?}",
                id, state
            )));
        }

        self.get_mut(id)?.canceled = true;
        info!("proposal {} canceled by {}", id, caller);
        Ok(())
    }

    /// Minimum combined For+Abstain weight required at ordinal `at`
    pub fn quorum(&self, at: u64) -> Result<u64> {
        let supply = self.ledger.total_supply_at(at)?;
        Ok(((supply as u128 * self.config.quorum_fraction as u128) / 100) as u64)
    }

    pub fn proposal(&self, id: &ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    pub fn proposal_snapshot(&self, id: &ProposalId) -> Result<u64> {
        Ok(self.get(id)?.snapshot_point)
    }

    pub fn proposal_deadline(&self, id: &ProposalId) -> Result<u64> {
        Ok(self.get(id)?.deadline_point)
    }

    pub fn proposal_proposer(&self, id: &ProposalId) -> Result<&str> {
        Ok(self.get(id)?.proposer.as_str())
    }

    /// Tally so far, in (against, for, abstain) order
    pub fn proposal_votes(&self, id: &ProposalId) -> Result<(u64, u64, u64)> {
        let proposal = self.get(id)?;
        Ok((
            proposal.against_votes,
            proposal.for_votes,
            proposal.abstain_votes,
        ))
    }

    pub fn has_voted(&self, id: &ProposalId, account: &str) -> Result<bool> {
        Ok(self.get(id)?.receipts.contains_key(account))
    }

    pub fn proposals(&self) -> Vec<&Proposal> {
        self.proposals.values().collect()
    }

    pub fn proposals_in_state(&self, state: ProposalState) -> Vec<&Proposal> {
        self.proposals
            .values()
            .filter(|p| self.derive_state(p).ok() == Some(state))
            .collect()
    }

    fn get(&self, id: &ProposalId) -> Result<&Proposal> {
        self.proposals
            .get(id)
            .ok_or_else(|| GovernanceError::UnknownProposal(id.to_string()))
    }

    fn get_mut(&mut self, id: &ProposalId) -> Result<&mut Proposal> {
        self.proposals
            .get_mut(id)
            .ok_or_else(|| GovernanceError::UnknownProposal(id.to_string()))
    }

    /// Pure transition function: (proposal, config, clock) -> state
    fn derive_state(&self, proposal: &Proposal) -> Result<ProposalState> {
        if proposal.executed {
            return Ok(ProposalState::Executed);
        }
        if proposal.canceled {
            return Ok(ProposalState::Canceled);
        }

        let ordinal = self.ledger.ordinal();
        if ordinal < proposal.snapshot_point {
            return Ok(ProposalState::Pending);
        }
        if ordinal < proposal.deadline_point {
            return Ok(ProposalState::Active);
        }

        // Voting closed: settle against the sealed snapshot
        let quorum = self.quorum(proposal.snapshot_point)?;
        if proposal.quorum_weight() < quorum || !proposal.vote_succeeded() {
            return Ok(ProposalState::Defeated);
        }
        if let Some(window) = self.config.execution_window {
            if ordinal >= proposal.deadline_point + window {
                return Ok(ProposalState::Expired);
            }
        }
        Ok(ProposalState::Succeeded)
    }

    /// Weight of `voter` as of the proposal snapshot. At the snapshot
    /// ordinal itself (the first votable ordinal) the ledger still
    /// reports the snapshot value as its live value.
    fn snapshot_weight(&self, voter: &str, snapshot_point: u64) -> Result<u64> {
        if snapshot_point < self.ledger.ordinal() {
            Ok(self.ledger.voting_power_at(voter, snapshot_point)?)
        } else {
            Ok(self.ledger.voting_power_of(voter))
        }
    }
}
