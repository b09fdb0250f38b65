//! Proposal records and content-derived identity

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use agora_ledger::AccountId;

use crate::vote::VoteReceipt;

/// 256-bit content-derived proposal identifier.
///
/// Identical (actions, description) always produce the identical ID, so
/// any client can pre-compute it before submitting, and re-proposing the
/// same content collides deterministically. Rendered as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProposalId(pub [u8; 32]);

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for ProposalId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let id: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(ProposalId(id))
    }
}

// Hex-string serialization keeps proposal IDs usable as JSON map keys and
// readable in logs and API payloads.
impl Serialize for ProposalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for ProposalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// One call descriptor: the target to invoke, the value attached to the
/// call, and the opaque payload the target decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalAction {
    pub target: String,
    pub value: u64,
    pub calldata: Vec<u8>,
}

/// A stored proposal record.
///
/// Created once by `propose`; the tally fields change only through
/// `cast_vote`, and `executed`/`canceled` flip exactly once each at most.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: AccountId,
    pub actions: Vec<ProposalAction>,
    pub description_hash: [u8; 32],
    /// Ordinal at which voting power and quorum are permanently fixed
    pub snapshot_point: u64,
    /// First ordinal at which voting is closed
    pub deadline_point: u64,
    pub for_votes: u64,
    pub against_votes: u64,
    pub abstain_votes: u64,
    pub executed: bool,
    pub canceled: bool,
    pub receipts: HashMap<AccountId, VoteReceipt>,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        proposer: &str,
        actions: Vec<ProposalAction>,
        description_hash: [u8; 32],
        snapshot_point: u64,
        deadline_point: u64,
    ) -> Self {
        Self {
            id,
            proposer: proposer.to_string(),
            actions,
            description_hash,
            snapshot_point,
            deadline_point,
            for_votes: 0,
            against_votes: 0,
            abstain_votes: 0,
            executed: false,
            canceled: false,
            receipts: HashMap::new(),
        }
    }

    /// Combined weight counted toward quorum (For + Abstain)
    pub fn quorum_weight(&self) -> u64 {
        self.for_votes + self.abstain_votes
    }

    /// Whether the tally itself carries the proposal (strict For majority)
    pub fn vote_succeeded(&self) -> bool {
        self.for_votes > self.against_votes
    }
}

/// Hash a proposal description to its canonical 32-byte digest.
///
/// Keccak-256 over the exact UTF-8 bytes of the description: no trimming,
/// no quoting, no normalization. The empty description hashes the empty
/// byte string. Tooling that pre-computes IDs must apply the same rule
/// byte for byte; a one-byte difference yields a different proposal ID,
/// which is intended.
pub fn hash_description(description: &str) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(description.as_bytes());
    hasher.finalize().into()
}

/// Derive the canonical proposal ID from its content.
///
/// Keccak-256 over an order-sensitive, length-prefixed encoding of the
/// action list and the description digest. Any change to the number or
/// order of actions, a target, a value, a calldata byte, or the
/// description changes the ID.
pub fn hash_proposal(actions: &[ProposalAction], description_hash: &[u8; 32]) -> ProposalId {
    let mut hasher = Keccak256::new();
    hasher.update((actions.len() as u64).to_be_bytes());
    for action in actions {
        hasher.update((action.target.len() as u64).to_be_bytes());
        hasher.update(action.target.as_bytes());
        hasher.update(action.value.to_be_bytes());
        hasher.update((action.calldata.len() as u64).to_be_bytes());
        hasher.update(&action.calldata);
    }
    hasher.update(description_hash);
    ProposalId(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_action(stored: u64) -> ProposalAction {
        ProposalAction {
            target: "box".to_string(),
            value: 0,
            calldata: stored.to_be_bytes().to_vec(),
        }
    }

    #[test]
    fn test_identical_content_identical_id() {
        let hash = hash_description("Change Box value to 42");
        let a = hash_proposal(&[store_action(42)], &hash);
        let b = hash_proposal(&[store_action(42)], &hash);
        assert_eq!(a, b);
    }

    #[test]
    fn test_any_description_byte_changes_id() {
        let actions = [store_action(42)];
        let a = hash_proposal(&actions, &hash_description("Change Box value to 42"));
        let b = hash_proposal(&actions, &hash_description("Change Box value to 42 "));
        assert_ne!(a, b);

        // Empty and whitespace-only descriptions are distinct too
        let c = hash_proposal(&actions, &hash_description(""));
        let d = hash_proposal(&actions, &hash_description(" "));
        assert_ne!(c, d);
    }

    #[test]
    fn test_action_content_and_order_sensitive() {
        let hash = hash_description("batch");
        let a = hash_proposal(&[store_action(1), store_action(2)], &hash);
        let b = hash_proposal(&[store_action(2), store_action(1)], &hash);
        assert_ne!(a, b);

        let c = hash_proposal(&[store_action(1)], &hash);
        assert_ne!(a, c);
    }

    #[test]
    fn test_id_hex_round_trip() {
        let id = hash_proposal(&[store_action(7)], &hash_description("x"));
        let rendered = id.to_string();
        assert_eq!(rendered.len(), 64);
        assert_eq!(rendered.parse::<ProposalId>().unwrap(), id);
    }

    #[test]
    fn test_id_serializes_as_hex_string() {
        let id = hash_proposal(&[store_action(7)], &hash_description("x"));
        let encoded = serde_json::to_string(&id).unwrap();
        assert_eq!(encoded, format!("\"{}\"", id));

        let decoded: ProposalId = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, id);
    }
}
