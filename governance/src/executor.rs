//! Execution dispatch boundary
//!
//! A succeeded proposal's actions are handed to an [`ExecutionBackend`]
//! inside a transactional scope: either every call lands and the scope is
//! committed, or the scope is aborted and no call takes effect. The
//! governor never marks a proposal executed unless the whole batch
//! committed, so callers cannot observe a partially applied proposal.

use crate::proposal::ProposalAction;

/// The external target collaborator that performs the actual mutations.
///
/// Contract: calls staged between [`begin`](Self::begin) and
/// [`commit`](Self::commit) take effect only on commit;
/// [`abort`](Self::abort) must discard every call staged since `begin`.
pub trait ExecutionBackend {
    /// Open a transactional scope for one proposal's batch
    fn begin(&mut self);

    /// Stage one call. An `Err` aborts the whole batch and is surfaced
    /// verbatim as `ExecutionReverted`.
    fn call(&mut self, action: &ProposalAction) -> std::result::Result<(), String>;

    /// Make every staged call take effect
    fn commit(&mut self);

    /// Discard every call staged since `begin`
    fn abort(&mut self);
}
