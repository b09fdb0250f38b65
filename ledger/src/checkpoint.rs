//! Append-only checkpoint sequences with binary-search historical reads

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// A (ordinal, value) snapshot recorded whenever a tracked value changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Ordinal from which the value takes effect
    pub at: u64,
    /// Tracked value from this ordinal onward
    pub value: u64,
}

/// Append-only sequence of checkpoints with strictly increasing ordinals.
///
/// Past entries are never rewritten; a second write at the ordinal of the
/// last entry overwrites that entry in place instead of appending, so at
/// most one checkpoint exists per ordinal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointSeries {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointSeries {
    pub fn new() -> Self {
        Self {
            checkpoints: Vec::new(),
        }
    }

    /// Record `value` as of ordinal `at`.
    pub fn write(&mut self, at: u64, value: u64) -> Result<()> {
        match self.checkpoints.last_mut() {
            Some(last) if last.at == at => {
                last.value = value;
                Ok(())
            }
            Some(last) if last.at > at => Err(LedgerError::NonMonotonicWrite {
                last: last.at,
                attempted: at,
            }),
            _ => {
                self.checkpoints.push(Checkpoint { at, value });
                Ok(())
            }
        }
    }

    /// Value of the latest checkpoint with `checkpoint.at <= at`, or zero
    /// when no checkpoint that old exists.
    pub fn value_at(&self, at: u64) -> u64 {
        let idx = self.checkpoints.partition_point(|c| c.at <= at);
        if idx == 0 {
            0
        } else {
            self.checkpoints[idx - 1].value
        }
    }

    /// Latest recorded value, or zero for an empty series
    pub fn latest(&self) -> u64 {
        self.checkpoints.last().map(|c| c.value).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}
