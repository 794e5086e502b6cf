//! Result of an atomic conditional commit
//!
//! A version conflict is an expected outcome under contention, so it is
//! returned as a value rather than an error. Callers that prefer `?` can
//! use [`CommitOutcome::into_result`].

use super::Version;
use crate::error::{Error, Result};
use crate::types::EntityId;

/// A staged version that no longer matches the persisted version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateConflict {
    /// Document whose version changed
    pub id: EntityId,
    /// Version supplied with the batch
    pub expected: Version,
    /// Version persisted at commit time
    pub actual: Version,
}

impl From<UpdateConflict> for Error {
    fn from(conflict: UpdateConflict) -> Self {
        Error::UpdateConflict {
            id: conflict.id,
            expected: conflict.expected,
            actual: conflict.actual,
        }
    }
}

/// Outcome of `DocumentStore::update_documents`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a commit may have been rejected with a conflict"]
pub enum CommitOutcome {
    /// Every version matched; modified documents now carry this version
    Committed(Version),
    /// The first mismatch found; nothing was written
    Conflict(UpdateConflict),
}

impl CommitOutcome {
    /// Whether the commit was applied
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed(_))
    }

    /// The new version, if committed
    pub fn version(&self) -> Option<Version> {
        match self {
            CommitOutcome::Committed(version) => Some(*version),
            CommitOutcome::Conflict(_) => None,
        }
    }

    /// The conflict, if rejected
    pub fn conflict(&self) -> Option<&UpdateConflict> {
        match self {
            CommitOutcome::Committed(_) => None,
            CommitOutcome::Conflict(conflict) => Some(conflict),
        }
    }

    /// Convert into a `Result`, mapping a conflict to `Error::UpdateConflict`
    pub fn into_result(self) -> Result<Version> {
        match self {
            CommitOutcome::Committed(version) => Ok(version),
            CommitOutcome::Conflict(conflict) => Err(conflict.into()),
        }
    }
}
