use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

use crate::domains::content::ContentRef;
use crate::domains::taxonomy::TaxonomyKind;

/// Failure of an association sync, as reported to the caller.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The desired set names nodes that do not exist. Nothing was written.
    #[error("unknown {kind} ids: {unknown_ids:?}")]
    Validation {
        kind: TaxonomyKind,
        unknown_ids: Vec<Uuid>,
    },

    /// The content item being tagged does not exist. Nothing was written.
    #[error("{0} not found")]
    ContentNotFound(ContentRef),

    /// The store rejected a read or write; stored associations are unchanged.
    #[error("storage error: {0}")]
    Storage(#[source] anyhow::Error),

    /// Stale rows were removed but some desired rows were not added.
    /// Re-running the same sync adds only `missing`.
    #[error("associations partially synced, {} rows missing: {source}", .missing.len())]
    PartialSync {
        missing: BTreeSet<Uuid>,
        source: anyhow::Error,
    },
}

impl SyncError {
    /// Whether an editor can resubmit the same form and expect progress.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Storage(_) | SyncError::PartialSync { .. })
    }
}

/// Failure while writing a diff, reported by an `AssociationStore`.
#[derive(Error, Debug)]
pub enum ApplyError {
    /// Remove phase failed; the add phase was not attempted.
    #[error("remove phase failed: {0}")]
    Remove(#[source] anyhow::Error),

    /// Remove phase committed, add phase failed for `missing`.
    #[error("add phase failed: {source}")]
    Add {
        missing: BTreeSet<Uuid>,
        source: anyhow::Error,
    },

    /// Both phases ran in one transaction which was rolled back.
    #[error("transaction rolled back: {0}")]
    RolledBack(#[source] anyhow::Error),
}

impl From<ApplyError> for SyncError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::Remove(source) | ApplyError::RolledBack(source) => SyncError::Storage(source),
            ApplyError::Add { missing, source } => SyncError::PartialSync { missing, source },
        }
    }
}
