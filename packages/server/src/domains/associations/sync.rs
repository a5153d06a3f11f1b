use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::errors::SyncError;
use super::store::AssociationStore;
use crate::domains::content::ContentRef;
use crate::domains::taxonomy::TaxonomyKind;

/// Rows to remove and rows to add to turn the stored set into the desired one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationDiff {
    pub to_remove: BTreeSet<Uuid>,
    pub to_add: BTreeSet<Uuid>,
    pub unchanged: usize,
}

impl AssociationDiff {
    pub fn between(current: &BTreeSet<Uuid>, desired: &BTreeSet<Uuid>) -> Self {
        Self {
            to_remove: current.difference(desired).copied().collect(),
            to_add: desired.difference(current).copied().collect(),
            unchanged: current.intersection(desired).count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Result of a successful sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    /// The stored set after the sync, equal to the desired set.
    pub associated: BTreeSet<Uuid>,
}

impl SyncOutcome {
    /// True when the call found nothing to write.
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Reconciles stored associations with an editor's desired set.
///
/// Only serialized calls per content item are guaranteed correct; concurrent
/// syncs of the same item race at the storage layer and the last writer wins.
#[derive(Clone)]
pub struct AssociationSynchronizer {
    store: Arc<dyn AssociationStore>,
}

impl AssociationSynchronizer {
    pub fn new(store: Arc<dyn AssociationStore>) -> Self {
        Self { store }
    }

    /// Make the stored `(content, kind)` association set equal `desired`.
    ///
    /// Unknown node ids and missing content are rejected before any write.
    /// When the stored set already matches, no write is issued.
    pub async fn sync(
        &self,
        content: ContentRef,
        kind: TaxonomyKind,
        desired: impl IntoIterator<Item = Uuid>,
    ) -> Result<SyncOutcome, SyncError> {
        let desired: BTreeSet<Uuid> = desired.into_iter().collect();

        if !self
            .store
            .content_exists(content)
            .await
            .map_err(SyncError::Storage)?
        {
            return Err(SyncError::ContentNotFound(content));
        }

        let existing = self
            .store
            .existing_nodes(kind, &desired)
            .await
            .map_err(SyncError::Storage)?;
        let unknown_ids: Vec<Uuid> = desired.difference(&existing).copied().collect();
        if !unknown_ids.is_empty() {
            warn!(%content, taxonomy_kind = %kind, ?unknown_ids, "Rejecting sync with unknown ids");
            return Err(SyncError::Validation { kind, unknown_ids });
        }

        let current = self
            .store
            .associated(content, kind)
            .await
            .map_err(SyncError::Storage)?;
        let diff = AssociationDiff::between(&current, &desired);

        if diff.is_empty() {
            debug!(%content, taxonomy_kind = %kind, count = desired.len(), "Associations already in sync");
        } else {
            self.store.apply(content, kind, &diff).await.map_err(|e| {
                let err = SyncError::from(e);
                warn!(%content, taxonomy_kind = %kind, error = %err, "Association sync failed");
                err
            })?;
            info!(
                %content,
                taxonomy_kind = %kind,
                added = diff.to_add.len(),
                removed = diff.to_remove.len(),
                unchanged = diff.unchanged,
                "Synced associations"
            );
        }

        Ok(SyncOutcome {
            added: diff.to_add.len(),
            removed: diff.to_remove.len(),
            unchanged: diff.unchanged,
            associated: desired,
        })
    }

    /// Drop every department and treatment link of `content`.
    ///
    /// Content deletion clears inside its own transaction instead; this is for
    /// untagging an item that stays.
    pub async fn clear(&self, content: ContentRef) -> Result<u64, SyncError> {
        let cleared = self.store.clear(content).await.map_err(SyncError::Storage)?;
        info!(%content, cleared, "Cleared associations");
        Ok(cleared)
    }

    /// Read back the stored set for `(content, kind)`.
    pub async fn associations(
        &self,
        content: ContentRef,
        kind: TaxonomyKind,
    ) -> Result<BTreeSet<Uuid>, SyncError> {
        if !self
            .store
            .content_exists(content)
            .await
            .map_err(SyncError::Storage)?
        {
            return Err(SyncError::ContentNotFound(content));
        }
        self.store
            .associated(content, kind)
            .await
            .map_err(SyncError::Storage)
    }
}
