// Storage seam for the association synchronizer.
//
// The synchronizer owns the diff logic; a store only answers "what exists"
// and writes a precomputed diff.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeSet;
use uuid::Uuid;

use super::errors::ApplyError;
use super::models::ContentAssociation;
use super::sync::AssociationDiff;
use crate::domains::content::ContentRef;
use crate::domains::taxonomy::TaxonomyKind;

#[async_trait]
pub trait AssociationStore: Send + Sync {
    async fn content_exists(&self, content: ContentRef) -> Result<bool>;

    /// Subset of `ids` naming existing nodes of `kind`.
    async fn existing_nodes(&self, kind: TaxonomyKind, ids: &BTreeSet<Uuid>) -> Result<BTreeSet<Uuid>>;

    /// Node ids currently associated with `content` for `kind`.
    async fn associated(&self, content: ContentRef, kind: TaxonomyKind) -> Result<BTreeSet<Uuid>>;

    /// Delete every association `content` owns, across both taxonomy kinds.
    async fn clear(&self, content: ContentRef) -> Result<u64>;

    /// Write `diff`: remove phase first, then add phase. Must not attempt the
    /// add phase when the remove phase fails.
    async fn apply(
        &self,
        content: ContentRef,
        kind: TaxonomyKind,
        diff: &AssociationDiff,
    ) -> std::result::Result<(), ApplyError>;
}

/// Postgres store. Both phases of `apply` run in one transaction, so a
/// failure never leaves a half-synced set behind.
#[derive(Clone)]
pub struct PgAssociationStore {
    pool: PgPool,
}

impl PgAssociationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssociationStore for PgAssociationStore {
    async fn content_exists(&self, content: ContentRef) -> Result<bool> {
        content.exists(&self.pool).await
    }

    async fn existing_nodes(&self, kind: TaxonomyKind, ids: &BTreeSet<Uuid>) -> Result<BTreeSet<Uuid>> {
        kind.existing_ids(ids, &self.pool).await
    }

    async fn associated(&self, content: ContentRef, kind: TaxonomyKind) -> Result<BTreeSet<Uuid>> {
        ContentAssociation::taxonomy_ids(content, kind, &self.pool).await
    }

    async fn clear(&self, content: ContentRef) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let cleared = ContentAssociation::delete_all_for_content_tx(content, &mut tx).await?;
        tx.commit().await?;
        Ok(cleared)
    }

    async fn apply(
        &self,
        content: ContentRef,
        kind: TaxonomyKind,
        diff: &AssociationDiff,
    ) -> std::result::Result<(), ApplyError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ApplyError::RolledBack(e.into()))?;

        // Dropping `tx` on an early return rolls back.
        ContentAssociation::delete_ids_tx(content, kind, &diff.to_remove, &mut tx)
            .await
            .map_err(ApplyError::RolledBack)?;
        ContentAssociation::insert_ids_tx(content, kind, &diff.to_add, &mut tx)
            .await
            .map_err(ApplyError::RolledBack)?;

        tx.commit()
            .await
            .map_err(|e| ApplyError::RolledBack(e.into()))
    }
}
