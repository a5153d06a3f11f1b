use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domains::content::{ContentKind, ContentRef};
use crate::domains::taxonomy::TaxonomyKind;

/// Join row: "this content item is tagged with this taxonomy node".
/// Unique per (content_kind, content_id, taxonomy_kind, taxonomy_id).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContentAssociation {
    pub content_kind: String, // 'blog_post', 'video'
    pub content_id: Uuid,
    pub taxonomy_kind: String, // 'department', 'treatment'
    pub taxonomy_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ContentAssociation {
    /// All rows for a content item, across taxonomy kinds
    pub async fn find_for_content(content: ContentRef, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, ContentAssociation>(
            r#"
            SELECT * FROM content_associations
            WHERE content_kind = $1 AND content_id = $2
            ORDER BY taxonomy_kind, taxonomy_id
            "#,
        )
        .bind(content.kind.as_str())
        .bind(content.id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Taxonomy node ids currently associated with a content item.
    pub async fn taxonomy_ids(
        content: ContentRef,
        kind: TaxonomyKind,
        pool: &PgPool,
    ) -> Result<BTreeSet<Uuid>> {
        let ids: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT taxonomy_id FROM content_associations
            WHERE content_kind = $1 AND content_id = $2 AND taxonomy_kind = $3
            "#,
        )
        .bind(content.kind.as_str())
        .bind(content.id)
        .bind(kind.as_str())
        .fetch_all(pool)
        .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// Remove the given node ids from a content item's associations.
    pub async fn delete_ids_tx(
        content: ContentRef,
        kind: TaxonomyKind,
        ids: &BTreeSet<Uuid>,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = ids.iter().copied().collect();
        let result = sqlx::query(
            r#"
            DELETE FROM content_associations
            WHERE content_kind = $1 AND content_id = $2 AND taxonomy_kind = $3
              AND taxonomy_id = ANY($4)
            "#,
        )
        .bind(content.kind.as_str())
        .bind(content.id)
        .bind(kind.as_str())
        .bind(&ids)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    /// Insert rows for the given node ids. Existing pairs are left untouched.
    pub async fn insert_ids_tx(
        content: ContentRef,
        kind: TaxonomyKind,
        ids: &BTreeSet<Uuid>,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = ids.iter().copied().collect();
        let result = sqlx::query(
            r#"
            INSERT INTO content_associations (content_kind, content_id, taxonomy_kind, taxonomy_id)
            SELECT $1, $2, $3, UNNEST($4::uuid[])
            ON CONFLICT (content_kind, content_id, taxonomy_kind, taxonomy_id) DO NOTHING
            "#,
        )
        .bind(content.kind.as_str())
        .bind(content.id)
        .bind(kind.as_str())
        .bind(&ids)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    /// Remove every association a content item owns (used on delete).
    pub async fn delete_all_for_content_tx(
        content: ContentRef,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM content_associations WHERE content_kind = $1 AND content_id = $2",
        )
        .bind(content.kind.as_str())
        .bind(content.id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    /// Content ids of one kind tagged with a taxonomy node
    pub async fn find_content_ids_for_node(
        kind: TaxonomyKind,
        taxonomy_id: Uuid,
        content_kind: ContentKind,
        pool: &PgPool,
    ) -> Result<Vec<Uuid>> {
        let ids: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT content_id FROM content_associations
            WHERE taxonomy_kind = $1 AND taxonomy_id = $2 AND content_kind = $3
            "#,
        )
        .bind(kind.as_str())
        .bind(taxonomy_id)
        .bind(content_kind.as_str())
        .fetch_all(pool)
        .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }
}
