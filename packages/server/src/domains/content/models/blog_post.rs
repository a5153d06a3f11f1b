use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{normalize_slug, BlogPostId, DepartmentId};

use super::PublicationStatus;

/// Blog post authored in the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub cover_image_url: Option<String>,
    pub status: String, // 'draft', 'published'
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogPostChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub cover_image_url: Option<String>,
}

/// Card shown in "related articles" on department pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostSummary {
    pub id: BlogPostId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl BlogPost {
    pub async fn create(input: NewBlogPost, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (id, title, slug, excerpt, body, cover_image_url, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(BlogPostId::new())
        .bind(input.title.trim())
        .bind(normalize_slug(&input.slug))
        .bind(input.excerpt)
        .bind(input.body)
        .bind(input.cover_image_url)
        .bind(PublicationStatus::Draft.as_str())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(id: BlogPostId, changes: BlogPostChanges, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                body = COALESCE($5, body),
                cover_image_url = COALESCE($6, cover_image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.slug.as_deref().map(normalize_slug))
        .bind(changes.excerpt)
        .bind(changes.body)
        .bind(changes.cover_image_url)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark published. The first publication timestamp is kept on re-publish.
    pub async fn publish(id: BlogPostId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts
            SET status = 'published', published_at = COALESCE(published_at, NOW()), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn unpublish(id: BlogPostId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, BlogPost>(
            "UPDATE blog_posts SET status = 'draft', updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: BlogPostId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// All posts, newest first (admin listing)
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn exists(id: BlogPostId, pool: &PgPool) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM blog_posts WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// Published posts tagged with a department, most recently published first.
    pub async fn recent_published_for_department(
        department_id: DepartmentId,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<PostSummary>> {
        sqlx::query_as::<_, PostSummary>(
            r#"
            SELECT bp.id, bp.title, bp.slug, bp.excerpt, bp.cover_image_url, bp.published_at
            FROM blog_posts bp
            INNER JOIN content_associations ca
                ON ca.content_kind = 'blog_post' AND ca.content_id = bp.id
            WHERE ca.taxonomy_kind = 'department'
              AND ca.taxonomy_id = $1
              AND bp.status = 'published'
              AND bp.published_at IS NOT NULL
            ORDER BY bp.published_at DESC, bp.id DESC
            LIMIT $2
            "#,
        )
        .bind(department_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete within a caller-owned transaction (associations go first).
    pub async fn delete_tx(id: BlogPostId, tx: &mut Transaction<'_, Postgres>) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
