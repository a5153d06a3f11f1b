use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{normalize_slug, VideoId};

use super::PublicationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub video_url: String, // hosted externally (YouTube, CDN)
    pub thumbnail_url: Option<String>,
    pub status: String, // 'draft', 'published'
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVideo {
    pub title: String,
    pub slug: String,
    pub video_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl Video {
    pub async fn create(input: NewVideo, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (id, title, slug, description, video_url, thumbnail_url, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(VideoId::new())
        .bind(input.title.trim())
        .bind(normalize_slug(&input.slug))
        .bind(input.description)
        .bind(input.video_url)
        .bind(input.thumbnail_url)
        .bind(PublicationStatus::Draft.as_str())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(id: VideoId, changes: VideoChanges, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Video>(
            r#"
            UPDATE videos SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                video_url = COALESCE($5, video_url),
                thumbnail_url = COALESCE($6, thumbnail_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.slug.as_deref().map(normalize_slug))
        .bind(changes.description)
        .bind(changes.video_url)
        .bind(changes.thumbnail_url)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn publish(id: VideoId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Video>(
            r#"
            UPDATE videos
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

    pub async fn unpublish(id: VideoId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Video>(
            "UPDATE videos SET status = 'draft', updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: VideoId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Video>("SELECT * FROM videos ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn exists(id: VideoId, pool: &PgPool) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    pub async fn delete_tx(id: VideoId, tx: &mut Transaction<'_, Postgres>) -> Result<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
