//! Content item actions that span more than one table.
//!
//! Single-table operations (create, update, publish) live on the models.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::common::{BlogPostId, VideoId};
use crate::domains::associations::ContentAssociation;

use super::models::{BlogPost, ContentRef, Video};

/// Delete a blog post and every association row it owns, atomically.
/// Returns false when the post does not exist.
pub async fn delete_blog_post(id: BlogPostId, pool: &PgPool) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let cleared = ContentAssociation::delete_all_for_content_tx(ContentRef::from(id), &mut tx).await?;
    let deleted = BlogPost::delete_tx(id, &mut tx).await?;

    tx.commit().await?;

    info!(blog_post_id = %id, associations_cleared = cleared, deleted, "Deleted blog post");
    Ok(deleted)
}

/// Delete a video and every association row it owns, atomically.
pub async fn delete_video(id: VideoId, pool: &PgPool) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let cleared = ContentAssociation::delete_all_for_content_tx(ContentRef::from(id), &mut tx).await?;
    let deleted = Video::delete_tx(id, &mut tx).await?;

    tx.commit().await?;

    info!(video_id = %id, associations_cleared = cleared, deleted, "Deleted video");
    Ok(deleted)
}
