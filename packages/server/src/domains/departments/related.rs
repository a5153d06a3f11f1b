use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::domains::content::{BlogPost, PostSummary};
use crate::domains::taxonomy::Department;

/// Source of "related articles" for department pages.
#[async_trait]
pub trait RelatedContent: Send + Sync {
    /// Newest published posts associated with the department whose slug is
    /// `department_slug`. An unknown department yields an empty list.
    async fn recent_posts_for_department(&self, department_slug: &str, limit: i64) -> Result<Vec<PostSummary>>;
}

#[derive(Clone)]
pub struct PgRelatedContent {
    pool: PgPool,
}

impl PgRelatedContent {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelatedContent for PgRelatedContent {
    async fn recent_posts_for_department(&self, department_slug: &str, limit: i64) -> Result<Vec<PostSummary>> {
        let Some(department) = Department::find_by_slug(department_slug, &self.pool).await? else {
            tracing::warn!(department_slug, "No department row for rich page, showing no related posts");
            return Ok(Vec::new());
        };

        BlogPost::recent_published_for_department(department.id, limit, &self.pool).await
    }
}
