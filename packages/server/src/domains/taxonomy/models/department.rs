use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{normalize_slug, DepartmentId};

/// Department taxonomy node. The slug ties a row to its page definition in
/// the department catalog.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDepartment {
    pub name: String,
    pub slug: String,
}

impl Department {
    pub async fn create(input: NewDepartment, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (id, name, slug)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(DepartmentId::new())
        .bind(input.name.trim())
        .bind(normalize_slug(&input.slug))
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find or create by slug, keeping the existing name on conflict
    pub async fn find_or_create(name: &str, slug: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (id, name, slug)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
            RETURNING *
            "#,
        )
        .bind(DepartmentId::new())
        .bind(name)
        .bind(normalize_slug(slug))
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: DepartmentId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Slug lookup is case-insensitive; stored slugs are lowercase.
    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE slug = $1")
            .bind(normalize_slug(slug))
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn existing_ids(ids: &[Uuid], pool: &PgPool) -> Result<Vec<Uuid>> {
        let ids: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM departments WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }
}
