use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{normalize_slug, DepartmentId, TreatmentId};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Treatment {
    pub id: TreatmentId,
    pub name: String,
    pub slug: String,
    pub department_id: Option<DepartmentId>, // informational grouping only
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTreatment {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
}

impl Treatment {
    pub async fn create(input: NewTreatment, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Treatment>(
            r#"
            INSERT INTO treatments (id, name, slug, department_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(TreatmentId::new())
        .bind(input.name.trim())
        .bind(normalize_slug(&input.slug))
        .bind(input.department_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Treatment>("SELECT * FROM treatments WHERE slug = $1")
            .bind(normalize_slug(slug))
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Treatment>("SELECT * FROM treatments ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn existing_ids(ids: &[Uuid], pool: &PgPool) -> Result<Vec<Uuid>> {
        let ids: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM treatments WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }
}
