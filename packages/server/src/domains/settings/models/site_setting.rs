use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Site-wide key/value setting (contact numbers, banner text, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteSetting {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl SiteSetting {
    pub async fn get(key: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, SiteSetting>("SELECT * FROM site_settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn upsert(key: &str, value: serde_json::Value, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, SiteSetting>(
            r#"
            INSERT INTO site_settings (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, SiteSetting>("SELECT * FROM site_settings ORDER BY key")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
