use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Most related posts a rich department page shows.
pub const MAX_RELATED_POSTS: i64 = 3;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub database_max_connections: u32,
    /// JSON catalog replacing the built-in department definitions
    pub department_catalog_path: Option<PathBuf>,
    /// How many related blog posts a rich department page carries
    pub related_posts_limit: i64,
    /// CORS origins; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            department_catalog_path: env::var("DEPARTMENT_CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            related_posts_limit: parse_related_posts_limit(env::var("RELATED_POSTS_LIMIT").ok().as_deref())
                .context("RELATED_POSTS_LIMIT is invalid")?,
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

fn parse_related_posts_limit(raw: Option<&str>) -> Result<i64> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(MAX_RELATED_POSTS);
    };
    let limit: i64 = raw.parse().with_context(|| format!("{raw:?} is not a number"))?;
    if !(1..=MAX_RELATED_POSTS).contains(&limit) {
        bail!("{limit} is outside 1..={MAX_RELATED_POSTS}");
    }
    Ok(limit)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
