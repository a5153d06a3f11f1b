use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::BTreeSet;
use uuid::Uuid;

use super::{Department, Treatment};

/// Which taxonomy a set of associations points into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyKind {
    Department,
    Treatment,
}

impl TaxonomyKind {
    pub const ALL: [TaxonomyKind; 2] = [TaxonomyKind::Department, TaxonomyKind::Treatment];

    /// Value stored in `content_associations.taxonomy_kind`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxonomyKind::Department => "department",
            TaxonomyKind::Treatment => "treatment",
        }
    }

    /// Returns the subset of `ids` that name an existing node of this kind.
    pub async fn existing_ids(&self, ids: &BTreeSet<Uuid>, pool: &PgPool) -> Result<BTreeSet<Uuid>> {
        if ids.is_empty() {
            return Ok(BTreeSet::new());
        }
        let ids: Vec<Uuid> = ids.iter().copied().collect();
        let found = match self {
            TaxonomyKind::Department => Department::existing_ids(&ids, pool).await?,
            TaxonomyKind::Treatment => Treatment::existing_ids(&ids, pool).await?,
        };
        Ok(found.into_iter().collect())
    }
}

impl std::fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaxonomyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "department" | "departments" => Ok(TaxonomyKind::Department),
            "treatment" | "treatments" => Ok(TaxonomyKind::Treatment),
            _ => Err(anyhow::anyhow!("Invalid taxonomy kind: {}", s)),
        }
    }
}
