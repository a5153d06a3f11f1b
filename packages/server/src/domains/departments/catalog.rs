//! Department catalog: hand-authored content for every department page.
//!
//! The catalog ships embedded in the binary and can be replaced at startup
//! with a JSON file (`DEPARTMENT_CATALOG_PATH`). Loading validates it; a bad
//! catalog is a startup failure, never a request-time one.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use super::definition::{DepartmentDefinition, Feature, RichDepartmentDefinition, Testimonial};
use super::rich::RichDepartment;
use crate::common::normalize_slug;

const EMBEDDED_CATALOG: &str = include_str!("../../../content/departments.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read department catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("department catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("department catalog has no rich definition for '{0}'")]
    MissingRichDefinition(RichDepartment),

    #[error("department catalog key '{0}' is not a lowercase slug")]
    NonCanonicalSlug(String),

    #[error("department catalog has a rich definition for unknown page '{0}'")]
    UnknownRichPage(String),
}

/// Fallback blocks for generic pages that omit their own.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogDefaults {
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    defaults: CatalogDefaults,
    rich: HashMap<String, RichDepartmentDefinition>,
    #[serde(default)]
    departments: BTreeMap<String, DepartmentDefinition>,
}

#[derive(Debug, Clone)]
pub struct DepartmentCatalog {
    defaults: CatalogDefaults,
    // indexed by RichDepartment::index()
    rich: Vec<RichDepartmentDefinition>,
    departments: BTreeMap<String, DepartmentDefinition>,
}

impl DepartmentCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `path` when given, otherwise the embedded catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::embedded()?,
        };
        info!(
            source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".into()),
            rich_pages = catalog.rich.len(),
            generic_pages = catalog.departments.len(),
            "Loaded department catalog"
        );
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::validate(raw)
    }

    fn validate(raw: RawCatalog) -> Result<Self, CatalogError> {
        let RawCatalog { defaults, mut rich, departments } = raw;

        for key in rich.keys().chain(departments.keys()) {
            if normalize_slug(key) != *key || key.is_empty() {
                return Err(CatalogError::NonCanonicalSlug(key.clone()));
            }
        }
        if let Some(unknown) = rich.keys().find(|key| RichDepartment::from_slug(key).is_none()) {
            return Err(CatalogError::UnknownRichPage(unknown.clone()));
        }

        let rich = RichDepartment::ALL
            .into_iter()
            .map(|page| -> Result<RichDepartmentDefinition, CatalogError> {
                let mut definition = rich
                    .remove(page.slug())
                    .ok_or(CatalogError::MissingRichDefinition(page))?;
                definition.department.slug = page.slug().to_string();
                Ok(definition)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let departments = departments
            .into_iter()
            .map(|(slug, mut definition)| {
                definition.slug = slug.clone();
                (slug, definition)
            })
            .collect();

        Ok(Self { defaults, rich, departments })
    }

    pub fn defaults(&self) -> &CatalogDefaults {
        &self.defaults
    }

    pub fn rich(&self, page: RichDepartment) -> &RichDepartmentDefinition {
        &self.rich[page.index()]
    }

    pub fn generic(&self, slug: &str) -> Option<&DepartmentDefinition> {
        self.departments.get(slug)
    }

    /// Generic department records, ordered by slug.
    pub fn departments(&self) -> impl Iterator<Item = &DepartmentDefinition> {
        self.departments.values()
    }

    /// Every department known to the catalog (rich pages and generic records)
    /// as `(slug, title)`, deduplicated by slug. Rich titles win.
    pub fn department_names(&self) -> Vec<(String, String)> {
        let mut names: BTreeMap<String, String> = BTreeMap::new();
        for definition in &self.rich {
            names.insert(definition.department.slug.clone(), definition.department.title.clone());
        }
        for definition in self.departments.values() {
            names
                .entry(definition.slug.clone())
                .or_insert_with(|| definition.title.clone());
        }
        names.into_iter().collect()
    }
}
