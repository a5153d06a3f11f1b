//! Slug → render plan.
//!
//! Dispatch goes through one lookup table built at startup. Rich pages are
//! inserted first, so a slug present in both the rich set and the generic
//! table always resolves to the rich page.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::catalog::DepartmentCatalog;
use super::definition::{
    DepartmentDefinition, DoctorEntry, Faq, Feature, ProcedureEntry, RichDepartmentDefinition, ServiceEntry,
    Testimonial,
};
use super::related::RelatedContent;
use super::rich::RichDepartment;
use crate::common::normalize_slug;
use crate::domains::content::PostSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    pub description: String,
    pub icon: String,
}

/// Generic department template, filled from a catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericPage {
    pub slug: String,
    pub hero: Hero,
    pub services: Vec<ServiceEntry>,
    pub procedures: Vec<ProcedureEntry>,
    pub doctors: Vec<DoctorEntry>,
    /// Absent when the record has no FAQs; the template hides the block.
    pub faqs: Option<Vec<Faq>>,
    pub features: Vec<Feature>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichPage {
    pub page: RichDepartment,
    pub definition: RichDepartmentDefinition,
    pub related_posts: Vec<PostSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum RenderPlan {
    Rich(RichPage),
    Generic(GenericPage),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Render(RenderPlan),
    NotFound,
}

impl Resolution {
    pub fn into_plan(self) -> Option<RenderPlan> {
        match self {
            Resolution::Render(plan) => Some(plan),
            Resolution::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageSource {
    Rich(RichDepartment),
    Generic,
}

pub struct ContentResolver {
    catalog: DepartmentCatalog,
    pages: HashMap<String, PageSource>,
    related: Arc<dyn RelatedContent>,
    related_limit: i64,
}

impl ContentResolver {
    pub fn new(catalog: DepartmentCatalog, related: Arc<dyn RelatedContent>, related_limit: i64) -> Self {
        let mut pages = HashMap::new();
        for page in RichDepartment::ALL {
            pages.insert(page.slug().to_string(), PageSource::Rich(page));
        }
        for definition in catalog.departments() {
            pages.entry(definition.slug.clone()).or_insert(PageSource::Generic);
        }

        Self {
            catalog,
            pages,
            related,
            related_limit,
        }
    }

    pub fn catalog(&self) -> &DepartmentCatalog {
        &self.catalog
    }

    /// Distinct slugs that resolve to a page.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Resolve a public department URL slug. Never fails: a storage problem
    /// while fetching related posts degrades to an empty list.
    pub async fn resolve(&self, slug: &str) -> Resolution {
        let slug = normalize_slug(slug);

        let plan = match self.pages.get(&slug) {
            Some(PageSource::Rich(page)) => RenderPlan::Rich(self.rich_page(*page).await),
            Some(PageSource::Generic) => match self.catalog.generic(&slug) {
                Some(definition) => RenderPlan::Generic(self.generic_page(definition)),
                None => return Resolution::NotFound,
            },
            None => {
                debug!(slug = %slug, "No department page for slug");
                return Resolution::NotFound;
            }
        };

        Resolution::Render(plan)
    }

    async fn rich_page(&self, page: RichDepartment) -> RichPage {
        let related_posts = match self
            .related
            .recent_posts_for_department(page.slug(), self.related_limit)
            .await
        {
            Ok(mut posts) => {
                posts.truncate(usize::try_from(self.related_limit).unwrap_or(0));
                posts
            }
            Err(e) => {
                warn!(page = %page, error = %e, "Failed to load related posts, rendering without them");
                Vec::new()
            }
        };

        RichPage {
            page,
            definition: self.catalog.rich(page).clone(),
            related_posts,
        }
    }

    fn generic_page(&self, definition: &DepartmentDefinition) -> GenericPage {
        let defaults = self.catalog.defaults();

        GenericPage {
            slug: definition.slug.clone(),
            hero: Hero {
                title: definition.title.clone(),
                description: definition.description.clone(),
                icon: definition.icon.clone(),
            },
            services: definition.services.clone(),
            procedures: definition.procedures.clone(),
            doctors: definition.doctors.clone(),
            faqs: (!definition.faqs.is_empty()).then(|| definition.faqs.clone()),
            features: definition
                .features
                .clone()
                .unwrap_or_else(|| defaults.features.clone()),
            testimonials: definition
                .testimonials
                .clone()
                .unwrap_or_else(|| defaults.testimonials.clone()),
        }
    }
}
