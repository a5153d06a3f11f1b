//! Public department pages.
//!
//! Department content is authored out of band in a JSON catalog. The
//! resolver maps a URL slug to a render plan: a hand-built rich page, the
//! generic department template, or not found.

pub mod catalog;
pub mod definition;
pub mod related;
pub mod resolver;
pub mod rich;

pub use catalog::{CatalogError, DepartmentCatalog};
pub use definition::{DepartmentDefinition, RichDepartmentDefinition};
pub use related::{PgRelatedContent, RelatedContent};
pub use resolver::{ContentResolver, GenericPage, RenderPlan, Resolution, RichPage};
pub use rich::RichDepartment;
