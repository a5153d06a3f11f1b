pub mod models;

pub use models::{Department, NewDepartment, NewTreatment, TaxonomyKind, Treatment};
