pub mod department;
pub mod taxonomy_kind;
pub mod treatment;

pub use department::{Department, NewDepartment};
pub use taxonomy_kind::TaxonomyKind;
pub use treatment::{NewTreatment, Treatment};
