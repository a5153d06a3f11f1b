//! Many-to-many associations between content items and taxonomy nodes.
//!
//! `AssociationSynchronizer::sync` is the only writer: it reconciles the
//! stored rows for one `(content item, taxonomy kind)` pair with the set an
//! editor submitted.

pub mod errors;
pub mod models;
pub mod store;
pub mod sync;
pub mod testing;

pub use errors::{ApplyError, SyncError};
pub use models::ContentAssociation;
pub use store::{AssociationStore, PgAssociationStore};
pub use sync::{AssociationDiff, AssociationSynchronizer, SyncOutcome};
