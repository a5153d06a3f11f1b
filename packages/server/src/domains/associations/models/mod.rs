pub mod content_association;

pub use content_association::ContentAssociation;
