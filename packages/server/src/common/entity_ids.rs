//! Typed ids for every persisted entity.

pub use super::id::Id;

/// Marker for blog posts.
pub struct BlogPost;

/// Marker for videos.
pub struct Video;

/// Marker for departments (taxonomy node).
pub struct Department;

/// Marker for treatments (taxonomy node).
pub struct Treatment;

pub type BlogPostId = Id<BlogPost>;
pub type VideoId = Id<Video>;
pub type DepartmentId = Id<Department>;
pub type TreatmentId = Id<Treatment>;
