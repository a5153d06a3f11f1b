//! Admin dashboard API.
//!
//! No authentication here; the admin surface is expected to sit behind the
//! hospital's SSO proxy.

pub mod associations;
pub mod blog_posts;
pub mod settings;
pub mod taxonomy;
pub mod videos;

use crate::common::normalize_slug;
use crate::server::error::ApiError;

/// Reject blank text fields before they reach the database.
pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Slugs are stored normalized; one that normalizes to nothing is rejected.
pub(crate) fn require_slug(slug: &str) -> Result<(), ApiError> {
    if normalize_slug(slug).is_empty() {
        return Err(ApiError::BadRequest("slug must not be empty".into()));
    }
    Ok(())
}
