// Riverside General hospital website - API core
//
// Admin API for editorial content (blog posts, videos) and its taxonomy
// links, plus the public department page resolver.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
