pub mod activities;
pub mod models;

pub use models::{
    BlogPost, BlogPostChanges, ContentKind, ContentRef, NewBlogPost, NewVideo, PostSummary, PublicationStatus, Video,
    VideoChanges,
};
