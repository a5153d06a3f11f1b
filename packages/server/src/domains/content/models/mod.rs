pub mod blog_post;
pub mod content_ref;
pub mod video;

pub use blog_post::{BlogPost, BlogPostChanges, NewBlogPost, PostSummary};
pub use content_ref::{ContentKind, ContentRef, PublicationStatus};
pub use video::{NewVideo, Video, VideoChanges};
