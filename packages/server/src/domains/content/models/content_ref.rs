use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{BlogPostId, VideoId};

use super::{BlogPost, Video};

/// Kind of content item that can carry department/treatment associations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    BlogPost,
    Video,
}

impl ContentKind {
    /// Value stored in `content_associations.content_kind`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::BlogPost => "blog_post",
            ContentKind::Video => "video",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blog_post" => Ok(ContentKind::BlogPost),
            "video" => Ok(ContentKind::Video),
            _ => Err(anyhow::anyhow!("Invalid content kind: {}", s)),
        }
    }
}

/// A content item addressed by kind and raw id, the owning side of an
/// association row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ContentRef {
    pub kind: ContentKind,
    pub id: Uuid,
}

impl ContentRef {
    pub fn new(kind: ContentKind, id: Uuid) -> Self {
        Self { kind, id }
    }

    pub async fn exists(&self, pool: &PgPool) -> Result<bool> {
        match self.kind {
            ContentKind::BlogPost => BlogPost::exists(BlogPostId::from_uuid(self.id), pool).await,
            ContentKind::Video => Video::exists(VideoId::from_uuid(self.id), pool).await,
        }
    }
}

impl From<BlogPostId> for ContentRef {
    fn from(id: BlogPostId) -> Self {
        Self::new(ContentKind::BlogPost, id.into_uuid())
    }
}

impl From<VideoId> for ContentRef {
    fn from(id: VideoId) -> Self {
        Self::new(ContentKind::Video, id.into_uuid())
    }
}

impl std::fmt::Display for ContentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// Publication status stored in the `status` column of content tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Draft,
    Published,
}

impl PublicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Draft => "draft",
            PublicationStatus::Published => "published",
        }
    }
}

impl std::fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
