//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly. Slugs get a random suffix
//! because tests in one binary share a database.

#![allow(dead_code)]

use anyhow::Result;
use hospital_core::common::{BlogPostId, DepartmentId, TreatmentId, VideoId};
use hospital_core::domains::content::{BlogPost, NewBlogPost, NewVideo, Video};
use hospital_core::domains::taxonomy::{Department, NewDepartment, NewTreatment, Treatment};
use sqlx::PgPool;
use uuid::Uuid;

pub fn unique_slug(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Create a department with a unique slug derived from `name`.
pub async fn create_test_department(pool: &PgPool, name: &str) -> Result<DepartmentId> {
    let department = Department::create(
        NewDepartment {
            name: name.to_string(),
            slug: unique_slug(&name.to_lowercase()),
        },
        pool,
    )
    .await?;
    Ok(department.id)
}

/// Department row for a fixed catalog slug, shared across tests.
pub async fn catalog_department(pool: &PgPool, name: &str, slug: &str) -> Result<DepartmentId> {
    Ok(Department::find_or_create(name, slug, pool).await?.id)
}

pub async fn create_test_treatment(pool: &PgPool, name: &str) -> Result<TreatmentId> {
    let treatment = Treatment::create(
        NewTreatment {
            name: name.to_string(),
            slug: unique_slug(&name.to_lowercase()),
            department_id: None,
        },
        pool,
    )
    .await?;
    Ok(treatment.id)
}

/// Create a draft blog post
pub async fn create_test_blog_post(pool: &PgPool, title: &str) -> Result<BlogPostId> {
    let post = BlogPost::create(
        NewBlogPost {
            title: title.to_string(),
            slug: unique_slug("post"),
            excerpt: Some(format!("About {}", title)),
            body: "Body".to_string(),
            cover_image_url: None,
        },
        pool,
    )
    .await?;
    Ok(post.id)
}

/// Create a blog post and publish it with an explicit `published_at`
/// `days_ago` days in the past.
pub async fn create_published_blog_post(pool: &PgPool, title: &str, days_ago: i32) -> Result<BlogPostId> {
    let id = create_test_blog_post(pool, title).await?;
    BlogPost::publish(id, pool).await?;
    sqlx::query("UPDATE blog_posts SET published_at = NOW() - make_interval(days => $2) WHERE id = $1")
        .bind(id)
        .bind(days_ago)
        .execute(pool)
        .await?;
    Ok(id)
}

pub async fn create_test_video(pool: &PgPool, title: &str) -> Result<VideoId> {
    let video = Video::create(
        NewVideo {
            title: title.to_string(),
            slug: unique_slug("video"),
            video_url: "https://videos.example.org/watch/1".to_string(),
            description: None,
            thumbnail_url: None,
        },
        pool,
    )
    .await?;
    Ok(video.id)
}
