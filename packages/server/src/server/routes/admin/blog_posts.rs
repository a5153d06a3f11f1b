use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::{associations, require_non_blank, require_slug};
use crate::common::BlogPostId;
use crate::domains::content::activities;
use crate::domains::content::{BlogPost, BlogPostChanges, NewBlogPost};
use crate::server::{app::AppState, error::ApiError};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_blog_posts).post(create_blog_post))
        .route(
            "/:id",
            get(get_blog_post).put(update_blog_post).delete(delete_blog_post),
        )
        .route("/:id/publish", post(publish_blog_post))
        .route("/:id/unpublish", post(unpublish_blog_post))
        .merge(associations::routes())
}

fn not_found(id: BlogPostId) -> ApiError {
    ApiError::NotFound(format!("blog post {id} not found"))
}

async fn list_blog_posts(Extension(state): Extension<AppState>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    Ok(Json(BlogPost::find_all(&state.db_pool).await?))
}

async fn create_blog_post(
    Extension(state): Extension<AppState>,
    Json(input): Json<NewBlogPost>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    require_non_blank("title", &input.title)?;
    require_slug(&input.slug)?;

    let post = BlogPost::create(input, &state.db_pool).await?;
    tracing::info!(blog_post_id = %post.id, slug = %post.slug, "Created blog post");
    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_blog_post(
    Extension(state): Extension<AppState>,
    Path(id): Path<BlogPostId>,
) -> Result<Json<BlogPost>, ApiError> {
    BlogPost::find_by_id(id, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

async fn update_blog_post(
    Extension(state): Extension<AppState>,
    Path(id): Path<BlogPostId>,
    Json(changes): Json<BlogPostChanges>,
) -> Result<Json<BlogPost>, ApiError> {
    if let Some(title) = &changes.title {
        require_non_blank("title", title)?;
    }
    if let Some(slug) = &changes.slug {
        require_slug(slug)?;
    }

    BlogPost::update(id, changes, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

async fn delete_blog_post(
    Extension(state): Extension<AppState>,
    Path(id): Path<BlogPostId>,
) -> Result<StatusCode, ApiError> {
    if activities::delete_blog_post(id, &state.db_pool).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

async fn publish_blog_post(
    Extension(state): Extension<AppState>,
    Path(id): Path<BlogPostId>,
) -> Result<Json<BlogPost>, ApiError> {
    let post = BlogPost::publish(id, &state.db_pool)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(blog_post_id = %id, published_at = ?post.published_at, "Published blog post");
    Ok(Json(post))
}

async fn unpublish_blog_post(
    Extension(state): Extension<AppState>,
    Path(id): Path<BlogPostId>,
) -> Result<Json<BlogPost>, ApiError> {
    let post = BlogPost::unpublish(id, &state.db_pool)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(blog_post_id = %id, "Unpublished blog post");
    Ok(Json(post))
}
