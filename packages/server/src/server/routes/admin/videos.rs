use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::{associations, require_non_blank, require_slug};
use crate::common::VideoId;
use crate::domains::content::activities;
use crate::domains::content::{NewVideo, Video, VideoChanges};
use crate::server::{app::AppState, error::ApiError};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_videos).post(create_video))
        .route("/:id", get(get_video).put(update_video).delete(delete_video))
        .route("/:id/publish", post(publish_video))
        .route("/:id/unpublish", post(unpublish_video))
        .merge(associations::routes())
}

fn not_found(id: VideoId) -> ApiError {
    ApiError::NotFound(format!("video {id} not found"))
}

async fn list_videos(Extension(state): Extension<AppState>) -> Result<Json<Vec<Video>>, ApiError> {
    Ok(Json(Video::find_all(&state.db_pool).await?))
}

async fn create_video(
    Extension(state): Extension<AppState>,
    Json(input): Json<NewVideo>,
) -> Result<(StatusCode, Json<Video>), ApiError> {
    require_non_blank("title", &input.title)?;
    require_slug(&input.slug)?;
    require_non_blank("video_url", &input.video_url)?;

    let video = Video::create(input, &state.db_pool).await?;
    tracing::info!(video_id = %video.id, slug = %video.slug, "Created video");
    Ok((StatusCode::CREATED, Json(video)))
}

async fn get_video(
    Extension(state): Extension<AppState>,
    Path(id): Path<VideoId>,
) -> Result<Json<Video>, ApiError> {
    Video::find_by_id(id, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

async fn update_video(
    Extension(state): Extension<AppState>,
    Path(id): Path<VideoId>,
    Json(changes): Json<VideoChanges>,
) -> Result<Json<Video>, ApiError> {
    if let Some(title) = &changes.title {
        require_non_blank("title", title)?;
    }
    if let Some(slug) = &changes.slug {
        require_slug(slug)?;
    }

    Video::update(id, changes, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

async fn delete_video(
    Extension(state): Extension<AppState>,
    Path(id): Path<VideoId>,
) -> Result<StatusCode, ApiError> {
    if activities::delete_video(id, &state.db_pool).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

async fn publish_video(
    Extension(state): Extension<AppState>,
    Path(id): Path<VideoId>,
) -> Result<Json<Video>, ApiError> {
    let video = Video::publish(id, &state.db_pool)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(video_id = %id, "Published video");
    Ok(Json(video))
}

async fn unpublish_video(
    Extension(state): Extension<AppState>,
    Path(id): Path<VideoId>,
) -> Result<Json<Video>, ApiError> {
    let video = Video::unpublish(id, &state.db_pool)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(video_id = %id, "Unpublished video");
    Ok(Json(video))
}
