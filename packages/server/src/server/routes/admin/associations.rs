//! Department/treatment links for a content item.
//!
//! Mounted under each content router; the content kind comes from the
//! router's `Extension<ContentKind>` layer.

use std::collections::BTreeSet;

use axum::{
    extract::{Extension, Path},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::associations::SyncOutcome;
use crate::domains::content::{ContentKind, ContentRef};
use crate::domains::taxonomy::TaxonomyKind;
use crate::server::{app::AppState, error::ApiError};

/// Submitted checkbox state: the complete desired set of node ids.
#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AssociationsResponse {
    pub content: ContentRef,
    pub taxonomy_kind: TaxonomyKind,
    pub ids: BTreeSet<Uuid>,
}

pub fn routes() -> Router {
    Router::new()
        .route("/:id/departments", get(list_departments).put(sync_departments))
        .route("/:id/treatments", get(list_treatments).put(sync_treatments))
}

async fn read_set(
    state: &AppState,
    content: ContentRef,
    taxonomy_kind: TaxonomyKind,
) -> Result<Json<AssociationsResponse>, ApiError> {
    let ids = state.synchronizer.associations(content, taxonomy_kind).await?;
    Ok(Json(AssociationsResponse {
        content,
        taxonomy_kind,
        ids,
    }))
}

async fn sync_set(
    state: &AppState,
    content: ContentRef,
    taxonomy_kind: TaxonomyKind,
    request: SyncRequest,
) -> Result<Json<SyncOutcome>, ApiError> {
    let outcome = state
        .synchronizer
        .sync(content, taxonomy_kind, request.ids)
        .await?;
    Ok(Json(outcome))
}

async fn list_departments(
    Extension(state): Extension<AppState>,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssociationsResponse>, ApiError> {
    read_set(&state, ContentRef::new(kind, id), TaxonomyKind::Department).await
}

async fn sync_departments(
    Extension(state): Extension<AppState>,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<Uuid>,
    Json(request): Json<SyncRequest>,
) -> Result<Json<SyncOutcome>, ApiError> {
    sync_set(&state, ContentRef::new(kind, id), TaxonomyKind::Department, request).await
}

async fn list_treatments(
    Extension(state): Extension<AppState>,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssociationsResponse>, ApiError> {
    read_set(&state, ContentRef::new(kind, id), TaxonomyKind::Treatment).await
}

async fn sync_treatments(
    Extension(state): Extension<AppState>,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<Uuid>,
    Json(request): Json<SyncRequest>,
) -> Result<Json<SyncOutcome>, ApiError> {
    sync_set(&state, ContentRef::new(kind, id), TaxonomyKind::Treatment, request).await
}
