use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::domains::departments::{RenderPlan, Resolution};
use crate::server::{app::AppState, error::ApiError};

/// Public department page: `/services/:slug`.
///
/// Returns the render plan the site template consumes, or 404.
pub async fn service_page_handler(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<RenderPlan>, ApiError> {
    match state.resolver.resolve(&slug).await {
        Resolution::Render(plan) => Ok(Json(plan)),
        Resolution::NotFound => Err(ApiError::NotFound(format!("no department page for '{slug}'"))),
    }
}
