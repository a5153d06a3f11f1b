use axum::{
    extract::{Extension, Path},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::domains::settings::SiteSetting;
use crate::server::{app::AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct UpsertSettingRequest {
    pub value: serde_json::Value,
}

pub fn router() -> Router {
    Router::new()
        .route("/settings", get(list_settings))
        .route("/settings/:key", get(get_setting).put(upsert_setting))
}

async fn list_settings(Extension(state): Extension<AppState>) -> Result<Json<Vec<SiteSetting>>, ApiError> {
    Ok(Json(SiteSetting::find_all(&state.db_pool).await?))
}

async fn get_setting(
    Extension(state): Extension<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SiteSetting>, ApiError> {
    SiteSetting::get(&key, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("setting '{key}' not found")))
}

async fn upsert_setting(
    Extension(state): Extension<AppState>,
    Path(key): Path<String>,
    Json(request): Json<UpsertSettingRequest>,
) -> Result<Json<SiteSetting>, ApiError> {
    if key.trim().is_empty() {
        return Err(ApiError::BadRequest("setting key must not be empty".into()));
    }

    let setting = SiteSetting::upsert(&key, request.value, &state.db_pool).await?;
    tracing::info!(key = %setting.key, "Updated site setting");
    Ok(Json(setting))
}
