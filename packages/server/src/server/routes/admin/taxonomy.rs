use axum::{extract::Extension, http::StatusCode, routing::get, Json, Router};

use super::{require_non_blank, require_slug};
use crate::domains::taxonomy::{Department, NewDepartment, NewTreatment, Treatment};
use crate::server::{app::AppState, error::ApiError};

pub fn router() -> Router {
    Router::new()
        .route("/departments", get(list_departments).post(create_department))
        .route("/treatments", get(list_treatments).post(create_treatment))
}

async fn list_departments(Extension(state): Extension<AppState>) -> Result<Json<Vec<Department>>, ApiError> {
    Ok(Json(Department::find_all(&state.db_pool).await?))
}

async fn create_department(
    Extension(state): Extension<AppState>,
    Json(input): Json<NewDepartment>,
) -> Result<(StatusCode, Json<Department>), ApiError> {
    require_non_blank("name", &input.name)?;
    require_slug(&input.slug)?;

    let department = Department::create(input, &state.db_pool).await?;
    tracing::info!(department_id = %department.id, slug = %department.slug, "Created department");
    Ok((StatusCode::CREATED, Json(department)))
}

async fn list_treatments(Extension(state): Extension<AppState>) -> Result<Json<Vec<Treatment>>, ApiError> {
    Ok(Json(Treatment::find_all(&state.db_pool).await?))
}

async fn create_treatment(
    Extension(state): Extension<AppState>,
    Json(input): Json<NewTreatment>,
) -> Result<(StatusCode, Json<Treatment>), ApiError> {
    require_non_blank("name", &input.name)?;
    require_slug(&input.slug)?;

    if let Some(department_id) = input.department_id {
        if Department::find_by_id(department_id, &state.db_pool).await?.is_none() {
            return Err(ApiError::BadRequest(format!("department {department_id} does not exist")));
        }
    }

    let treatment = Treatment::create(input, &state.db_pool).await?;
    tracing::info!(treatment_id = %treatment.id, slug = %treatment.slug, "Created treatment");
    Ok((StatusCode::CREATED, Json(treatment)))
}
