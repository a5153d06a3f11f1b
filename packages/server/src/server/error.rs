//! JSON error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domains::associations::SyncError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("storage error: {0}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        let unique_violation = err
            .downcast_ref::<sqlx::Error>()
            .and_then(|e| e.as_database_error())
            .is_some_and(|e| e.is_unique_violation());

        if unique_violation {
            ApiError::Conflict("a record with this slug already exists".to_string())
        } else {
            ApiError::Storage(err)
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Sync(SyncError::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Sync(SyncError::ContentNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Sync(SyncError::Storage(_) | SyncError::PartialSync { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn retryable(&self) -> bool {
        match self {
            ApiError::Sync(err) => err.is_retryable(),
            ApiError::Storage(_) => true,
            _ => false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut body = json!({
            "error": self.to_string(),
            "retryable": self.retryable(),
        });
        match &self {
            ApiError::Sync(SyncError::Validation { kind, unknown_ids }) => {
                body["taxonomy_kind"] = json!(kind.as_str());
                body["unknown_ids"] = json!(unknown_ids);
            }
            ApiError::Sync(SyncError::PartialSync { missing, .. }) => {
                body["missing_ids"] = json!(missing);
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}
