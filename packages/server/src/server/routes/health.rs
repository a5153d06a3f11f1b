use std::time::{Duration, Instant};

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

const DB_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseHealth,
    connection_pool: ConnectionPoolHealth,
    department_pages: usize,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    ok: bool,
    latency_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct ConnectionPoolHealth {
    size: u32,
    idle_connections: usize,
    max_connections: u32,
}

/// Health check endpoint
///
/// Pings the database (bounded by a timeout) and reports pool usage and the
/// number of department pages the loaded catalog serves. 503 when the
/// database is unreachable.
pub async fn health_handler(Extension(state): Extension<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let ping = tokio::time::timeout(DB_PING_TIMEOUT, sqlx::query("SELECT 1").execute(&state.db_pool)).await;

    let error = match ping {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(format!("query failed: {e}")),
        Err(_) => Some(format!("query timed out after {}s", DB_PING_TIMEOUT.as_secs())),
    };
    let database = DatabaseHealth {
        ok: error.is_none(),
        latency_ms: started.elapsed().as_millis(),
        error,
    };

    let connection_pool = ConnectionPoolHealth {
        size: state.db_pool.size(),
        idle_connections: state.db_pool.num_idle(),
        max_connections: state.db_pool.options().get_max_connections(),
    };

    let (status_code, status) = if database.ok {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            database,
            connection_pool,
            department_pages: state.resolver.page_count(),
        }),
    )
}
