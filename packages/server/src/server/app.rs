//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::associations::{AssociationSynchronizer, PgAssociationStore};
use crate::domains::content::ContentKind;
use crate::domains::departments::{ContentResolver, DepartmentCatalog, PgRelatedContent};
use crate::server::routes::{admin, health_handler, service_page_handler};

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub resolver: Arc<ContentResolver>,
    pub synchronizer: Arc<AssociationSynchronizer>,
}

impl AppState {
    /// Wire the Postgres-backed resolver and synchronizer.
    pub fn new(pool: PgPool, catalog: DepartmentCatalog, related_posts_limit: i64) -> Self {
        let related = Arc::new(PgRelatedContent::new(pool.clone()));
        let store = Arc::new(PgAssociationStore::new(pool.clone()));

        Self {
            resolver: Arc::new(ContentResolver::new(catalog, related, related_posts_limit)),
            synchronizer: Arc::new(AssociationSynchronizer::new(store)),
            db_pool: pool,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let admin = Router::new()
        .nest(
            "/blog-posts",
            admin::blog_posts::router().layer(Extension(ContentKind::BlogPost)),
        )
        .nest(
            "/videos",
            admin::videos::router().layer(Extension(ContentKind::Video)),
        )
        .merge(admin::taxonomy::router())
        .merge(admin::settings::router());

    Router::new()
        .route("/health", get(health_handler))
        // Public department pages
        .route("/services/:slug", get(service_page_handler))
        .nest("/admin", admin)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
