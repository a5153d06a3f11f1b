//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container per test binary, started and migrated on the first
//! test and reused after that. Tests share the database, so fixtures use
//! unique slugs.

use anyhow::{Context, Result};
use axum::Router;
use hospital_core::domains::departments::DepartmentCatalog;
use hospital_core::server::{build_app, AppState};
use hospital_core::MAX_RELATED_POSTS;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use super::ApiClient;

/// Shared test infrastructure that persists across all tests in a binary.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", pg_host, pg_port);

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Per-test context: a fresh pool on the shared database.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let state = ctx.state();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self { db_pool })
    }

    /// Application state over the embedded catalog, three related posts per page.
    pub fn state(&self) -> AppState {
        let catalog = DepartmentCatalog::embedded().expect("embedded catalog is valid");
        AppState::new(self.db_pool.clone(), catalog, MAX_RELATED_POSTS)
    }

    /// Full HTTP router for `oneshot` requests.
    pub fn app(&self) -> Router {
        build_app(self.state(), &[])
    }

    pub fn api(&self) -> ApiClient {
        ApiClient::new(self.app())
    }
}
