//! Operator CLI: schema migrations, taxonomy seeding and resolver previews.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hospital_core::config::Config;
use hospital_core::domains::departments::{DepartmentCatalog, Resolution};
use hospital_core::domains::taxonomy::Department;
use hospital_core::server::AppState;
use serde::Serialize;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "hospital-admin")]
#[command(about = "Admin tasks for the hospital website backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Create a department row for every department in the catalog
    SeedTaxonomy,

    /// Print the render plan for a department page slug
    Resolve { slug: String },
}

#[derive(Serialize)]
struct SeededDepartment {
    slug: String,
    name: String,
    id: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Migrate => cmd_migrate(&config).await,
        Commands::SeedTaxonomy => cmd_seed_taxonomy(&config).await,
        Commands::Resolve { slug } => cmd_resolve(&config, &slug).await,
    }
}

async fn get_pool(config: &Config) -> Result<PgPool> {
    PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

fn load_catalog(config: &Config) -> Result<DepartmentCatalog> {
    DepartmentCatalog::load(config.department_catalog_path.as_deref()).context("Failed to load department catalog")
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_migrate(config: &Config) -> Result<()> {
    let pool = get_pool(config).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    eprintln!("Migrations complete");
    Ok(())
}

async fn cmd_seed_taxonomy(config: &Config) -> Result<()> {
    let catalog = load_catalog(config)?;
    let pool = get_pool(config).await?;

    let mut seeded = Vec::new();
    for (slug, name) in catalog.department_names() {
        let department = Department::find_or_create(&name, &slug, &pool)
            .await
            .with_context(|| format!("Failed to seed department '{slug}'"))?;
        seeded.push(SeededDepartment {
            slug: department.slug,
            name: department.name,
            id: department.id.to_string(),
        });
    }

    println!("{}", serde_json::to_string_pretty(&seeded)?);
    Ok(())
}

async fn cmd_resolve(config: &Config, slug: &str) -> Result<()> {
    let catalog = load_catalog(config)?;
    let pool = get_pool(config).await?;
    let state = AppState::new(pool, catalog, config.related_posts_limit);

    match state.resolver.resolve(slug).await {
        Resolution::Render(plan) => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
            Ok(())
        }
        Resolution::NotFound => anyhow::bail!("No department page for '{slug}'"),
    }
}
