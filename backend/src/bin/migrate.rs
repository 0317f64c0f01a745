use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::env;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .context("DATABASE_URL environment variable is required")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("up");

    match command {
        "up" => {
            info!("Running database migrations...");
            run_migrations(&pool).await?;
            info!("Database migrations completed successfully");
        }
        "status" => {
            show_migration_status(&pool).await?;
        }
        "reset" => {
            warn!("Resetting database - this will drop all data!");
            reset_database(&pool).await?;
            info!("Database reset completed");
        }
        "seed" => {
            info!("Loading sample data...");
            run_migrations(&pool).await?;
            seed_sample_data(&pool).await?;
            info!("Sample data loaded");
        }
        _ => {
            eprintln!("Usage: migrate [up|status|reset|seed]");
            eprintln!("  up      - Run all pending migrations (default)");
            eprintln!("  status  - Show applied migrations");
            eprintln!("  reset   - Drop all tables and reset database");
            eprintln!("  seed    - Apply migrations and load sample data");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    Ok(())
}

async fn show_migration_status(pool: &PgPool) -> Result<()> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = '_sqlx_migrations'
        )
        "#,
    )
    .fetch_one(pool)
    .await
    .context("Failed to check migrations table")?;

    if !table_exists {
        info!("No migrations have been run yet");
        return Ok(());
    }

    let rows = sqlx::query(
        "SELECT version, description, installed_on FROM _sqlx_migrations ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .context("Failed to fetch migration status")?;

    if rows.is_empty() {
        info!("No migrations have been applied");
    } else {
        info!("Applied migrations:");
        for row in rows {
            let version: i64 = row.get("version");
            let description: String = row.get("description");
            let installed_on: chrono::DateTime<chrono::Utc> = row.get("installed_on");
            info!(
                "  {} {} (applied at: {})",
                version,
                description,
                installed_on.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
    }

    Ok(())
}

async fn reset_database(pool: &PgPool) -> Result<()> {
    for statement in [
        "DROP TABLE IF EXISTS order_items CASCADE",
        "DROP TABLE IF EXISTS orders CASCADE",
        "DROP TABLE IF EXISTS products CASCADE",
        "DROP TABLE IF EXISTS users CASCADE",
        "DROP TYPE IF EXISTS order_status",
        "DROP TABLE IF EXISTS _sqlx_migrations",
    ] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to execute: {}", statement))?;
    }

    Ok(())
}

/// Deterministic sample rows for local development. Safe to run twice:
/// existing usernames/products are left untouched.
async fn seed_sample_data(pool: &PgPool) -> Result<()> {
    let password_hash =
        bcrypt::hash("changeme-sample", bcrypt::DEFAULT_COST).context("Failed to hash password")?;

    for (username, email) in [
        ("alice", "alice@example.com"),
        ("bob", "bob@example.com"),
        ("carol", "carol@example.com"),
    ] {
        sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to seed user {}", username))?;
    }

    for (name, description, price, category, stock) in [
        ("Widget", "A standard widget", "9.99", "gadgets", 25),
        ("Gizmo", "A deluxe gizmo", "24.50", "gadgets", 10),
        ("Doohickey", "Limited edition", "149.00", "collectibles", 3),
        ("Thingamajig", "Everyday essential", "4.25", "household", 100),
    ] {
        sqlx::query(
            r#"
            INSERT INTO products (name, description, price, category, stock_quantity)
            SELECT $1, $2, $3::numeric, $4, $5
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1)
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(stock)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to seed product {}", name))?;
    }

    Ok(())
}
