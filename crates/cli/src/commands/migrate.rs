//! Database migration command.
//!
//! Migrations are embedded from `crates/backoffice/migrations/` at build time.
//!
//! # Environment Variables
//!
//! - `BACKOFFICE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

use super::{CliError, connect};

/// Run all pending back-office migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running back-office migrations...");
    sqlx::migrate!("../backoffice/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
