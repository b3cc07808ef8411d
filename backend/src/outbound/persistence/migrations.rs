//! Embedded schema migrations applied by `init-db`.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures raised while bringing the schema up to date.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to connect to the database: {0}")]
    Connect(#[from] diesel::ConnectionError),
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    #[error("migration task was cancelled: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Apply every pending migration and return the versions that ran.
///
/// Running against an up-to-date schema is a no-op.
pub fn run_pending_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut connection = PgConnection::establish(database_url)?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    let versions: Vec<String> = applied.iter().map(ToString::to_string).collect();
    info!(applied = versions.len(), "database schema is up to date");
    Ok(versions)
}

/// Async wrapper running the blocking migration harness on the blocking pool.
pub async fn initialise_schema(database_url: String) -> Result<Vec<String>, MigrationError> {
    tokio::task::spawn_blocking(move || run_pending_migrations(&database_url)).await?
}
