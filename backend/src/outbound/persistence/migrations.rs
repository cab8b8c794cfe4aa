//! Embedded Diesel migrations.
//!
//! Migrations are compiled into the binary from `backend/migrations` and
//! applied over a short-lived synchronous connection, so callers on an async
//! runtime should run this before building the pool or on a blocking thread.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations embedded from the `migrations` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply every pending migration to `database_url`.
///
/// Returns the versions that were applied; an up-to-date database yields an
/// empty list.
///
/// # Errors
///
/// Returns [`MigrationError::Connection`] when the database is unreachable
/// and [`MigrationError::Apply`] when a migration fails.
pub fn run_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| {
        MigrationError::Connection {
            message: err.to_string(),
        }
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();
    info!(count = applied.len(), "database migrations applied");
    Ok(applied)
}
