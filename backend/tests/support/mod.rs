//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! small helpers live here instead of being copied between suites.

pub mod cluster_skip;
pub mod pg_embed;

pub use cluster_skip::handle_cluster_setup_failure;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;
use wishlist_backend::outbound::persistence::run_migrations;

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// `postgres::Error` often displays as a bare `db error`; the database error
/// carries the message and SQLSTATE.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}

/// Create a fresh, fully migrated database on `cluster` and return its URL.
///
/// Must be called outside a Tokio runtime: the `postgres` client blocks.
pub fn provision_database(cluster: &TestCluster) -> Result<String, String> {
    let connection = cluster.connection();
    let name = format!("wishlist_test_{}", Uuid::new_v4().simple());

    let mut admin = Client::connect(&connection.database_url("postgres"), NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = connection.database_url(&name);
    run_migrations(&url).map_err(|err| err.to_string())?;
    Ok(url)
}
