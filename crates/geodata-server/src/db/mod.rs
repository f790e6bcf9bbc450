//! Database pool construction and shared error helpers

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Database operation errors with contextual information
#[derive(Error, Debug)]
pub enum DbError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Record already exists (unique constraint violation)
    #[error("{0}")]
    Duplicate(String),
}

impl DbError {
    /// Create a not found error with resource context
    pub fn not_found(resource_type: &str, identifier: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} '{}' not found", resource_type, identifier))
    }

    /// Create a duplicate error with resource context
    pub fn duplicate(resource_type: &str, identifier: impl std::fmt::Display) -> Self {
        Self::Duplicate(format!("{} '{}' already exists", resource_type, identifier))
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Build a PostgreSQL connection pool from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Cheap connectivity probe used by the health endpoint.
pub async fn health_check(pool: &PgPool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::from)
}

/// True when the error is a Postgres unique-constraint violation,
/// optionally restricted to a named constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: Option<&str>) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.is_unique_violation() {
            return match constraint {
                Some(name) => db_err.constraint() == Some(name),
                None => true,
            };
        }
    }
    false
}

/// True when the error is a Postgres foreign-key violation.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Project", 123456);
        assert_eq!(err.to_string(), "Project '123456' not found");
    }

    #[test]
    fn test_duplicate_message() {
        let err = DbError::duplicate("Account", "alice");
        assert_eq!(err.to_string(), "Account 'alice' already exists");
    }

    #[test]
    fn test_violation_helpers_ignore_non_database_errors() {
        let err = sqlx::Error::RowNotFound;
        assert!(!is_unique_violation(&err, None));
        assert!(!is_foreign_key_violation(&err));
    }
}
