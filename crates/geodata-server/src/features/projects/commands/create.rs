//! Create project command
//!
//! Validates the supplied fields, mints a unique 6-digit identifier and
//! inserts the project. Identifiers are drawn uniformly from
//! [100000, 999999]; the insert itself is the uniqueness check, so a
//! primary-key collision just means "draw again". The pre-insert existence
//! probe the naive approach would use cannot be made race-free anyway.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::is_unique_violation;
use crate::features::shared::validation::{
    validate_project_description, validate_project_name, ProjectFieldError,
};

/// Lowest mintable project identifier.
pub const PROJECT_ID_MIN: i32 = 100_000;

/// Highest mintable project identifier.
pub const PROJECT_ID_MAX: i32 = 999_999;

/// Collision retries before the command gives up.
const MAX_ID_ATTEMPTS: u32 = 32;

/// Command to create a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectCommand {
    pub project_name: String,
    pub project_description: String,
}

/// Response from creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectResponse {
    pub id: i32,
    pub project_name: String,
    pub project_description: String,
}

/// Errors that can occur when creating a project
#[derive(Debug, thiserror::Error)]
pub enum CreateProjectError {
    #[error("{0}")]
    Validation(#[from] ProjectFieldError),

    #[error("Project with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Could not allocate a unique project id")]
    IdSpaceExhausted,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CreateProjectCommand {
    /// Validates the command parameters
    ///
    /// # Errors
    ///
    /// - Name must be at least 3 characters
    /// - Description must be at least 10 characters
    pub fn validate(&self) -> Result<(), CreateProjectError> {
        validate_project_name(&self.project_name)?;
        validate_project_description(&self.project_description)?;
        Ok(())
    }
}

/// Draw a random 6-digit project id candidate.
fn sample_project_id() -> i32 {
    rand::thread_rng().gen_range(PROJECT_ID_MIN..=PROJECT_ID_MAX)
}

/// Handler function for creating projects
#[tracing::instrument(skip(pool, command), fields(project_name = %command.project_name))]
pub async fn handle(
    pool: PgPool,
    command: CreateProjectCommand,
) -> Result<CreateProjectResponse, CreateProjectError> {
    command.validate()?;

    for attempt in 0..MAX_ID_ATTEMPTS {
        let candidate = sample_project_id();

        let result = sqlx::query_as::<_, ProjectRecord>(
            r#"
            INSERT INTO projects (id, project_name, project_description)
            VALUES ($1, $2, $3)
            RETURNING id, project_name, project_description
            "#,
        )
        .bind(candidate)
        .bind(&command.project_name)
        .bind(&command.project_description)
        .fetch_one(&pool)
        .await;

        match result {
            Ok(record) => {
                tracing::info!(project_id = record.id, "Project created");
                return Ok(CreateProjectResponse {
                    id: record.id,
                    project_name: record.project_name,
                    project_description: record.project_description,
                });
            },
            Err(ref e) if is_unique_violation(e, Some("projects_pkey")) => {
                tracing::debug!(candidate, attempt, "Project id collision, resampling");
            },
            Err(e) if is_unique_violation(&e, Some("projects_project_name_key")) => {
                return Err(CreateProjectError::DuplicateName(
                    command.project_name.clone(),
                ));
            },
            Err(e) => return Err(CreateProjectError::Database(e)),
        }
    }

    tracing::error!(
        attempts = MAX_ID_ATTEMPTS,
        "Exhausted project id candidates"
    );
    Err(CreateProjectError::IdSpaceExhausted)
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRecord {
    id: i32,
    project_name: String,
    project_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_success() {
        let cmd = CreateProjectCommand {
            project_name: "Bird migration".to_string(),
            project_description: "Tracking seasonal bird migration routes".to_string(),
        };
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_validation_short_name() {
        let cmd = CreateProjectCommand {
            project_name: "ab".to_string(),
            project_description: "A perfectly fine description".to_string(),
        };
        assert!(matches!(
            cmd.validate(),
            Err(CreateProjectError::Validation(
                ProjectFieldError::NameTooShort
            ))
        ));
    }

    #[test]
    fn test_validation_short_description() {
        let cmd = CreateProjectCommand {
            project_name: "Survey".to_string(),
            project_description: "short".to_string(),
        };
        assert!(matches!(
            cmd.validate(),
            Err(CreateProjectError::Validation(
                ProjectFieldError::DescriptionTooShort
            ))
        ));
    }

    #[test]
    fn test_sampled_ids_are_six_digits() {
        for _ in 0..10_000 {
            let id = sample_project_id();
            assert!((PROJECT_ID_MIN..=PROJECT_ID_MAX).contains(&id));
        }
    }
}
