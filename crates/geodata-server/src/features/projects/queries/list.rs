//! List projects query

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectSummary {
    pub id: i32,
    pub project_name: String,
    pub project_description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ListProjectsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Returns all projects in insertion order.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<Vec<ProjectSummary>, ListProjectsError> {
    let projects = sqlx::query_as::<_, ProjectSummary>(
        r#"
        SELECT id, project_name, project_description
        FROM projects
        ORDER BY created_at
        "#,
    )
    .fetch_all(&pool)
    .await?;

    tracing::debug!(count = projects.len(), "Projects listed");
    Ok(projects)
}
