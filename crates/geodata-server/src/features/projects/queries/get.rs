//! Get project query

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProjectQuery {
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GetProjectResponse {
    pub id: i32,
    pub project_name: String,
    pub project_description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetProjectError {
    #[error("Invalid project ID")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetProjectQuery,
) -> Result<GetProjectResponse, GetProjectError> {
    let project = sqlx::query_as::<_, GetProjectResponse>(
        r#"
        SELECT id, project_name, project_description
        FROM projects
        WHERE id = $1
        "#,
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetProjectError::NotFound)?;

    tracing::debug!(project_id = project.id, "Project retrieved");
    Ok(project)
}
