//! Per-user latest-timestamp summary for one project

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::validation::format_timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectUsersQuery {
    pub project_id: i32,
}

/// One user with the latest timestamp among their readings in the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: i64,
    pub latest_timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectUsersError {
    #[error("Project not found")]
    NoData,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    user_id: i64,
    latest_timestamp: NaiveDateTime,
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ProjectUsersQuery,
) -> Result<Vec<UserSummary>, ProjectUsersError> {
    let rows = sqlx::query_as::<_, SummaryRow>(
        r#"
        SELECT user_id, MAX("timestamp") AS latest_timestamp
        FROM user_data
        WHERE project_id = $1
        GROUP BY user_id
        "#,
    )
    .bind(query.project_id)
    .fetch_all(&pool)
    .await?;

    if rows.is_empty() {
        return Err(ProjectUsersError::NoData);
    }

    tracing::debug!(users = rows.len(), "Project data summary retrieved");

    Ok(rows
        .into_iter()
        .map(|row| UserSummary {
            user_id: row.user_id,
            latest_timestamp: format_timestamp(&row.latest_timestamp),
        })
        .collect())
}
