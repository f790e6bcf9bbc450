//! Raw rows for one upload batch

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUploadQuery {
    pub project_id: i32,
    pub user_id: i64,
    pub upload_id: String,
}

/// One stored reading, as persisted.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReadingRecord {
    pub data_id: Uuid,
    pub user_id: i64,
    pub project_id: i32,
    pub longitude: f64,
    pub latitude: f64,
    pub timestamp: NaiveDateTime,
    pub upload_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetUploadError {
    #[error("No data found")]
    NoData,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Exact-match fetch on (project, user, upload).
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetUploadQuery,
) -> Result<Vec<ReadingRecord>, GetUploadError> {
    let rows = sqlx::query_as::<_, ReadingRecord>(
        r#"
        SELECT data_id, user_id, project_id, longitude, latitude, "timestamp", upload_id
        FROM user_data
        WHERE project_id = $1 AND user_id = $2 AND upload_id = $3
        "#,
    )
    .bind(query.project_id)
    .bind(query.user_id)
    .bind(&query.upload_id)
    .fetch_all(&pool)
    .await?;

    if rows.is_empty() {
        return Err(GetUploadError::NoData);
    }

    tracing::debug!(rows = rows.len(), "Upload data retrieved");
    Ok(rows)
}
