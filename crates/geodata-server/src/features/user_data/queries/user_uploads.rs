//! Per-upload latest-timestamp summary for one user
//!
//! Groups a user's readings by `upload_id` and reports the maximum stored
//! timestamp of each group. The aggregation runs in SQL; equal timestamps
//! share one maximum, so the result does not depend on insertion order.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::validation::format_timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUploadsQuery {
    pub project_id: i32,
    pub user_id: i64,
}

/// One upload batch with the latest timestamp among its readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSummary {
    pub upload_id: String,
    pub latest_timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UserUploadsError {
    #[error("No data found")]
    NoData,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    upload_id: String,
    latest_timestamp: NaiveDateTime,
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: UserUploadsQuery,
) -> Result<Vec<UploadSummary>, UserUploadsError> {
    let rows = sqlx::query_as::<_, SummaryRow>(
        r#"
        SELECT upload_id, MAX("timestamp") AS latest_timestamp
        FROM user_data
        WHERE project_id = $1 AND user_id = $2
        GROUP BY upload_id
        "#,
    )
    .bind(query.project_id)
    .bind(query.user_id)
    .fetch_all(&pool)
    .await?;

    if rows.is_empty() {
        return Err(UserUploadsError::NoData);
    }

    tracing::debug!(uploads = rows.len(), "Upload summary retrieved");

    Ok(rows
        .into_iter()
        .map(|row| UploadSummary {
            upload_id: row.upload_id,
            latest_timestamp: format_timestamp(&row.latest_timestamp),
        })
        .collect())
}
