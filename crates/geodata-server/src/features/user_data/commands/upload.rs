//! Upload batch command
//!
//! Accepts a batch of geolocation readings for one (project, user,
//! upload_id) triple and persists one row per reading. The collector user
//! row is created on first contact, and the whole batch runs inside a single
//! transaction: a failure anywhere leaves no partial data behind.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::is_foreign_key_violation;
use crate::features::shared::validation::parse_timestamp;

/// One reading as submitted by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingEntry {
    pub longitude: f64,
    pub latitude: f64,
    pub timestamp: String,
}

/// Wire format of the `user_data` form field: a JSON document holding the
/// batch entries.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchPayload {
    pub entries: Vec<ReadingEntry>,
}

/// Command to ingest one upload batch
#[derive(Debug, Clone)]
pub struct UploadBatchCommand {
    pub project_id: i32,
    pub user_id: i64,
    pub upload_id: String,
    pub entries: Vec<ReadingEntry>,
}

/// Response from a successful batch upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadBatchResponse {
    pub message: String,
    pub project_id: i32,
    pub user_id: i64,
    pub upload_id: String,
    pub entries_stored: usize,
}

/// Errors that can occur when ingesting a batch
#[derive(Debug, thiserror::Error)]
pub enum UploadBatchError {
    #[error("Invalid JSON in user_data")]
    InvalidJson(#[source] serde_json::Error),

    #[error("user_data must contain at least one entry")]
    EmptyBatch,

    #[error("Invalid timestamp '{value}' in entry {index}")]
    InvalidTimestamp { index: usize, value: String },

    #[error("Project does not exist")]
    ProjectMissing,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UploadBatchCommand {
    /// Build a command from the raw form fields, parsing the JSON document
    /// carried in `user_data`.
    pub fn from_form(
        project_id: i32,
        user_id: i64,
        upload_id: String,
        user_data: &str,
    ) -> Result<Self, UploadBatchError> {
        let payload: BatchPayload =
            serde_json::from_str(user_data).map_err(UploadBatchError::InvalidJson)?;

        if payload.entries.is_empty() {
            return Err(UploadBatchError::EmptyBatch);
        }

        Ok(Self {
            project_id,
            user_id,
            upload_id,
            entries: payload.entries,
        })
    }

    /// Parse every entry timestamp, reporting the first offender by index.
    fn parsed_timestamps(&self) -> Result<Vec<NaiveDateTime>, UploadBatchError> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                parse_timestamp(&entry.timestamp).map_err(|e| UploadBatchError::InvalidTimestamp {
                    index,
                    value: e.value,
                })
            })
            .collect()
    }
}

/// Handler function for batch ingestion
///
/// Ensures the collector user exists (explicit upsert), then inserts one row
/// per reading with a fresh `data_id`. A foreign-key violation on the
/// project id surfaces as a client error.
#[tracing::instrument(
    skip(pool, command),
    fields(
        project_id = command.project_id,
        user_id = command.user_id,
        upload_id = %command.upload_id,
        entries = command.entries.len()
    )
)]
pub async fn handle(
    pool: PgPool,
    command: UploadBatchCommand,
) -> Result<UploadBatchResponse, UploadBatchError> {
    let timestamps = command.parsed_timestamps()?;

    let mut tx = pool.begin().await?;

    let vivified = sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
        .bind(command.user_id)
        .execute(&mut *tx)
        .await?;
    if vivified.rows_affected() > 0 {
        tracing::info!(user_id = command.user_id, "Created new collector user");
    }

    for (entry, timestamp) in command.entries.iter().zip(timestamps) {
        let data_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO user_data
                (data_id, user_id, project_id, longitude, latitude, "timestamp", upload_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(data_id)
        .bind(command.user_id)
        .bind(command.project_id)
        .bind(entry.longitude)
        .bind(entry.latitude)
        .bind(timestamp)
        .bind(&command.upload_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                UploadBatchError::ProjectMissing
            } else {
                UploadBatchError::Database(e)
            }
        })?;
    }

    tx.commit().await?;

    let entries_stored = command.entries.len();
    tracing::info!(entries_stored, "User data uploaded");

    Ok(UploadBatchResponse {
        message: format!(
            "User data uploaded successfully for project {}, user {}, upload_id {}",
            command.project_id, command.user_id, command.upload_id
        ),
        project_id: command.project_id,
        user_id: command.user_id,
        upload_id: command.upload_id,
        entries_stored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = r#"{"entries": [
        {"longitude": 12.34, "latitude": 56.78, "timestamp": "2024-01-01T10:00:00"},
        {"longitude": 12.35, "latitude": 56.79, "timestamp": "2024-01-01T11:00:00"}
    ]}"#;

    #[test]
    fn test_from_form_parses_entries() {
        let cmd = UploadBatchCommand::from_form(100001, 7, "batchA".to_string(), BATCH).unwrap();
        assert_eq!(cmd.entries.len(), 2);
        assert_eq!(cmd.entries[0].longitude, 12.34);
        assert_eq!(cmd.entries[1].latitude, 56.79);
    }

    #[test]
    fn test_from_form_rejects_invalid_json() {
        let result = UploadBatchCommand::from_form(100001, 7, "batchA".to_string(), "{not json");
        assert!(matches!(result, Err(UploadBatchError::InvalidJson(_))));
    }

    #[test]
    fn test_from_form_rejects_missing_entries_key() {
        let result = UploadBatchCommand::from_form(100001, 7, "batchA".to_string(), "{}");
        assert!(matches!(result, Err(UploadBatchError::InvalidJson(_))));
    }

    #[test]
    fn test_from_form_rejects_empty_batch() {
        let result =
            UploadBatchCommand::from_form(100001, 7, "batchA".to_string(), r#"{"entries": []}"#);
        assert!(matches!(result, Err(UploadBatchError::EmptyBatch)));
    }

    #[test]
    fn test_timestamps_parsed_in_order() {
        let cmd = UploadBatchCommand::from_form(100001, 7, "batchA".to_string(), BATCH).unwrap();
        let parsed = cmd.parsed_timestamps().unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0] < parsed[1]);
    }

    #[test]
    fn test_bad_timestamp_reports_offending_entry() {
        let cmd = UploadBatchCommand::from_form(
            100001,
            7,
            "batchA".to_string(),
            r#"{"entries": [
                {"longitude": 1.0, "latitude": 2.0, "timestamp": "2024-01-01T10:00:00"},
                {"longitude": 3.0, "latitude": 4.0, "timestamp": "not-a-time"}
            ]}"#,
        )
        .unwrap();

        match cmd.parsed_timestamps() {
            Err(UploadBatchError::InvalidTimestamp { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, "not-a-time");
            },
            other => panic!("expected InvalidTimestamp, got {:?}", other.map(|_| ())),
        }
    }
}
