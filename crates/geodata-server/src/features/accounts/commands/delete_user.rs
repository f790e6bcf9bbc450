//! Delete account command (admin-only)

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::store;

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserCommand {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteUserError {
    #[error("User not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool), fields(username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: DeleteUserCommand,
) -> Result<DeleteUserResponse, DeleteUserError> {
    let removed = store::delete_by_username(&pool, &command.username).await?;
    if removed == 0 {
        return Err(DeleteUserError::NotFound);
    }

    tracing::info!("Account deleted");

    Ok(DeleteUserResponse {
        message: format!("User {} deleted successfully", command.username),
    })
}
