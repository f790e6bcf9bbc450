//! Create account command (admin-only)

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{password, store};
use crate::db::is_unique_violation;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserCommand {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub disabled: bool,
    pub is_admin: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateUserError {
    #[error("Username already registered")]
    DuplicateUsername,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Password hashing failed")]
    Hash,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: CreateUserCommand,
) -> Result<CreateUserResponse, CreateUserError> {
    let hashed_password =
        password::hash_password(&command.password).map_err(|_| CreateUserError::Hash)?;

    let account = store::insert(
        &pool,
        &command.username,
        &command.email,
        Some(&command.full_name),
        &hashed_password,
        command.is_admin,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e, Some("accounts_username_key")) {
            CreateUserError::DuplicateUsername
        } else if is_unique_violation(&e, Some("accounts_email_key")) {
            CreateUserError::DuplicateEmail
        } else {
            CreateUserError::Database(e)
        }
    })?;

    tracing::info!(account_id = account.id, "Account created");

    Ok(CreateUserResponse {
        id: account.id,
        username: account.username,
        email: account.email,
        full_name: account.full_name,
        disabled: account.disabled,
        is_admin: account.is_admin,
    })
}
