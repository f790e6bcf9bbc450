//! Login command
//!
//! Verifies a username/password pair and issues an access + refresh token
//! pair. The refresh token is persisted on the account; each account holds
//! at most one live refresh token, so logging in again invalidates the
//! previously issued one.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{password, store, JwtManager};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// Issued token pair. `refresh_token` is absent on refresh-exchange
/// responses, which only mint a new access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Inactive user")]
    Disabled,

    #[error("Token issuance failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Stored password hash is malformed")]
    CorruptHash,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool, jwt, command), fields(username = %command.username))]
pub async fn handle(
    pool: PgPool,
    jwt: JwtManager,
    command: LoginCommand,
) -> Result<TokenResponse, LoginError> {
    let account = store::find_by_username(&pool, &command.username)
        .await?
        .ok_or(LoginError::InvalidCredentials)?;

    let matches = password::verify_password(&command.password, &account.hashed_password)
        .map_err(|_| LoginError::CorruptHash)?;
    if !matches {
        return Err(LoginError::InvalidCredentials);
    }

    if account.disabled {
        return Err(LoginError::Disabled);
    }

    let access_token = jwt.issue_access_token(&account.username)?;
    let refresh_token = jwt.issue_refresh_token(&account.username)?;

    store::set_refresh_token(&pool, &account.username, &refresh_token).await?;

    tracing::info!(username = %account.username, "User logged in");

    Ok(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        refresh_token: Some(refresh_token),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_omitted_when_absent() {
        let response = TokenResponse {
            access_token: "abc".to_string(),
            token_type: "bearer".to_string(),
            refresh_token: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("refresh_token").is_none());
        assert_eq!(json["token_type"], "bearer");
    }
}
