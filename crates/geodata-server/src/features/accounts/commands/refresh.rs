//! Refresh-token exchange command
//!
//! Exchanges a live refresh token for a new access token. The presented
//! token must validate against the signing key, be of refresh type, and
//! match the token currently stored for the account byte for byte.

use serde::Deserialize;
use sqlx::PgPool;

use super::login::TokenResponse;
use crate::auth::{store, JwtManager};

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshCommand {
    pub refresh_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Token issuance failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool, jwt, command))]
pub async fn handle(
    pool: PgPool,
    jwt: JwtManager,
    command: RefreshCommand,
) -> Result<TokenResponse, RefreshError> {
    let claims = jwt
        .validate(&command.refresh_token)
        .map_err(|_| RefreshError::InvalidToken)?;
    if !claims.is_refresh() {
        return Err(RefreshError::InvalidToken);
    }

    let account = store::find_by_username(&pool, &claims.sub)
        .await?
        .ok_or(RefreshError::InvalidToken)?;

    if account.refresh_token.as_deref() != Some(command.refresh_token.as_str()) {
        return Err(RefreshError::InvalidToken);
    }

    let access_token = jwt.issue_access_token(&account.username)?;

    tracing::info!(username = %account.username, "Access token refreshed");

    Ok(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        refresh_token: None,
    })
}
