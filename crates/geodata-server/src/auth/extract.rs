//! Request extractors for authenticated routes.
//!
//! `CurrentAccount` resolves the bearer token to an account; `AdminAccount`
//! additionally requires the admin flag. Both reject with the standard
//! error envelope (401 responses carry a `WWW-Authenticate: Bearer`
//! challenge).

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use sqlx::PgPool;

use super::{jwt::JwtManager, store, store::Account};
use crate::api::response::AppError;

/// The account behind a valid access token.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

/// The account behind a valid access token, verified to be an admin.
#[derive(Debug, Clone)]
pub struct AdminAccount(pub Account);

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))
}

async fn resolve_account<S>(parts: &mut Parts, state: &S) -> Result<Account, AppError>
where
    S: Send + Sync,
    PgPool: FromRef<S>,
    JwtManager: FromRef<S>,
{
    let token = bearer_token(parts)?;
    let jwt = JwtManager::from_ref(state);

    let claims = jwt
        .validate(token)
        .map_err(|_| AppError::Unauthorized("Could not validate credentials".to_string()))?;
    if !claims.is_access() {
        return Err(AppError::Unauthorized(
            "Could not validate credentials".to_string(),
        ));
    }

    let pool = PgPool::from_ref(state);
    let account = store::find_by_username(&pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".to_string()))?;

    if account.disabled {
        return Err(AppError::Unauthorized("Inactive user".to_string()));
    }

    Ok(account)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
    PgPool: FromRef<S>,
    JwtManager: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        resolve_account(parts, state).await.map(CurrentAccount)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminAccount
where
    S: Send + Sync,
    PgPool: FromRef<S>,
    JwtManager: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let account = resolve_account(parts, state).await?;
        if !account.is_admin {
            return Err(AppError::Forbidden(
                "Admin privileges required".to_string(),
            ));
        }
        Ok(AdminAccount(account))
    }
}
