//! Token and account-management routes
//!
//! - `POST /token` - login, returns access + refresh token pair
//! - `POST /refresh` - exchange a refresh token for a new access token
//! - `POST /admin/users/` - create an account (admin-only)
//! - `DELETE /admin/users/{username}` - delete an account (admin-only)

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, post},
    Form, Json, Router,
};
use sqlx::PgPool;

use crate::api::response::{ApiResponse, ErrorResponse};
use crate::api::AppState;
use crate::auth::{AdminAccount, JwtManager};

use super::commands::{
    create_user, delete_user, login, refresh, CreateUserCommand, CreateUserError,
    DeleteUserCommand, DeleteUserError, LoginCommand, LoginError, RefreshCommand, RefreshError,
};

/// Creates the token and admin router
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/token", post(login_for_access_token))
        .route("/refresh", post(refresh_access_token))
        .route("/admin/users/", post(create_user_route))
        .route("/admin/users/:username", delete(delete_user_route))
}

/// Authenticate and return an access + refresh token pair
#[tracing::instrument(skip(pool, jwt, command), fields(username = %command.username))]
async fn login_for_access_token(
    State(pool): State<PgPool>,
    State(jwt): State<JwtManager>,
    Form(command): Form<LoginCommand>,
) -> Result<Response, AccountsApiError> {
    let response = login::handle(pool, jwt, command).await?;
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Exchange a refresh token for a new access token
#[tracing::instrument(skip(pool, jwt, command))]
async fn refresh_access_token(
    State(pool): State<PgPool>,
    State(jwt): State<JwtManager>,
    Form(command): Form<RefreshCommand>,
) -> Result<Response, AccountsApiError> {
    let response = refresh::handle(pool, jwt, command).await?;
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Create a new account (admin-only)
#[tracing::instrument(skip(pool, admin, command), fields(username = %command.username))]
async fn create_user_route(
    State(pool): State<PgPool>,
    admin: AdminAccount,
    Form(command): Form<CreateUserCommand>,
) -> Result<Response, AccountsApiError> {
    let response = create_user::handle(pool, command).await?;

    tracing::info!(
        admin = %admin.0.username,
        created = %response.username,
        "Admin created account"
    );

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Delete an account by username (admin-only)
#[tracing::instrument(skip(pool, admin))]
async fn delete_user_route(
    State(pool): State<PgPool>,
    admin: AdminAccount,
    Path(username): Path<String>,
) -> Result<Response, AccountsApiError> {
    let command = DeleteUserCommand {
        username: username.clone(),
    };
    let response = delete_user::handle(pool, command).await?;

    tracing::info!(
        admin = %admin.0.username,
        deleted = %username,
        "Admin deleted account"
    );

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Unified error type for account API endpoints
#[derive(Debug)]
enum AccountsApiError {
    Login(LoginError),
    Refresh(RefreshError),
    Create(CreateUserError),
    Delete(DeleteUserError),
}

impl From<LoginError> for AccountsApiError {
    fn from(err: LoginError) -> Self {
        Self::Login(err)
    }
}

impl From<RefreshError> for AccountsApiError {
    fn from(err: RefreshError) -> Self {
        Self::Refresh(err)
    }
}

impl From<CreateUserError> for AccountsApiError {
    fn from(err: CreateUserError) -> Self {
        Self::Create(err)
    }
}

impl From<DeleteUserError> for AccountsApiError {
    fn from(err: DeleteUserError) -> Self {
        Self::Delete(err)
    }
}

fn unauthorized(message: String) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(ErrorResponse::new("UNAUTHORIZED", message)),
    )
        .into_response()
}

impl IntoResponse for AccountsApiError {
    fn into_response(self) -> Response {
        match self {
            AccountsApiError::Login(LoginError::InvalidCredentials)
            | AccountsApiError::Login(LoginError::Disabled)
            | AccountsApiError::Refresh(RefreshError::InvalidToken) => {
                unauthorized(self.to_string())
            },
            AccountsApiError::Create(CreateUserError::DuplicateUsername)
            | AccountsApiError::Create(CreateUserError::DuplicateEmail) => {
                let error = ErrorResponse::new("DUPLICATE", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            AccountsApiError::Delete(DeleteUserError::NotFound) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            AccountsApiError::Login(LoginError::Token(_))
            | AccountsApiError::Login(LoginError::CorruptHash)
            | AccountsApiError::Login(LoginError::Database(_))
            | AccountsApiError::Refresh(RefreshError::Token(_))
            | AccountsApiError::Refresh(RefreshError::Database(_))
            | AccountsApiError::Create(CreateUserError::Hash)
            | AccountsApiError::Create(CreateUserError::Database(_))
            | AccountsApiError::Delete(DeleteUserError::Database(_)) => {
                tracing::error!("Account endpoint failure: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for AccountsApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login(e) => write!(f, "{}", e),
            Self::Refresh(e) => write!(f, "{}", e),
            Self::Create(e) => write!(f, "{}", e),
            Self::Delete(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AccountsApiError::Login(LoginError::InvalidCredentials);
        assert_eq!(err.to_string(), "Incorrect username or password");
    }
}
