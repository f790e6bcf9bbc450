//! Geolocation data routes
//!
//! Mounted under `/project`:
//!
//! - `POST /project/{project_id}/user_data` - upload a batch
//! - `GET /project/{project_id}/get_data` - per-user latest-timestamp summary
//! - `GET /project/{project_id}/get_data/{user_id}` - per-upload summary
//! - `GET /project/{project_id}/get_data/{user_id}/{upload_id}` - raw rows
//! - `DELETE /project/{project_id}/delete_data` - disabled, always 403

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::api::response::{ApiResponse, ErrorResponse};

use super::{
    commands::{upload, UploadBatchCommand, UploadBatchError},
    queries::{
        get_upload, project_users, user_uploads, GetUploadError, GetUploadQuery,
        ProjectUsersError, UserUploadsError,
    },
};

/// Creates the data ingestion/query router
pub fn routes() -> Router<PgPool> {
    Router::new()
        .route("/:project_id/user_data", post(upload_user_data))
        .route("/:project_id/get_data", get(list_project_data))
        .route("/:project_id/get_data/:user_id", get(get_user_data))
        .route(
            "/:project_id/get_data/:user_id/:upload_id",
            get(get_upload_data),
        )
        .route("/:project_id/delete_data", delete(delete_project_data))
}

/// Form fields of a batch upload. `user_data` carries the batch entries as
/// a JSON document.
#[derive(Debug, Deserialize)]
struct UploadForm {
    user_id: i64,
    upload_id: String,
    user_data: String,
}

/// Upload a batch of readings to a project
#[tracing::instrument(skip(pool, form), fields(user_id = form.user_id, upload_id = %form.upload_id))]
async fn upload_user_data(
    State(pool): State<PgPool>,
    Path(project_id): Path<i32>,
    Form(form): Form<UploadForm>,
) -> Result<Response, UserDataApiError> {
    let command =
        UploadBatchCommand::from_form(project_id, form.user_id, form.upload_id, &form.user_data)?;

    let response = upload::handle(pool, command).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Per-user latest-timestamp summary for a project
#[tracing::instrument(skip(pool))]
async fn list_project_data(
    State(pool): State<PgPool>,
    Path(project_id): Path<i32>,
) -> Result<Response, UserDataApiError> {
    let query = project_users::ProjectUsersQuery { project_id };
    let response = project_users::handle(pool, query).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Per-upload latest-timestamp summary for one user
#[tracing::instrument(skip(pool))]
async fn get_user_data(
    State(pool): State<PgPool>,
    Path((project_id, user_id)): Path<(i32, i64)>,
) -> Result<Response, UserDataApiError> {
    let query = user_uploads::UserUploadsQuery {
        project_id,
        user_id,
    };
    let response = user_uploads::handle(pool, query).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Raw rows for one upload batch
#[tracing::instrument(skip(pool))]
async fn get_upload_data(
    State(pool): State<PgPool>,
    Path((project_id, user_id, upload_id)): Path<(i32, i64, String)>,
) -> Result<Response, UserDataApiError> {
    let query = GetUploadQuery {
        project_id,
        user_id,
        upload_id,
    };
    let response = get_upload::handle(pool, query).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Delete all data for a project - deliberately disabled
///
/// Always responds 403 and never touches stored rows.
#[tracing::instrument]
async fn delete_project_data(Path(project_id): Path<i32>) -> Response {
    tracing::warn!(project_id, "Rejected disabled delete_data request");
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse::new(
            "FORBIDDEN",
            "This feature has been disabled",
        )),
    )
        .into_response()
}

/// Unified error type for data API endpoints
#[derive(Debug)]
enum UserDataApiError {
    Upload(UploadBatchError),
    GetUpload(GetUploadError),
    UserUploads(UserUploadsError),
    ProjectUsers(ProjectUsersError),
}

impl From<UploadBatchError> for UserDataApiError {
    fn from(err: UploadBatchError) -> Self {
        Self::Upload(err)
    }
}

impl From<GetUploadError> for UserDataApiError {
    fn from(err: GetUploadError) -> Self {
        Self::GetUpload(err)
    }
}

impl From<UserUploadsError> for UserDataApiError {
    fn from(err: UserUploadsError) -> Self {
        Self::UserUploads(err)
    }
}

impl From<ProjectUsersError> for UserDataApiError {
    fn from(err: ProjectUsersError) -> Self {
        Self::ProjectUsers(err)
    }
}

impl IntoResponse for UserDataApiError {
    fn into_response(self) -> Response {
        match self {
            UserDataApiError::Upload(UploadBatchError::InvalidJson(_))
            | UserDataApiError::Upload(UploadBatchError::EmptyBatch)
            | UserDataApiError::Upload(UploadBatchError::InvalidTimestamp { .. }) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            UserDataApiError::Upload(UploadBatchError::ProjectMissing) => {
                let error = ErrorResponse::new("BAD_REQUEST", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            UserDataApiError::GetUpload(GetUploadError::NoData)
            | UserDataApiError::UserUploads(UserUploadsError::NoData)
            | UserDataApiError::ProjectUsers(ProjectUsersError::NoData) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            UserDataApiError::Upload(UploadBatchError::Database(_))
            | UserDataApiError::GetUpload(GetUploadError::Database(_))
            | UserDataApiError::UserUploads(UserUploadsError::Database(_))
            | UserDataApiError::ProjectUsers(ProjectUsersError::Database(_)) => {
                tracing::error!("Data endpoint failure: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for UserDataApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upload(e) => write!(f, "{}", e),
            Self::GetUpload(e) => write!(f, "{}", e),
            Self::UserUploads(e) => write!(f, "{}", e),
            Self::ProjectUsers(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UserDataApiError::Upload(UploadBatchError::ProjectMissing);
        assert_eq!(err.to_string(), "Project does not exist");
    }
}
