//! Project registry routes
//!
//! - `GET /project/` - list all projects
//! - `POST /project/` - create a project (form: `project_name`,
//!   `project_description`)
//! - `GET /project/{project_id}` - fetch project metadata

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use sqlx::PgPool;

use crate::api::response::{ApiResponse, ErrorResponse};

use super::{
    commands::{CreateProjectCommand, CreateProjectError},
    queries::{GetProjectError, GetProjectQuery, ListProjectsError},
};

/// Creates the project registry router
pub fn routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/:project_id", get(get_project))
}

/// Create a new project
///
/// Responds 200 with the created project (including its generated 6-digit
/// id), or 400 on validation failure / duplicate name.
#[tracing::instrument(skip(pool, command), fields(project_name = %command.project_name))]
async fn create_project(
    State(pool): State<PgPool>,
    Form(command): Form<CreateProjectCommand>,
) -> Result<Response, ProjectApiError> {
    let response = super::commands::create::handle(pool, command).await?;

    tracing::info!(project_id = response.id, "Project created via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// List all projects
#[tracing::instrument(skip(pool))]
async fn list_projects(State(pool): State<PgPool>) -> Result<Response, ProjectApiError> {
    let projects = super::queries::list::handle(pool).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(projects))).into_response())
}

/// Fetch one project by its 6-digit id
#[tracing::instrument(skip(pool))]
async fn get_project(
    State(pool): State<PgPool>,
    Path(project_id): Path<i32>,
) -> Result<Response, ProjectApiError> {
    let query = GetProjectQuery { id: project_id };
    let response = super::queries::get::handle(pool, query).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Unified error type for project API endpoints
#[derive(Debug)]
enum ProjectApiError {
    Create(CreateProjectError),
    Get(GetProjectError),
    List(ListProjectsError),
}

impl From<CreateProjectError> for ProjectApiError {
    fn from(err: CreateProjectError) -> Self {
        Self::Create(err)
    }
}

impl From<GetProjectError> for ProjectApiError {
    fn from(err: GetProjectError) -> Self {
        Self::Get(err)
    }
}

impl From<ListProjectsError> for ProjectApiError {
    fn from(err: ListProjectsError) -> Self {
        Self::List(err)
    }
}

impl IntoResponse for ProjectApiError {
    fn into_response(self) -> Response {
        match self {
            ProjectApiError::Create(CreateProjectError::Validation(_)) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            ProjectApiError::Create(CreateProjectError::DuplicateName(ref name)) => {
                let error = ErrorResponse::new(
                    "DUPLICATE",
                    format!("Project with name '{}' already exists", name),
                );
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            ProjectApiError::Create(CreateProjectError::IdSpaceExhausted)
            | ProjectApiError::Create(CreateProjectError::Database(_))
            | ProjectApiError::Get(GetProjectError::Database(_))
            | ProjectApiError::List(ListProjectsError::Database(_)) => {
                tracing::error!("Project endpoint failure: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
            ProjectApiError::Get(GetProjectError::NotFound) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for ProjectApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create(e) => write!(f, "{}", e),
            Self::Get(e) => write!(f, "{}", e),
            Self::List(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProjectApiError::Get(GetProjectError::NotFound);
        assert!(err.to_string().contains("Invalid project ID"));
    }
}
