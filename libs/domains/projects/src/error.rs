use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project with ID {0} not found")]
    NotFound(i32),

    #[error("No projects found matching your search.")]
    NoSearchMatches,

    #[error("Invalid status value.")]
    InvalidStatus,

    #[error("Search query is required")]
    MissingSearch,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The database refused a write (check, enum, not-null, unique, ...).
    #[error("{0}")]
    ConstraintViolation(String),

    #[error("{0}")]
    Storage(DbErr),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

impl From<DbErr> for ProjectError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg)) =
            err.sql_err()
        {
            return ProjectError::ConstraintViolation(msg);
        }

        let err_str = err.to_string();
        if err_str.contains("violates") || err_str.contains("invalid input value for enum") {
            ProjectError::ConstraintViolation(err_str)
        } else {
            ProjectError::Storage(err)
        }
    }
}

/// Convert ProjectError to AppError for standardized error responses
impl From<ProjectError> for AppError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(_) | ProjectError::NoSearchMatches => {
                AppError::NotFound(err.to_string())
            }
            ProjectError::InvalidStatus => AppError::InvalidQuery(err.to_string()),
            ProjectError::MissingSearch => AppError::BadRequest(err.to_string()),
            ProjectError::Validation(errors) => AppError::Validation(errors),
            ProjectError::ConstraintViolation(msg) => AppError::Internal(msg),
            ProjectError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ProjectError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
