use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::envelope::ApiResponse;
use super::repository::RepositoryError;
use super::requests::PayloadError;
use super::storage::StorageError;

/// Error raised by the company services.
#[derive(Debug, thiserror::Error)]
pub enum CompanyServiceError {
    #[error("no company account matches the authenticated user")]
    NotFoundUser,
    #[error("job posting not found")]
    NotFoundPost,
    #[error("application not found")]
    NotFoundApplication,
    #[error("job posting is already discarded")]
    AlreadyDiscarded,
    #[error("resource belongs to another company")]
    AccessDenied,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    FileStore(#[from] StorageError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<PayloadError> for CompanyServiceError {
    fn from(value: PayloadError) -> Self {
        Self::InvalidRequest(value.to_string())
    }
}

/// Fixed response triple for an error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: &'static str,
}

impl CompanyServiceError {
    pub fn catalog(&self) -> CatalogEntry {
        let (status, code, message) = match self {
            Self::NotFoundUser => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND_USER",
                "company account not found",
            ),
            Self::NotFoundPost => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND_POST",
                "job posting not found",
            ),
            Self::NotFoundApplication => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND_APPLICATION",
                "application not found",
            ),
            Self::AlreadyDiscarded => (
                StatusCode::CONFLICT,
                "ALREADY_DISCARDED",
                "job posting is already discarded",
            ),
            Self::AccessDenied => (
                StatusCode::FORBIDDEN,
                "ACCESS_DENIED",
                "resource belongs to another company",
            ),
            Self::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
                "request payload is invalid",
            ),
            Self::FileStore(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "FILE_STORE_ERROR",
                "failed to store job posting document",
            ),
            Self::Repository(RepositoryError::Conflict) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                "record already exists",
            ),
            Self::Repository(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "REPOSITORY_UNAVAILABLE",
                "storage is unavailable",
            ),
        };

        CatalogEntry {
            status,
            code,
            message,
        }
    }
}

impl IntoResponse for CompanyServiceError {
    fn into_response(self) -> Response {
        let entry = self.catalog();
        let message = match &self {
            Self::InvalidRequest(detail) => format!("{}: {}", entry.message, detail),
            _ => entry.message.to_string(),
        };

        ApiResponse::<()>::failure(entry.status, entry.code, message).into_response()
    }
}
