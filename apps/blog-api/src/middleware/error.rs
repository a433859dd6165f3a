//! Error handling - maps handler failures to HTTP responses.
//!
//! Absence of a looked-up row is answered with an empty body; everything
//! else carries an RFC 7807 problem document.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use blog_shared::{ErrorResponse, FieldError};
use std::fmt;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Lookup by id found nothing (GET, DELETE).
    NotFound,
    /// Update addressed an id that is not stored.
    UnknownId,
    BadRequest(String),
    Validation(Vec<FieldError>),
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Not found"),
            AppError::UnknownId => write!(f, "Unknown id"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::UnknownId => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound | AppError::UnknownId => {
                return HttpResponse::build(self.status_code()).finish();
            }
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(errors) => ErrorResponse::validation(errors.clone()),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<blog_core::error::DomainError> for AppError {
    fn from(err: blog_core::error::DomainError) -> Self {
        match err {
            blog_core::error::DomainError::NotFound { entity_type, id } => {
                tracing::debug!(entity_type, id, "Lookup found nothing");
                AppError::NotFound
            }
            blog_core::error::DomainError::Duplicate(msg) => AppError::Conflict(msg),
        }
    }
}

// Store faults are not recovered from at this layer.
impl From<blog_core::error::RepoError> for AppError {
    fn from(err: blog_core::error::RepoError) -> Self {
        match err {
            blog_core::error::RepoError::NotFound => AppError::NotFound,
            blog_core::error::RepoError::Constraint(msg) => {
                tracing::error!("Database constraint violation: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            blog_core::error::RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            blog_core::error::RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(FieldError::from_validation(&errors))
    }
}

/// Malformed or mistyped JSON bodies.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Path segments that do not parse, e.g. a non-numeric id.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use blog_core::error::{DomainError, RepoError};

    #[actix_web::test]
    async fn test_not_found_has_empty_body() {
        let resp = AppError::from(DomainError::NotFound {
            entity_type: "post",
            id: 1,
        })
        .error_response();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(resp.into_body()).await.unwrap();
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_unknown_id_is_bad_request_with_empty_body() {
        let resp = AppError::UnknownId.error_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(resp.into_body()).await.unwrap();
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_store_faults_are_internal_errors() {
        let err = AppError::from(RepoError::Constraint("fk_posts_theme_id".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let problem: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(problem.status, 500);
        assert!(problem.detail.is_none());
    }

    #[test]
    fn test_duplicate_is_conflict() {
        let err = AppError::from(DomainError::Duplicate("taken".to_string()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
