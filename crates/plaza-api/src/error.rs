//! HTTP mapping for `plaza_core::AppError`.
//!
//! Persistence failures surface as generic 500s and are logged here;
//! not-found and credential failures carry their domain message and are
//! not logged as errors.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use plaza_core::error::AppError;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub struct ApiError(pub AppError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl ApiError {
    /// The user-visible message. Internal detail never leaks.
    fn message(&self) -> String {
        match &self.0 {
            AppError::NotFound(what) => format!("{what} not found"),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = &self.0 {
            tracing::error!(error = %detail, "request failed");
        }
        HttpResponse::build(self.status_code()).json(json!({ "message": self.message() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError(AppError::NotFound("Post".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(AppError::Unauthorized("Invalid credentials".into())).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError(AppError::Internal("db down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message_names_the_resource() {
        assert_eq!(
            ApiError(AppError::NotFound("Post".into())).message(),
            "Post not found"
        );
        assert_eq!(
            ApiError(AppError::NotFound("Policy".into())).message(),
            "Policy not found"
        );
    }

    #[test]
    fn test_internal_detail_does_not_leak() {
        let err = ApiError(AppError::Internal("password column missing".into()));
        assert_eq!(err.message(), "internal server error");
    }
}
