//! Server error taxonomy and its HTTP mapping.
//!
//! Every handler returns `Result<_, AppError>`. Internal failures are logged
//! with their detail and answered with a generic message.

use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use thiserror::Error;

use crate::constants::common::USER_EXISTS_MESSAGE;
use crate::repository::RepositoryError;
use crate::types::responses::MessageOnlyResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Duplicate email at signup. Answered with 400 like any other rejected signup.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> Status {
        match self {
            AppError::Unauthorized(_) => Status::Unauthorized,
            AppError::Conflict(_) | AppError::Validation(_) => Status::BadRequest,
            AppError::NotFound(_) => Status::NotFound,
            AppError::Internal(_) => Status::InternalServerError,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::Unauthorized(message)
            | AppError::Conflict(message)
            | AppError::NotFound(message)
            | AppError::Validation(message) => message.clone(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    pub fn task_not_found(id: i32) -> Self {
        AppError::NotFound(format!("Task with id {} not found", id))
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::DuplicateEmail(_) => {
                AppError::Conflict(USER_EXISTS_MESSAGE.to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        match &self {
            AppError::Internal(detail) => {
                tracing::error!(method = %request.method(), uri = %request.uri(), %detail, "request failed");
            }
            other => {
                tracing::debug!(method = %request.method(), uri = %request.uri(), error = %other, "request rejected");
            }
        }

        let body = Json(MessageOnlyResponse::new(self.public_message()));
        (self.status(), body).respond_to(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthorized("x".into()), Status::Unauthorized)]
    #[case(AppError::Conflict("x".into()), Status::BadRequest)]
    #[case(AppError::NotFound("x".into()), Status::NotFound)]
    #[case(AppError::Validation("x".into()), Status::BadRequest)]
    #[case(AppError::Internal("x".into()), Status::InternalServerError)]
    fn maps_to_status(#[case] error: AppError, #[case] status: Status) {
        assert_eq!(error.status(), status);
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let error = AppError::Internal("connection refused on 10.0.0.3".to_string());
        assert_eq!(error.public_message(), "An internal error occurred");
    }

    #[test]
    fn duplicate_email_becomes_conflict() {
        let error: AppError = RepositoryError::DuplicateEmail("a@b.io".to_string()).into();
        assert!(matches!(error, AppError::Conflict(_)));
    }
}
