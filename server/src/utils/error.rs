use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;
use crate::utils::response::{error as error_response, ErrorDetails};

/// Where a client should go after an unknown event id, and how long to wait.
pub const MISSING_EVENT_REDIRECT: &str = "/";
pub const MISSING_EVENT_REDIRECT_DELAY_MS: u64 = 1500;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {title}: {message}")]
    ValidationError { title: String, message: String },

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Storage error")]
    StorageError(#[from] StoreError),
}

impl AppError {
    pub fn validation(title: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ValidationError {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) | AppError::EventNotFound(_) => StatusCode::NOT_FOUND,
            AppError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError { .. } => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::EventNotFound(_) => "EVENT_NOT_FOUND",
            AppError::StorageError(_) => "STORAGE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::StorageError(e) => {
                error!(error = ?e, "Storage error");
            }
            // Client mistakes are not server faults.
            _ => {
                tracing::debug!(error = %self, "Request rejected");
            }
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation("Invalid query", rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation("Invalid request body", rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        let (public_message, details) = match &self {
            AppError::ValidationError { title, message } => (
                message.clone(),
                Some(ErrorDetails::Toast {
                    title: title.clone(),
                }),
            ),
            AppError::AuthError(msg) | AppError::NotFound(msg) => (msg.clone(), None),
            AppError::EventNotFound(id) => (
                format!("Event '{}' was not found", id),
                Some(ErrorDetails::Redirect {
                    redirect_to: MISSING_EVENT_REDIRECT,
                    redirect_after_ms: MISSING_EVENT_REDIRECT_DELAY_MS,
                }),
            ),
            AppError::StorageError(_) => ("A storage error occurred".to_string(), None),
        };

        error_response(code, public_message, details, status)
    }
}
