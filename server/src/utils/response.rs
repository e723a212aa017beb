//! JSON envelopes shared by every endpoint.
//!
//! Successes carry `data` plus a human-readable `message` the client can show
//! as a toast. Failures carry a machine `code`, the message, and optional
//! typed `details` the client acts on (a toast title or a redirect).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

/// Extra context attached to an error body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    /// Short heading for the client's error toast.
    Toast { title: String },
    /// The client should navigate to `redirect_to` after the delay.
    Redirect {
        redirect_to: &'static str,
        redirect_after_ms: u64,
    },
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiErrorBody,
}

pub fn success<T>(data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: message.into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn empty_success(message: impl Into<String>) -> Response {
    let body: ApiResponse<()> = ApiResponse {
        success: true,
        data: None,
        message: message.into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn error(
    code: &'static str,
    message: impl Into<String>,
    details: Option<ErrorDetails>,
    status: StatusCode,
) -> Response {
    let body = ApiErrorResponse {
        success: false,
        error: ApiErrorBody {
            code,
            message: message.into(),
            details,
        },
    };

    (status, Json(body)).into_response()
}
