use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;

use crate::models::LoginRequest;
use crate::services::auth as demo_auth;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{empty_success, success};

pub async fn login(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = request?;
    let outcome = demo_auth::login(state.store.as_ref(), &state.config, request).await?;
    let message = format!("Demo login granted for {}", outcome.role);
    Ok(success(outcome, message))
}

pub async fn logout(State(state): State<AppState>) -> Result<Response, AppError> {
    demo_auth::logout(state.store.as_ref()).await?;
    Ok(empty_success("Logged out"))
}

pub async fn session(State(state): State<AppState>) -> Response {
    let session = demo_auth::current_session(state.store.as_ref()).await;
    success(session, "Current session")
}

/// Sends visitors without a society login to the login page.
pub async fn require_society(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let session = demo_auth::current_session(state.store.as_ref()).await;

    match demo_auth::society_redirect(&session) {
        Some(location) => {
            tracing::debug!(path = %request.uri().path(), location, "Workspace access redirected");
            Redirect::to(location).into_response()
        }
        None => next.run(request).await,
    }
}
