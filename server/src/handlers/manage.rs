use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use axum::Json;

use crate::models::{EventStatus, SaveEventRequest};
use crate::services::workspace;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

/// Multipart field carrying the poster image.
pub const POSTER_FIELD: &str = "poster";

pub async fn list_events(State(state): State<AppState>) -> Response {
    let events = workspace::list_events(state.store.as_ref()).await;
    let message = format!("{} workspace event(s)", events.len());
    success(events, message)
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = workspace::get_event(state.store.as_ref(), &id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Workspace event '{}' was not found", id)))?;
    Ok(success(event, "Workspace event"))
}

pub async fn save_event(
    State(state): State<AppState>,
    request: Result<Json<SaveEventRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = request?;
    let saved = workspace::save_event(state.store.as_ref(), request).await?;
    let message = match saved.status {
        EventStatus::Published => "Event published",
        EventStatus::Draft => "Draft saved",
    };
    Ok(success(saved, message))
}

pub async fn scan_poster(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation("Upload failed", e.body_text()))?
    {
        if field.name() == Some(POSTER_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation("Upload failed", e.body_text()))?;
            image = Some(bytes);
            break;
        }
    }

    let image = image
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::validation("No poster", "Attach a poster image to scan."))?;

    let outcome = state.scanner.scan(image.to_vec()).await;
    let message = outcome.notice.clone();
    Ok(success(outcome, message))
}
