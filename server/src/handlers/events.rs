use std::convert::Infallible;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::response::Response;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::models::Event;
use crate::services::{calendar, catalog, engagement, filter};
use crate::services::filter::EventQuery;
use crate::state::AppState;
use crate::store::StoreChange;
use crate::utils::error::AppError;
use crate::utils::response::success;

async fn filtered(state: &AppState, query: &EventQuery) -> Result<Vec<Event>, AppError> {
    let category = query
        .category_filter()
        .map_err(|e| AppError::validation("Unknown category", e))?;

    let store = state.store.as_ref();
    let mut events = catalog::visible_events(store).await;
    engagement::apply_interest_counts(store, &mut events).await;
    let preferences = engagement::load_preferences(store).await;

    Ok(filter::filter_events(events, category, query.search(), &preferences))
}

pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<EventQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let events = filtered(&state, &query).await?;
    let message = format!("{} event(s)", events.len());
    Ok(success(events, message))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub category: Option<String>,
    pub q: Option<String>,
}

pub async fn calendar_month(
    State(state): State<AppState>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let filter = EventQuery {
        category: query.category,
        q: query.q,
    };
    let events = filtered(&state, &filter).await?;
    let view = calendar::month_view(&events, year, month)
        .ok_or_else(|| AppError::validation("Invalid month", format!("{}-{} is not a calendar month", year, month)))?;

    Ok(success(view, "Calendar month"))
}

/// Click and interest act on the listed event carrying exactly this id.
async fn resolve(state: &AppState, id: &str) -> Result<Event, AppError> {
    catalog::find_listed(state.store.as_ref(), id)
        .await
        .ok_or_else(|| AppError::EventNotFound(id.to_string()))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let mut event = catalog::find_event(state.store.as_ref(), &id)
        .await
        .ok_or_else(|| AppError::EventNotFound(id.clone()))?;
    event.interested_count = engagement::interest_state(state.store.as_ref(), &event).await.count;
    Ok(success(event, "Event found"))
}

pub async fn track_click(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = resolve(&state, &id).await?;
    let preferences = engagement::track_click(state.store.as_ref(), event.category).await?;
    Ok(success(preferences, "Click recorded"))
}

pub async fn interest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = resolve(&state, &id).await?;
    let entry = engagement::interest_state(state.store.as_ref(), &event).await;
    Ok(success(entry, "Interest state"))
}

pub async fn toggle_interest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = resolve(&state, &id).await?;
    let entry = engagement::toggle_interest(state.store.as_ref(), &event).await?;
    let message = if entry.interested {
        "Marked as interested"
    } else {
        "Interest removed"
    };
    Ok(success(entry, message))
}

/// Streams the keys of store writes so open views can refresh.
pub async fn changes(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let stream = BroadcastStream::new(state.store.subscribe()).filter_map(|change| {
        // Lagged receivers just miss the skipped notifications.
        let change = change.ok()?;
        let kind = match change {
            StoreChange::Set(_) => "set",
            StoreChange::Removed(_) => "removed",
        };
        Some(Ok(SseEvent::default().event(kind).data(change.key())))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
