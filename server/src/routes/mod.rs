use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{auth, events, health_check, manage, not_found};
use crate::state::AppState;

fn manage_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/events", get(manage::list_events).post(manage::save_event))
        .route("/events/:id", get(manage::get_event))
        .route("/scan", post(manage::scan_poster))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_society,
        ))
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/events", get(events::list_events))
        .route("/api/events/calendar", get(events::calendar_month))
        .route("/api/events/changes", get(events::changes))
        .route("/api/events/:id", get(events::get_event))
        .route("/api/events/:id/click", post(events::track_click))
        .route(
            "/api/events/:id/interest",
            get(events::interest).post(events::toggle_interest),
        )
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session))
        .nest("/api/manage", manage_routes(&state))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
}
