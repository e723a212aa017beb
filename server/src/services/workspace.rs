//! Society workspace: the list of draft and published events a society
//! maintains, with publish-time validation.

use tracing::info;
use uuid::Uuid;

use crate::models::event::DEFAULT_POSTER;
use crate::models::{EventForm, EventStatus, SaveEventRequest, StoredEvent};
use crate::store::{keys, read_json, write_json, KeyValueStore};
use crate::utils::AppError;

/// Entries shown before the society has saved anything.
pub fn demo_events() -> Vec<StoredEvent> {
    let demo = |id: &str, title: &str, date: &str, venue: &str, status: EventStatus| StoredEvent {
        id: id.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        venue: venue.to_string(),
        description: String::new(),
        poster_url: DEFAULT_POSTER.to_string(),
        status,
        time: None,
        society: None,
        category: None,
    };

    vec![
        demo("1", "Tech Society Meetup", "2024-09-20", "Auditorium 1", EventStatus::Draft),
        demo("2", "Cultural Night", "2024-09-25", "Main Quad", EventStatus::Published),
    ]
}

pub async fn list_events(store: &dyn KeyValueStore) -> Vec<StoredEvent> {
    read_json(store, keys::MANAGED_EVENTS)
        .await
        .unwrap_or_else(demo_events)
}

pub async fn get_event(store: &dyn KeyValueStore, id: &str) -> Option<StoredEvent> {
    list_events(store).await.into_iter().find(|event| event.id == id)
}

fn validate(form: &EventForm, status: EventStatus) -> Result<String, AppError> {
    if status == EventStatus::Published {
        let required = [&form.title, &form.date, &form.venue, &form.description];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(AppError::validation(
                "Missing details",
                "Fill title, date, venue, and description before publishing.",
            ));
        }
    }

    let title = form.title.trim();
    if title.is_empty() {
        return Err(AppError::validation(
            "Add a title",
            "A title is required to save an event.",
        ));
    }

    Ok(title.to_string())
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Creates or replaces a workspace event. New events go to the front of
/// the list; edits keep their position.
pub async fn save_event(
    store: &dyn KeyValueStore,
    request: SaveEventRequest,
) -> Result<StoredEvent, AppError> {
    let SaveEventRequest {
        editing_id,
        status,
        form,
    } = request;
    let title = validate(&form, status)?;

    let mut events = list_events(store).await;
    let existing = match editing_id.as_deref() {
        Some(id) => Some(
            events
                .iter()
                .position(|event| event.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Workspace event '{}' was not found", id)))?,
        ),
        None => None,
    };

    let poster_url = form.poster_url.trim();
    let saved = StoredEvent {
        id: editing_id.unwrap_or_else(|| Uuid::new_v4().simple().to_string()),
        title,
        date: form.date.trim().to_string(),
        venue: form.venue.trim().to_string(),
        description: form.description.trim().to_string(),
        poster_url: if poster_url.is_empty() {
            DEFAULT_POSTER.to_string()
        } else {
            poster_url.to_string()
        },
        status,
        time: optional(&form.time),
        society: optional(&form.society),
        category: form.category,
    };

    match existing {
        Some(index) => events[index] = saved.clone(),
        None => events.insert(0, saved.clone()),
    }
    write_json(store, keys::MANAGED_EVENTS, &events).await?;

    info!(id = %saved.id, status = ?saved.status, "Workspace event saved");
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::visible_events;
    use crate::store::InMemoryStore;

    fn form(title: &str, venue: &str) -> EventForm {
        EventForm {
            title: title.to_string(),
            date: "2025-12-30".to_string(),
            venue: venue.to_string(),
            description: "Bring a laptop".to_string(),
            ..Default::default()
        }
    }

    fn request(status: EventStatus, form: EventForm) -> SaveEventRequest {
        SaveEventRequest {
            editing_id: None,
            status,
            form,
        }
    }

    #[tokio::test]
    async fn test_empty_store_shows_demo_entries() {
        let store = InMemoryStore::new();
        let events = list_events(&store).await;

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Tech Society Meetup");
    }

    #[tokio::test]
    async fn test_publish_without_venue_is_rejected() {
        let store = InMemoryStore::new();
        let err = save_event(&store, request(EventStatus::Published, form("Hack Night", "  ")))
            .await
            .unwrap_err();

        match err {
            AppError::ValidationError { title, .. } => assert_eq!(title, "Missing details"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(store.get(keys::MANAGED_EVENTS).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_draft_only_needs_title() {
        let store = InMemoryStore::new();
        let draft = EventForm {
            title: "  Idea  ".to_string(),
            ..Default::default()
        };

        let saved = save_event(&store, request(EventStatus::Draft, draft)).await.unwrap();
        assert_eq!(saved.title, "Idea");
        assert_eq!(saved.poster_url, DEFAULT_POSTER);

        let events = list_events(&store).await;
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].id, saved.id);
    }

    #[tokio::test]
    async fn test_draft_without_title_is_rejected() {
        let store = InMemoryStore::new();
        let err = save_event(&store, request(EventStatus::Draft, EventForm::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError { ref title, .. } if title == "Add a title"));
    }

    #[tokio::test]
    async fn test_editing_replaces_in_place_and_publishes() {
        let store = InMemoryStore::new();
        let saved = save_event(&store, request(EventStatus::Draft, form("Quiz", "Hall 2")))
            .await
            .unwrap();

        let published = save_event(
            &store,
            SaveEventRequest {
                editing_id: Some(saved.id.clone()),
                status: EventStatus::Published,
                form: form("Quiz Finals", "Hall 2"),
            },
        )
        .await
        .unwrap();

        let events = list_events(&store).await;
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].title, "Quiz Finals");
        assert_eq!(published.status, EventStatus::Published);

        let local_id = format!("local-{}", saved.id);
        assert!(visible_events(&store).await.iter().any(|e| e.id == local_id));
    }

    #[tokio::test]
    async fn test_editing_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        let err = save_event(
            &store,
            SaveEventRequest {
                editing_id: Some("ghost".to_string()),
                status: EventStatus::Draft,
                form: form("Ghost", "Nowhere"),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
