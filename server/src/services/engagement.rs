//! Student-side engagement: category click tracking and interest toggles.

use tracing::debug;

use crate::models::{CategoryPreferences, Event, EventCategory, InterestEntry, InterestMap};
use crate::store::{keys, read_json_or_default, write_json, KeyValueStore, StoreError};

pub async fn load_preferences(store: &dyn KeyValueStore) -> CategoryPreferences {
    read_json_or_default(store, keys::PREFERENCES).await
}

/// Records one click for `category` and returns the updated tallies.
pub async fn track_click(
    store: &dyn KeyValueStore,
    category: EventCategory,
) -> Result<CategoryPreferences, StoreError> {
    let mut preferences = load_preferences(store).await;
    preferences.increment(category);
    write_json(store, keys::PREFERENCES, &preferences).await?;

    debug!(%category, total = preferences.total(), "Tracked category click");
    Ok(preferences)
}

/// Current interest state for `event`, defaulting to its catalog count.
pub async fn interest_state(store: &dyn KeyValueStore, event: &Event) -> InterestEntry {
    let map: InterestMap = read_json_or_default(store, keys::INTERESTED_EVENTS).await;
    map.get(&event.id).copied().unwrap_or(InterestEntry {
        interested: false,
        count: event.interested_count,
    })
}

/// Flips interest for `event`; the count moves by one in step with the flag.
pub async fn toggle_interest(
    store: &dyn KeyValueStore,
    event: &Event,
) -> Result<InterestEntry, StoreError> {
    let mut map: InterestMap = read_json_or_default(store, keys::INTERESTED_EVENTS).await;
    let current = map.get(&event.id).copied().unwrap_or(InterestEntry {
        interested: false,
        count: event.interested_count,
    });

    let next = if current.interested {
        InterestEntry {
            interested: false,
            count: current.count.saturating_sub(1),
        }
    } else {
        InterestEntry {
            interested: true,
            count: current.count.saturating_add(1),
        }
    };

    map.insert(event.id.clone(), next);
    write_json(store, keys::INTERESTED_EVENTS, &map).await?;
    Ok(next)
}

/// Overlays stored interest counts onto catalog events.
pub async fn apply_interest_counts(store: &dyn KeyValueStore, events: &mut [Event]) {
    let map: InterestMap = read_json_or_default(store, keys::INTERESTED_EVENTS).await;
    if map.is_empty() {
        return;
    }
    for event in events.iter_mut() {
        if let Some(entry) = map.get(&event.id) {
            event.interested_count = entry.count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::static_events;
    use crate::store::InMemoryStore;

    #[tokio::test]
    async fn test_toggle_twice_restores_count() {
        let store = InMemoryStore::new();
        let event = static_events().remove(0);
        let original = event.interested_count;

        let first = toggle_interest(&store, &event).await.unwrap();
        assert!(first.interested);
        assert_eq!(first.count, original + 1);

        let second = toggle_interest(&store, &event).await.unwrap();
        assert!(!second.interested);
        assert_eq!(second.count, original);
        assert_eq!(interest_state(&store, &event).await, second);
    }

    #[tokio::test]
    async fn test_interest_counts_overlay_catalog() {
        let store = InMemoryStore::new();
        let mut events = static_events();
        toggle_interest(&store, &events[1]).await.unwrap();

        apply_interest_counts(&store, &mut events).await;
        assert_eq!(events[1].interested_count, 568);
        assert_eq!(events[0].interested_count, 234);
    }

    #[tokio::test]
    async fn test_clicks_accumulate_per_category() {
        let store = InMemoryStore::new();
        track_click(&store, EventCategory::Sports).await.unwrap();
        let prefs = track_click(&store, EventCategory::Sports).await.unwrap();

        assert_eq!(prefs.sports, 2);
        assert_eq!(load_preferences(&store).await, prefs);
    }
}
