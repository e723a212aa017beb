use std::str::FromStr;

use serde::Deserialize;

use crate::models::{CategoryPreferences, Event, EventCategory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(EventCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: EventCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            trimmed.parse().map(CategoryFilter::Only)
        }
    }
}

/// Query string shared by the grid and calendar listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

impl EventQuery {
    pub fn category_filter(&self) -> Result<CategoryFilter, String> {
        self.category
            .as_deref()
            .map_or(Ok(CategoryFilter::All), str::parse)
    }

    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

fn matches_search(event: &Event, needle: &str) -> bool {
    [&event.title, &event.description, &event.society, &event.venue]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Keeps events in `category` whose text fields contain `search`
/// (case-insensitive). With no category selected and at least one click
/// recorded, events are stably reordered by descending category preference.
pub fn filter_events(
    events: Vec<Event>,
    category: CategoryFilter,
    search: &str,
    preferences: &CategoryPreferences,
) -> Vec<Event> {
    let needle = search.to_lowercase();

    let mut kept: Vec<Event> = events
        .into_iter()
        .filter(|event| category.matches(event.category))
        .filter(|event| needle.is_empty() || matches_search(event, &needle))
        .collect();

    if category == CategoryFilter::All && preferences.total() > 0 {
        // `sort_by_key` is stable, so ties keep catalog order.
        kept.sort_by_key(|event| std::cmp::Reverse(preferences.get(event.category)));
    }

    kept
}
