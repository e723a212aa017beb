use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_POSTER: &str =
    "https://images.unsplash.com/photo-1489515217757-5fd1be406fef?w=600&h=400&fit=crop&auto=format&dpr=1";

/// Prefix distinguishing user-authored events from static catalog ids.
pub const LOCAL_ID_PREFIX: &str = "local-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Technical,
    Cultural,
    Sports,
    Academic,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Technical,
        EventCategory::Cultural,
        EventCategory::Sports,
        EventCategory::Academic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Technical => "technical",
            EventCategory::Cultural => "cultural",
            EventCategory::Sports => "sports",
            EventCategory::Academic => "academic",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technical" => Ok(EventCategory::Technical),
            "cultural" => Ok(EventCategory::Cultural),
            "sports" => Ok(EventCategory::Sports),
            "academic" => Ok(EventCategory::Academic),
            other => Err(format!("Unknown category '{}'", other)),
        }
    }
}

/// A catalog entry as shown to students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub society: String,
    pub category: EventCategory,
    pub poster_url: String,
    pub interested_count: u32,
}

impl Event {
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Draft,
    Published,
}

/// A society-authored event as persisted in the workspace list.
///
/// Every field except `id` and `status` tolerates absence so that entries
/// written by older form variants still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEvent {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "coverUrl")]
    pub poster_url: String,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub society: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
}

impl StoredEvent {
    pub fn is_published(&self) -> bool {
        self.status == EventStatus::Published
    }

    /// Presents a stored event in the public catalog, filling blanks.
    pub fn to_catalog_event(&self) -> Event {
        fn or_default(value: &str, fallback: &str) -> String {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        }

        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();

        Event {
            id: format!("{}{}", LOCAL_ID_PREFIX, self.id),
            title: or_default(&self.title, "Untitled event"),
            description: or_default(&self.description, "Details coming soon."),
            date: or_default(&self.date, &today),
            time: or_default(self.time.as_deref().unwrap_or_default(), "All day"),
            venue: or_default(&self.venue, "TBD"),
            society: or_default(self.society.as_deref().unwrap_or_default(), "Your Society"),
            category: self.category.unwrap_or(EventCategory::Academic),
            poster_url: or_default(&self.poster_url, DEFAULT_POSTER),
            interested_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(status: EventStatus) -> StoredEvent {
        StoredEvent {
            id: "42".to_string(),
            title: String::new(),
            date: "2025-12-01".to_string(),
            venue: "  ".to_string(),
            description: String::new(),
            poster_url: String::new(),
            status,
            time: None,
            society: None,
            category: None,
        }
    }

    #[test]
    fn test_catalog_event_fills_blanks() {
        let event = stored(EventStatus::Published).to_catalog_event();

        assert_eq!(event.id, "local-42");
        assert_eq!(event.title, "Untitled event");
        assert_eq!(event.description, "Details coming soon.");
        assert_eq!(event.time, "All day");
        assert_eq!(event.venue, "TBD");
        assert_eq!(event.society, "Your Society");
        assert_eq!(event.category, EventCategory::Academic);
        assert_eq!(event.poster_url, DEFAULT_POSTER);
        assert_eq!(event.interested_count, 0);
    }

    #[test]
    fn test_stored_event_accepts_cover_url_alias() {
        let raw = r#"{"id":"7","title":"Quiz","coverUrl":"https://x/y.png","status":"Draft"}"#;
        let parsed: StoredEvent = serde_json::from_str(raw).unwrap();

        assert_eq!(parsed.poster_url, "https://x/y.png");
        assert_eq!(parsed.status, EventStatus::Draft);
        assert!(parsed.venue.is_empty());
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("Sports".parse::<EventCategory>(), Ok(EventCategory::Sports));
        assert!("music".parse::<EventCategory>().is_err());
    }
}
