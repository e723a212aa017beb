use serde::{Deserialize, Serialize};

use super::event::{EventCategory, EventStatus};

/// Body of a workspace save request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub poster_url: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub society: Option<String>,
    #[serde(default)]
    pub category: Option<EventCategory>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEventRequest {
    #[serde(default)]
    pub editing_id: Option<String>,
    pub status: EventStatus,
    #[serde(flatten)]
    pub form: EventForm,
}

/// Candidate form values lifted from a poster. Unset fields are left for
/// manual entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PosterFields {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub society: Option<String>,
    pub description: Option<String>,
}

impl PosterFields {
    /// Fills every unset field from `other`.
    pub fn or(self, other: PosterFields) -> PosterFields {
        PosterFields {
            title: self.title.or(other.title),
            date: self.date.or(other.date),
            time: self.time.or(other.time),
            venue: self.venue.or(other.venue),
            society: self.society.or(other.society),
            description: self.description.or(other.description),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == PosterFields::default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub scanned: bool,
    pub fields: PosterFields,
    pub raw_text: Option<String>,
    pub notice: String,
}
