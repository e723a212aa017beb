pub mod auth;
pub mod event;
pub mod poster;
pub mod preferences;

pub use auth::{LoginOutcome, LoginRequest, Role, Session};
pub use event::{Event, EventCategory, EventStatus, StoredEvent};
pub use poster::{EventForm, PosterFields, SaveEventRequest, ScanOutcome};
pub use preferences::{CategoryPreferences, InterestEntry, InterestMap};
