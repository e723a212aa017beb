use crate::models::event::LOCAL_ID_PREFIX;
use crate::models::{Event, EventCategory, StoredEvent};
use crate::store::{keys, read_json, KeyValueStore};

struct Sample {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    date: &'static str,
    time: &'static str,
    venue: &'static str,
    society: &'static str,
    category: EventCategory,
    poster_url: &'static str,
    interested_count: u32,
}

const SAMPLES: [Sample; 7] = [
    Sample {
        id: "1",
        title: "HackABot 2025",
        description: "7-hour hackathon bringing together the brightest minds to solve real-world problems. Build, innovate, and compete for amazing prizes!",
        date: "2025-12-13",
        time: "10:00 AM",
        venue: "Campus 25",
        society: "USC KIIT",
        category: EventCategory::Technical,
        poster_url: "https://images.unsplash.com/photo-1632910121591-29e2484c0259?w=600&h=400&fit=crop",
        interested_count: 234,
    },
    Sample {
        id: "2",
        title: "KIIT FEST 2026",
        description: "Three days of music, dance, art, and celebration! Join us for performances, competitions, and unforgettable memories.",
        date: "2026-02-14",
        time: "05:00 PM",
        venue: "KSAC Ground",
        society: "KIITFEST OC",
        category: EventCategory::Cultural,
        poster_url: "https://images.unsplash.com/photo-1492684223066-81342ee5ff30?w=600&h=400&fit=crop",
        interested_count: 567,
    },
    Sample {
        id: "3",
        title: "Inter-College Basketball Tournament",
        description: "Watch the best college teams compete! Exciting matches, skilled players, and thrilling moments await basketball fans.",
        date: "2025-12-20",
        time: "02:00 PM",
        venue: "KSAC Indoor Games",
        society: "KSAC Sports Club",
        category: EventCategory::Sports,
        poster_url: "https://images.unsplash.com/photo-1546519638-68e109498ffc?w=600&h=400&fit=crop",
        interested_count: 189,
    },
    Sample {
        id: "4",
        title: "AI & Machine Learning Workshop",
        description: "Hands-on workshop covering the fundamentals of AI and ML. Perfect for beginners!",
        date: "2025-12-15",
        time: "10:00 AM",
        venue: "CS Lab, Campus 25",
        society: "AISOC",
        category: EventCategory::Technical,
        poster_url: "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?w=600&h=400&fit=crop",
        interested_count: 156,
    },
    Sample {
        id: "5",
        title: "Guest Lecture: Future of Sustainable Energy",
        description: "Distinguished Professor Dr. Sarah Chen discusses breakthrough technologies in renewable energy and their impact on our future.",
        date: "2025-12-16",
        time: "11:00 AM",
        venue: "Campus 6 Hall",
        society: "Environmental Society",
        category: EventCategory::Academic,
        poster_url: "https://images.unsplash.com/photo-1497435334941-8c899ee9e8e9?w=600&h=400&fit=crop",
        interested_count: 98,
    },
    Sample {
        id: "6",
        title: "Research Symposium 2025",
        description: "Undergraduate and graduate students present their research projects. Network with faculty and industry professionals.",
        date: "2025-12-21",
        time: "09:00 AM",
        venue: "Conference Center",
        society: "IEEE Student Branch",
        category: EventCategory::Academic,
        poster_url: "https://images.unsplash.com/photo-1559223607-a43c990c692c?w=600&h=400&fit=crop",
        interested_count: 145,
    },
    Sample {
        id: "7",
        title: "Orphanage Visit",
        description: "Join us for a day of giving back! Spend time with children at the local orphanage, participate in fun activities, and spread joy.",
        date: "2025-12-23",
        time: "03:00 PM",
        venue: "Asha Kiran Orphanage",
        society: "NSS SCE",
        category: EventCategory::Cultural,
        poster_url: "https://images.unsplash.com/photo-1617878227827-8360231f7f03?w=600&h=400&fit=crop",
        interested_count: 423,
    },
];

pub fn static_events() -> Vec<Event> {
    SAMPLES
        .iter()
        .map(|s| Event {
            id: s.id.to_string(),
            title: s.title.to_string(),
            description: s.description.to_string(),
            date: s.date.to_string(),
            time: s.time.to_string(),
            venue: s.venue.to_string(),
            society: s.society.to_string(),
            category: s.category,
            poster_url: s.poster_url.to_string(),
            interested_count: s.interested_count,
        })
        .collect()
}

/// Published workspace events in catalog form. Unreadable storage yields none.
pub async fn published_events(store: &dyn KeyValueStore) -> Vec<Event> {
    let stored: Vec<StoredEvent> = read_json(store, keys::MANAGED_EVENTS).await.unwrap_or_default();
    stored
        .iter()
        .filter(|event| event.is_published())
        .map(StoredEvent::to_catalog_event)
        .collect()
}

/// The static catalog followed by every published workspace event.
pub async fn visible_events(store: &dyn KeyValueStore) -> Vec<Event> {
    let mut events = static_events();
    events.extend(published_events(store).await);
    events
}

/// The listed event with exactly this id.
pub async fn find_listed(store: &dyn KeyValueStore, id: &str) -> Option<Event> {
    visible_events(store)
        .await
        .into_iter()
        .find(|event| event.id == id)
}

/// Resolves an id from a detail link. An exact listed id wins; a bare id
/// with no listed match falls back to the published `local-` event.
pub async fn find_event(store: &dyn KeyValueStore, id: &str) -> Option<Event> {
    if let Some(event) = find_listed(store, id).await {
        return Some(event);
    }
    if id.starts_with(LOCAL_ID_PREFIX) {
        return None;
    }

    let local_id = format!("{}{}", LOCAL_ID_PREFIX, id);
    published_events(store)
        .await
        .into_iter()
        .find(|event| event.id == local_id)
}
