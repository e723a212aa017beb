use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::event::EventCategory;

/// Per-category click tallies used to bias the unfiltered listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPreferences {
    pub technical: u32,
    pub cultural: u32,
    pub sports: u32,
    pub academic: u32,
}

impl CategoryPreferences {
    pub fn get(&self, category: EventCategory) -> u32 {
        match category {
            EventCategory::Technical => self.technical,
            EventCategory::Cultural => self.cultural,
            EventCategory::Sports => self.sports,
            EventCategory::Academic => self.academic,
        }
    }

    pub fn increment(&mut self, category: EventCategory) {
        let slot = match category {
            EventCategory::Technical => &mut self.technical,
            EventCategory::Cultural => &mut self.cultural,
            EventCategory::Sports => &mut self.sports,
            EventCategory::Academic => &mut self.academic,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn total(&self) -> u64 {
        EventCategory::ALL
            .iter()
            .map(|category| u64::from(self.get(*category)))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestEntry {
    pub interested: bool,
    pub count: u32,
}

/// Interest toggles keyed by event id.
pub type InterestMap = HashMap<String, InterestEntry>;
