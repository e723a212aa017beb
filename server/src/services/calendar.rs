use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::Event;

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

/// Lays `events` out over every day of the given month. Events whose date
/// does not parse are left out.
pub fn month_view(events: &[Event], year: i32, month: u32) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let days = first
        .iter_days()
        .take_while(|day| day.month() == month)
        .map(|date| CalendarDay {
            date,
            events: events
                .iter()
                .filter(|event| event.day() == Some(date))
                .cloned()
                .collect(),
        })
        .collect();

    Some(CalendarMonth { year, month, days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::static_events;

    #[test]
    fn test_december_layout() {
        let view = month_view(&static_events(), 2025, 12).unwrap();

        assert_eq!(view.days.len(), 31);
        let thirteenth = &view.days[12];
        assert_eq!(thirteenth.date, NaiveDate::from_ymd_opt(2025, 12, 13).unwrap());
        assert_eq!(thirteenth.events[0].title, "HackABot 2025");

        let total: usize = view.days.iter().map(|d| d.events.len()).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_leap_february() {
        assert_eq!(month_view(&[], 2028, 2).unwrap().days.len(), 29);
    }

    #[test]
    fn test_invalid_month() {
        assert!(month_view(&[], 2025, 13).is_none());
    }
}
