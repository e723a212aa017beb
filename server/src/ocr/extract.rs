//! Field heuristics over cleaned poster text.
//!
//! Both heuristics are best effort. A field is only set when something in
//! the text plausibly supports it; everything else is left for the user.

use std::cmp::Reverse;

use once_cell::sync::Lazy;
use regex::Regex;

use super::date::{find_date, find_time, normalize_date};
use crate::models::PosterFields;

/// Lines longer than this are treated as body copy, never as the title.
pub const SHORT_LINE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MAX_CHARS: usize = 300;
const DESCRIPTION_MAX_LINES: usize = 3;

static VENUE_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:venue|location|at)\b\s*[:\-]?\s*(.+)").expect("valid venue regex")
});

static LABELED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z ]{0,20}?)\s*[:\-\u{2013}]\s*(.+?)\s*$")
        .expect("valid label regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Title,
    Date,
    Time,
    Venue,
    Society,
    Description,
}

impl Label {
    fn parse(raw: &str) -> Option<Self> {
        let label = match raw.trim().to_lowercase().as_str() {
            "title" | "event" | "event name" => Label::Title,
            "date" | "when" | "on" => Label::Date,
            "time" | "timing" | "timings" => Label::Time,
            "venue" | "location" | "place" | "where" => Label::Venue,
            "society" | "organizer" | "organiser" | "organized by" | "organised by" | "club"
            | "hosted by" => Label::Society,
            "description" | "about" | "details" => Label::Description,
            _ => return None,
        };
        Some(label)
    }
}

/// Title from the longest short line, date and venue from pattern scans,
/// description from the lines that follow the title.
pub fn longest_line(text: &str) -> PosterFields {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    // Ties go to the earlier line.
    let title_index = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.chars().count() <= SHORT_LINE_MAX_CHARS)
        .max_by_key(|(index, line)| (line.chars().count(), Reverse(*index)))
        .map(|(index, _)| index);

    let date_index = lines.iter().position(|line| find_date(line).is_some());
    let date = date_index.and_then(|i| lines.get(i)).and_then(|line| normalize_date(line));

    let venue_match = lines.iter().enumerate().find_map(|(index, line)| {
        if Some(index) == title_index {
            return None;
        }
        VENUE_KEYWORD
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|venue| !venue.is_empty())
            .map(|venue| (index, venue))
    });
    let venue_index = venue_match.as_ref().map(|(index, _)| *index);

    let description = title_index.and_then(|title| {
        let body: Vec<&str> = lines
            .iter()
            .enumerate()
            .skip(title + 1)
            .filter(|(index, _)| Some(*index) != date_index && Some(*index) != venue_index)
            .map(|(_, line)| *line)
            .take(DESCRIPTION_MAX_LINES)
            .collect();
        non_empty(truncate_chars(&body.join(" "), DESCRIPTION_MAX_CHARS))
    });

    PosterFields {
        title: title_index.and_then(|i| lines.get(i)).map(|line| line.to_string()),
        date,
        time: lines.iter().find_map(|line| find_time(line)),
        venue: venue_match.map(|(_, venue)| venue),
        society: None,
        description,
    }
}

/// Reads explicit `Label: value` pairs. The first occurrence of a label wins.
pub fn labeled(text: &str) -> PosterFields {
    let mut fields = PosterFields::default();

    for line in text.lines() {
        let Some(caps) = LABELED_LINE.captures(line) else {
            continue;
        };
        let Some(label) = Label::parse(&caps[1]) else {
            continue;
        };
        let value = caps[2].trim();
        if value.is_empty() {
            continue;
        }

        match label {
            Label::Title => set_once(&mut fields.title, Some(value.to_string())),
            Label::Date => set_once(&mut fields.date, normalize_date(value)),
            Label::Time => set_once(
                &mut fields.time,
                find_time(value).or_else(|| Some(value.to_string())),
            ),
            Label::Venue => set_once(&mut fields.venue, Some(value.to_string())),
            Label::Society => set_once(&mut fields.society, Some(value.to_string())),
            Label::Description => set_once(
                &mut fields.description,
                non_empty(truncate_chars(value, DESCRIPTION_MAX_CHARS)),
            ),
        }
    }

    fields
}

fn set_once(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value;
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTER: &str = "USC KIIT presents\n\
        HackABot 2025: build a robot in a day\n\
        13/12/2025\n\
        Venue: Campus 25\n\
        Starts 10 am\n\
        Prizes worth 50k\n\
        Free pizza for all teams";

    #[test]
    fn test_longest_line_picks_fields() {
        let fields = longest_line(POSTER);

        assert_eq!(fields.title.as_deref(), Some("HackABot 2025: build a robot in a day"));
        assert_eq!(fields.date.as_deref(), Some("2025-12-13"));
        assert_eq!(fields.venue.as_deref(), Some("Campus 25"));
        assert_eq!(fields.time.as_deref(), Some("10:00 AM"));
        assert_eq!(
            fields.description.as_deref(),
            Some("Starts 10 am Prizes worth 50k Free pizza for all teams")
        );
        assert!(fields.society.is_none());
    }

    #[test]
    fn test_longest_line_skips_long_lines_for_title() {
        let long = "x".repeat(SHORT_LINE_MAX_CHARS + 1);
        let text = format!("{}\nQuiz Night", long);

        assert_eq!(longest_line(&text).title.as_deref(), Some("Quiz Night"));
    }

    #[test]
    fn test_longest_line_on_empty_text() {
        assert!(longest_line("").is_empty());
    }

    #[test]
    fn test_description_is_capped() {
        let body = "word ".repeat(200);
        let text = format!("Title\n{}", body.trim());
        let description = longest_line(&text).description.unwrap();

        assert_eq!(description.chars().count(), DESCRIPTION_MAX_CHARS);
    }

    #[test]
    fn test_labeled_pairs() {
        let text = "Title: Cultural Night\n\
            Date: 25/09/2024\n\
            Time - 6 pm\n\
            Location: Main Quad\n\
            Organised by: KIITFEST OC\n\
            About: Music and dance\n\
            Title: Ignored duplicate";
        let fields = labeled(text);

        assert_eq!(fields.title.as_deref(), Some("Cultural Night"));
        assert_eq!(fields.date.as_deref(), Some("2024-09-25"));
        assert_eq!(fields.time.as_deref(), Some("06:00 PM"));
        assert_eq!(fields.venue.as_deref(), Some("Main Quad"));
        assert_eq!(fields.society.as_deref(), Some("KIITFEST OC"));
        assert_eq!(fields.description.as_deref(), Some("Music and dance"));
    }

    #[test]
    fn test_labeled_leaves_unparseable_date_unset() {
        let fields = labeled("Date: sometime soon\nVenue: Hall 6");

        assert!(fields.date.is_none());
        assert_eq!(fields.venue.as_deref(), Some("Hall 6"));
    }

    #[test]
    fn test_labeled_ignores_unknown_labels() {
        assert!(labeled("Prize: 10k\nEntry: free").is_empty());
    }
}
