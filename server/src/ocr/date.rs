//! Loose date and time recognition for poster text.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static YEAR_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4})[/\-.](\d{1,2})[/\-.](\d{1,2})\b").expect("valid year-first regex")
});

static DAY_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{4})\b").expect("valid day-first regex")
});

static DAY_MONTH_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{4})\b",
    )
    .expect("valid day-month-name regex")
});

static MONTH_NAME_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b",
    )
    .expect("valid month-name-day regex")
});

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:[:.](\d{2}))?\s*([ap])\.?\s*m\b\.?").expect("valid time regex")
});

/// Finds the first recognizable calendar date in `text`.
pub fn find_date(text: &str) -> Option<NaiveDate> {
    YEAR_FIRST
        .captures(text)
        .and_then(|c| ymd(&c, 1, 2, 3))
        .or_else(|| DAY_FIRST.captures(text).and_then(|c| ymd(&c, 3, 2, 1)))
        .or_else(|| {
            DAY_MONTH_NAME.captures(text).and_then(|c| {
                NaiveDate::from_ymd_opt(number(&c, 3)?, month_from_name(&c[2])?, number(&c, 1)?)
            })
        })
        .or_else(|| {
            MONTH_NAME_DAY.captures(text).and_then(|c| {
                NaiveDate::from_ymd_opt(number(&c, 3)?, month_from_name(&c[1])?, number(&c, 2)?)
            })
        })
}

/// Canonical `YYYY-MM-DD` form of the first date in `text`.
pub fn normalize_date(text: &str) -> Option<String> {
    find_date(text).map(|date| date.format("%Y-%m-%d").to_string())
}

/// First clock time in `text`, rendered like `10:00 AM`.
pub fn find_time(text: &str) -> Option<String> {
    let caps = CLOCK_TIME.captures(text)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let meridiem = if caps[3].eq_ignore_ascii_case("a") { "AM" } else { "PM" };
    Some(format!("{:02}:{:02} {}", hour, minute, meridiem))
}

fn ymd(caps: &Captures<'_>, year: usize, month: usize, day: usize) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(number(caps, year)?, number(caps, month)?, number(caps, day)?)
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}

fn month_from_name(name: &str) -> Option<u32> {
    let month = match name.get(..3)?.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
