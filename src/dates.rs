//! Calendar-date helpers. Dates are timezone-less `NaiveDate`s throughout.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::error::ChoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Adds `n` days (may be negative). `None` past chrono's supported range.
pub fn add_days(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(n))
}

/// Day of week with 0 = Sunday.
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Whole days from `from` to `to` (negative if `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Every calendar day in `[start, end]`, empty if `start > end`.
pub fn each_day(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(input: &str) -> Result<NaiveDate, ChoreError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| ChoreError::InvalidDate {
        input: input.to_string(),
        source,
    })
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(input: &str) -> Result<NaiveDate, ChoreError> {
    let invalid = || ChoreError::InvalidMonth(input.to_string());
    let (y, m) = input.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

/// Bounds of the Sunday-first grid that displays the month containing `date`.
///
/// The grid starts on the Sunday on or before the 1st and ends on the
/// Saturday on or after the last day, so it may spill into adjacent months.
pub fn month_grid_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (first, last) = month_bounds(date);
    let start = add_days(first, -i64::from(weekday_number(first))).unwrap_or(first);
    let end = add_days(last, 6 - i64::from(weekday_number(last))).unwrap_or(last);
    (start, end)
}

/// Accepts `sun`..`sat`, full English names, or `0`..`6`.
pub fn parse_weekday(input: &str) -> Result<u8, ChoreError> {
    let s = input.trim().to_lowercase();
    if let Ok(n) = s.parse::<u8>() {
        return if n < 7 { Ok(n) } else { Err(ChoreError::InvalidWeekday(input.to_string())) };
    }
    let prefix = s.get(..3).unwrap_or(&s);
    WEEKDAY_LABELS
        .iter()
        .position(|label| label.to_lowercase() == prefix)
        .filter(|_| s.len() == 3 || full_weekday_name(prefix).is_some_and(|full| full == s))
        .map(|i| i as u8)
        .ok_or_else(|| ChoreError::InvalidWeekday(input.to_string()))
}

/// Parses a comma separated weekday list such as `mon,wed,fri`.
pub fn parse_weekdays(input: &str) -> Result<Vec<u8>, ChoreError> {
    input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_weekday)
        .collect()
}

fn full_weekday_name(prefix: &str) -> Option<&'static str> {
    match prefix {
        "sun" => Some("sunday"),
        "mon" => Some("monday"),
        "tue" => Some("tuesday"),
        "wed" => Some("wednesday"),
        "thu" => Some("thursday"),
        "fri" => Some("friday"),
        "sat" => Some("saturday"),
        _ => None,
    }
}

pub fn weekday_label(day: u8) -> &'static str {
    WEEKDAY_LABELS.get(day as usize).copied().unwrap_or("?")
}
