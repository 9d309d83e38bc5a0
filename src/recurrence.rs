//! Recurrence expansion.
//!
//! Turns chore definitions into the concrete dates they are due on within a
//! query window. Every function here is total: inconsistent rules (an end
//! date before the anchor, an empty weekday set, a zero interval) simply
//! produce no occurrences.

use chrono::NaiveDate;
use tracing::debug;

use crate::dates::{add_days, days_between, each_day, month_grid_bounds, weekday_number};
use crate::models::{Chore, ChoreInstance, Recurrence, RecurrenceType};

/// How far ahead `next_occurrence` searches, in days.
pub const NEXT_OCCURRENCE_HORIZON: usize = 365;

/// Expands every chore into its occurrences within `[window_start, window_end]`.
///
/// Instances are grouped by chore in input order; dates within a chore are
/// ascending. `is_completed` reflects the chore's `completed_dates`.
pub fn expand_occurrences<'a>(
    chores: &'a [Chore],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<ChoreInstance<'a>> {
    let instances: Vec<ChoreInstance<'a>> = chores
        .iter()
        .flat_map(|chore| {
            occurrences(chore, window_start, window_end)
                .into_iter()
                .map(move |date| ChoreInstance {
                    chore,
                    date,
                    is_completed: chore.is_completed_on(date),
                })
        })
        .collect();
    debug!(
        chores = chores.len(),
        instances = instances.len(),
        %window_start,
        %window_end,
        "expanded occurrences"
    );
    instances
}

/// Instances visible in the Sunday-first month grid containing `month`.
pub fn instances_for_month(chores: &[Chore], month: NaiveDate) -> Vec<ChoreInstance<'_>> {
    let (start, end) = month_grid_bounds(month);
    expand_occurrences(chores, start, end)
}

/// Occurrence dates of a single chore within `[window_start, window_end]`, ascending.
pub fn occurrences(chore: &Chore, window_start: NaiveDate, window_end: NaiveDate) -> Vec<NaiveDate> {
    let rule = &chore.recurrence;
    let anchor = chore.due_date;

    if rule.kind == RecurrenceType::None {
        return if window_start <= anchor && anchor <= window_end {
            vec![anchor]
        } else {
            Vec::new()
        };
    }

    let start = window_start.max(anchor);
    let end = match rule.end_date {
        Some(end_date) => window_end.min(end_date),
        None => window_end,
    };
    if start > end || rule.interval == 0 {
        return Vec::new();
    }

    match rule.kind {
        RecurrenceType::Daily => daily_dates(anchor, rule.interval, start, end),
        RecurrenceType::Weekly => weekly_dates(anchor, rule, start, end),
        RecurrenceType::None => Vec::new(),
    }
}

/// Dates in `[start, end]` whose offset from `anchor` is a multiple of `interval`.
///
/// The first hit is computed from the offset of `start` so that windows far
/// ahead of the anchor cost nothing extra.
fn daily_dates(anchor: NaiveDate, interval: u32, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let step = i64::from(interval);
    let rem = days_between(anchor, start).rem_euclid(step);
    let lead = if rem == 0 { 0 } else { step - rem };

    let mut dates = Vec::new();
    let mut current = add_days(start, lead);
    while let Some(date) = current {
        if date > end {
            break;
        }
        dates.push(date);
        current = add_days(date, step);
    }
    dates
}

/// Days in `[start, end]` on a selected weekday whose week index from the
/// anchor is a multiple of the interval. An interval of 1 matches every week.
fn weekly_dates(anchor: NaiveDate, rule: &Recurrence, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if rule.days_of_week.is_empty() {
        return Vec::new();
    }
    let interval = i64::from(rule.interval);
    each_day(start, end)
        .filter(|day| rule.days_of_week.contains(&weekday_number(*day)))
        .filter(|day| *day >= anchor && rule.end_date.map_or(true, |end_date| *day <= end_date))
        .filter(|day| interval == 1 || week_index(anchor, *day).rem_euclid(interval) == 0)
        .collect()
}

/// Whole 7-day periods from `anchor` to `day`, rounded down.
pub fn week_index(anchor: NaiveDate, day: NaiveDate) -> i64 {
    days_between(anchor, day).div_euclid(7)
}

/// The earliest occurrence strictly after `after`.
///
/// Recurring chores are searched day by day for at most
/// [`NEXT_OCCURRENCE_HORIZON`] days. Weekly rules only test the weekday here;
/// the week interval is not applied, unlike [`expand_occurrences`].
pub fn next_occurrence(chore: &Chore, after: NaiveDate) -> Option<NaiveDate> {
    let rule = &chore.recurrence;
    let anchor = chore.due_date;

    if rule.kind == RecurrenceType::None {
        return (anchor > after).then_some(anchor);
    }

    let mut current = after.max(anchor);
    for _ in 0..NEXT_OCCURRENCE_HORIZON {
        current = add_days(current, 1)?;
        if rule.end_date.is_some_and(|end_date| current > end_date) {
            return None;
        }
        let hit = match rule.kind {
            RecurrenceType::Daily => {
                rule.interval != 0 && days_between(anchor, current) % i64::from(rule.interval) == 0
            }
            RecurrenceType::Weekly => rule.days_of_week.contains(&weekday_number(current)),
            RecurrenceType::None => false,
        };
        if hit {
            return Some(current);
        }
    }
    None
}
