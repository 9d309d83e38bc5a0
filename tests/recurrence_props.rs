use chorust::dates::{add_days, days_between, each_day, format_date, weekday_number};
use chorust::models::{Chore, Recurrence, RecurrenceType};
use chorust::recurrence::{expand_occurrences, occurrences};
use chrono::NaiveDate;
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
}

fn at(offset: i64) -> NaiveDate {
    add_days(base(), offset).unwrap()
}

fn build(kind: RecurrenceType, due: i64, interval: u32, mask: u8, end: Option<i64>) -> Chore {
    let mut rule = match kind {
        RecurrenceType::None => Recurrence::default(),
        RecurrenceType::Daily => Recurrence::daily(interval),
        RecurrenceType::Weekly => Recurrence::weekly(interval, (0..7u8).filter(|d| mask & (1 << d) != 0)),
    };
    rule.end_date = end.map(at);
    Chore::new("p", "prop", at(due)).with_recurrence(rule)
}

/// Day-by-day reference for the rules the engine implements.
fn qualifies(chore: &Chore, day: NaiveDate) -> bool {
    let rule = &chore.recurrence;
    let anchor = chore.due_date;
    if rule.kind == RecurrenceType::None {
        return day == anchor;
    }
    if day < anchor || rule.end_date.is_some_and(|e| day > e) {
        return false;
    }
    let offset = days_between(anchor, day);
    match rule.kind {
        RecurrenceType::Daily => offset % i64::from(rule.interval) == 0,
        RecurrenceType::Weekly => {
            rule.days_of_week.contains(&weekday_number(day))
                && (rule.interval == 1 || (offset / 7) % i64::from(rule.interval) == 0)
        }
        RecurrenceType::None => false,
    }
}

fn kinds() -> impl Strategy<Value = RecurrenceType> {
    prop_oneof![
        Just(RecurrenceType::None),
        Just(RecurrenceType::Daily),
        Just(RecurrenceType::Weekly),
    ]
}

proptest! {
    #[test]
    fn expansion_matches_day_by_day_reference(
        kind in kinds(),
        due in 0i64..400,
        interval in 1u32..=30,
        mask in 0u8..128,
        end in proptest::option::of(0i64..800),
        start in 0i64..800,
        len in 0i64..120,
    ) {
        let chore = build(kind, due, interval, mask, end);
        let (ws, we) = (at(start), at(start + len));
        let expected: Vec<NaiveDate> = each_day(ws, we).filter(|d| qualifies(&chore, *d)).collect();
        prop_assert_eq!(occurrences(&chore, ws, we), expected);
    }

    #[test]
    fn daily_dates_are_multiples_of_interval(
        due in 0i64..400,
        interval in 1u32..=30,
        start in 0i64..2000,
        len in 0i64..200,
    ) {
        let chore = build(RecurrenceType::Daily, due, interval, 0, None);
        let (ws, we) = (at(start), at(start + len));
        for d in occurrences(&chore, ws, we) {
            prop_assert_eq!(days_between(chore.due_date, d) % i64::from(interval), 0);
            prop_assert!(d >= ws.max(chore.due_date) && d <= we);
        }
    }

    #[test]
    fn completion_flag_tracks_membership(
        kind in kinds(),
        interval in 1u32..=5,
        mask in 1u8..128,
        picks in proptest::collection::vec(0i64..60, 0..10),
    ) {
        let mut chore = build(kind, 0, interval, mask, None);
        for p in &picks {
            chore.completed_dates.insert(format_date(at(*p)));
        }
        let chores = vec![chore];
        for inst in expand_occurrences(&chores, at(0), at(60)) {
            prop_assert_eq!(inst.is_completed, chores[0].completed_dates.contains(&inst.date_key()));
        }
    }
}
