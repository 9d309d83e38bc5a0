use chorust::dates::parse_date;
use chorust::models::{Chore, Recurrence};
use chorust::recurrence::{expand_occurrences, instances_for_month, next_occurrence, occurrences, week_index};
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

fn chore(id: &str, due: &str, recurrence: Recurrence) -> Chore {
    Chore::new(id, format!("chore {}", id), d(due)).with_recurrence(recurrence)
}

fn dates(list: &[&str]) -> Vec<NaiveDate> {
    list.iter().map(|s| d(s)).collect()
}

#[test]
fn test_weekly_every_monday() {
    let c = chore("a", "2024-01-01", Recurrence::weekly(1, [1]));
    assert_eq!(
        occurrences(&c, d("2024-01-01"), d("2024-01-31")),
        dates(&["2024-01-01", "2024-01-08", "2024-01-15", "2024-01-22", "2024-01-29"])
    );
}

#[test]
fn test_weekly_every_other_monday() {
    let c = chore("a", "2024-01-01", Recurrence::weekly(2, [1]));
    assert_eq!(
        occurrences(&c, d("2024-01-01"), d("2024-01-31")),
        dates(&["2024-01-01", "2024-01-15", "2024-01-29"])
    );
}

#[test]
fn test_weekly_weeks_counted_from_anchor() {
    // Anchored on a Wednesday: the Monday after falls in the same week index.
    let c = chore("a", "2024-01-03", Recurrence::weekly(2, [1, 3]));
    assert_eq!(
        occurrences(&c, d("2024-01-01"), d("2024-01-31")),
        dates(&["2024-01-03", "2024-01-08", "2024-01-17", "2024-01-22", "2024-01-31"])
    );
    assert_eq!(week_index(d("2024-01-03"), d("2024-01-09")), 0);
    assert_eq!(week_index(d("2024-01-03"), d("2024-01-10")), 1);
}

#[test]
fn test_daily_window_after_anchor() {
    let c = chore("a", "2024-03-01", Recurrence::daily(3));
    assert_eq!(
        occurrences(&c, d("2024-03-10"), d("2024-03-20")),
        dates(&["2024-03-10", "2024-03-13", "2024-03-16", "2024-03-19"])
    );
}

#[test]
fn test_daily_window_far_in_the_future() {
    // 2000-01-01 to 2024-01-01 is 8766 days, 2 past a multiple of 7.
    let c = chore("a", "2000-01-01", Recurrence::daily(7));
    assert_eq!(
        occurrences(&c, d("2024-01-01"), d("2024-01-31")),
        dates(&["2024-01-06", "2024-01-13", "2024-01-20", "2024-01-27"])
    );
}

#[test]
fn test_anchor_inside_window_starts_there() {
    let c = chore("a", "2024-03-05", Recurrence::daily(2));
    assert_eq!(
        occurrences(&c, d("2024-03-01"), d("2024-03-10")),
        dates(&["2024-03-05", "2024-03-07", "2024-03-09"])
    );
}

#[test]
fn test_one_off_chore() {
    let c = chore("a", "2024-05-10", Recurrence::default());
    assert_eq!(occurrences(&c, d("2024-05-10"), d("2024-05-10")), dates(&["2024-05-10"]));
    assert_eq!(occurrences(&c, d("2024-05-01"), d("2024-05-31")).len(), 1);
    assert!(occurrences(&c, d("2024-05-11"), d("2024-05-31")).is_empty());
    assert!(occurrences(&c, d("2024-04-01"), d("2024-05-09")).is_empty());
}

#[test]
fn test_end_date_boundary() {
    let window = (d("2024-01-15"), d("2024-01-31"));

    let ends_before = chore("a", "2024-01-01", Recurrence::weekly(1, [1]).until(d("2024-01-14")));
    assert!(occurrences(&ends_before, window.0, window.1).is_empty());

    let ends_on_start = chore("b", "2024-01-01", Recurrence::weekly(1, [1]).until(d("2024-01-15")));
    assert_eq!(occurrences(&ends_on_start, window.0, window.1), dates(&["2024-01-15"]));

    let daily = chore("c", "2024-01-01", Recurrence::daily(1).until(d("2024-01-17")));
    assert_eq!(
        occurrences(&daily, window.0, window.1),
        dates(&["2024-01-15", "2024-01-16", "2024-01-17"])
    );
}

#[test]
fn test_degenerate_rules_yield_nothing() {
    let window = (d("2024-01-01"), d("2024-12-31"));

    let no_days = chore("a", "2024-01-01", Recurrence::weekly(1, []));
    assert!(occurrences(&no_days, window.0, window.1).is_empty());

    let end_before_anchor = chore("b", "2024-06-01", Recurrence::daily(1).until(d("2024-05-01")));
    assert!(occurrences(&end_before_anchor, window.0, window.1).is_empty());

    let zero_interval = chore("c", "2024-01-01", Recurrence::daily(0));
    assert!(occurrences(&zero_interval, window.0, window.1).is_empty());

    let reversed_window = chore("d", "2024-01-01", Recurrence::daily(1));
    assert!(occurrences(&reversed_window, window.1, window.0).is_empty());
}

#[test]
fn test_completion_flags() {
    let mut c = chore("a", "2024-01-01", Recurrence::weekly(1, [1]));
    c.completed_dates.insert("2024-01-08".to_string());
    c.completed_dates.insert("2024-01-09".to_string());

    let chores = vec![c];
    let instances = expand_occurrences(&chores, d("2024-01-01"), d("2024-01-15"));
    let flags: Vec<(String, bool)> = instances.iter().map(|i| (i.date_key(), i.is_completed)).collect();
    assert_eq!(
        flags,
        vec![
            ("2024-01-01".to_string(), false),
            ("2024-01-08".to_string(), true),
            ("2024-01-15".to_string(), false),
        ]
    );
}

#[test]
fn test_expand_keeps_chore_order_and_is_repeatable() {
    let chores = vec![
        chore("b", "2024-02-10", Recurrence::default()),
        chore("a", "2024-02-01", Recurrence::daily(5)),
    ];
    let first = expand_occurrences(&chores, d("2024-02-01"), d("2024-02-15"));
    let ids: Vec<&str> = first.iter().map(|i| i.chore.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "a", "a"]);

    let second = expand_occurrences(&chores, d("2024-02-01"), d("2024-02-15"));
    assert_eq!(first, second);
}

#[test]
fn test_month_grid_includes_adjacent_days() {
    // March 2024 grid runs from Sunday 2024-02-25 to Saturday 2024-04-06.
    let chores = vec![chore("a", "2024-02-01", Recurrence::weekly(1, [0]))];
    let instances = instances_for_month(&chores, d("2024-03-15"));
    let got: Vec<NaiveDate> = instances.iter().map(|i| i.date).collect();
    assert_eq!(
        got,
        dates(&["2024-02-25", "2024-03-03", "2024-03-10", "2024-03-17", "2024-03-24", "2024-03-31"])
    );
}

#[test]
fn test_next_occurrence_one_off() {
    let c = chore("a", "2024-05-01", Recurrence::default());
    assert_eq!(next_occurrence(&c, d("2024-04-30")), Some(d("2024-05-01")));
    assert_eq!(next_occurrence(&c, d("2024-05-01")), None);
}

#[test]
fn test_next_occurrence_daily() {
    let c = chore("a", "2024-03-01", Recurrence::daily(3));
    assert_eq!(next_occurrence(&c, d("2024-03-10")), Some(d("2024-03-13")));
    assert_eq!(next_occurrence(&c, d("2024-03-09")), Some(d("2024-03-10")));
}

#[test]
fn test_next_occurrence_searches_from_day_after_anchor() {
    let c = chore("a", "2024-03-10", Recurrence::daily(1));
    assert_eq!(next_occurrence(&c, d("2024-03-01")), Some(d("2024-03-11")));
}

#[test]
fn test_next_occurrence_ignores_weekly_interval() {
    // 2024-01-08 is in a skipped week for an every-other-week rule.
    let c = chore("a", "2024-01-01", Recurrence::weekly(2, [1]));
    assert_eq!(next_occurrence(&c, d("2024-01-07")), Some(d("2024-01-08")));
    assert!(occurrences(&c, d("2024-01-08"), d("2024-01-08")).is_empty());
}

#[test]
fn test_next_occurrence_stops_at_end_date() {
    let c = chore("a", "2024-03-01", Recurrence::daily(1).until(d("2024-03-05")));
    assert_eq!(next_occurrence(&c, d("2024-03-04")), Some(d("2024-03-05")));
    assert_eq!(next_occurrence(&c, d("2024-03-05")), None);
}

#[test]
fn test_next_occurrence_horizon() {
    let c = chore("a", "2024-01-01", Recurrence::daily(400));
    assert_eq!(next_occurrence(&c, d("2024-01-01")), None);

    let c = chore("b", "2024-01-01", Recurrence::daily(365));
    assert_eq!(next_occurrence(&c, d("2024-01-01")), Some(d("2024-12-31")));

    let no_days = chore("c", "2024-01-01", Recurrence::weekly(1, []));
    assert_eq!(next_occurrence(&no_days, d("2024-01-01")), None);
}
