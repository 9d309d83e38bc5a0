use chorust::dates::parse_date;
use chorust::filters::Filters;
use chorust::models::{Category, Chore, Priority, Recurrence, TeamMember};
use chorust::recurrence::expand_occurrences;
use chorust::roster::*;

fn member(id: &str, color: &str) -> TeamMember {
    TeamMember { id: id.into(), name: id.to_uppercase(), color: color.into() }
}

fn chore(id: &str) -> Chore {
    Chore::new(id, format!("chore {}", id), parse_date("2024-01-01").unwrap())
}

#[test]
fn test_toggle_completion_adds_then_removes() {
    let date = parse_date("2024-01-08").unwrap();
    let chores = vec![chore("a"), chore("b")];

    let chores = toggle_completion(chores, "a", date);
    assert!(chores[0].is_completed_on(date));
    assert!(!chores[1].is_completed_on(date));

    let chores = toggle_completion(chores, "a", date);
    assert!(chores[0].completed_dates.is_empty());
}

#[test]
fn test_toggle_accepts_non_occurrence_dates() {
    // A one-off chore due 2024-01-01 can still be marked on another day.
    let date = parse_date("2024-02-02").unwrap();
    let chores = toggle_completion(vec![chore("a")], "a", date);
    assert!(chores[0].completed_dates.contains("2024-02-02"));
}

#[test]
fn test_update_and_remove_chore() {
    let chores = add_chore(add_chore(Vec::new(), chore("a")), chore("b"));
    assert_eq!(chores.len(), 2);

    let mut edited = chores[1].clone();
    edited.title = "renamed".into();
    let chores = update_chore(chores, edited);
    assert_eq!(chores[1].title, "renamed");

    let chores = update_chore(chores, chore("missing"));
    assert_eq!(chores.len(), 2);
    assert!(chores.iter().all(|c| c.id != "missing"));

    let chores = remove_chore(chores, "a");
    assert_eq!(chores.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn test_remove_member_unassigns_chores() {
    let members = add_member(vec![member("m1", "#4CAF50")], member("m2", "#2196F3"));
    let mut a = chore("a");
    a.assignee_id = Some("m1".into());
    let mut b = chore("b");
    b.assignee_id = Some("m2".into());

    let (members, chores) = remove_member(members, vec![a, b], "m1");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, "m2");
    assert_eq!(chores[0].assignee_id, None);
    assert_eq!(chores[1].assignee_id.as_deref(), Some("m2"));
}

#[test]
fn test_next_color_skips_used_and_cycles() {
    assert_eq!(next_color(&[]), PALETTE[0]);
    assert_eq!(next_color(&[member("a", "#4caf50")]), PALETTE[1]);
    assert_eq!(next_color(&[member("a", "#2196F3")]), PALETTE[0]);

    let full: Vec<TeamMember> = PALETTE.iter().enumerate().map(|(i, c)| member(&i.to_string(), c)).collect();
    assert_eq!(next_color(&full), PALETTE[0]);
    let mut more = full.clone();
    more.push(member("x", "#000000"));
    // With every palette color taken the member count picks the slot.
    assert_eq!(next_color(&more), PALETTE[1]);
}

#[test]
fn test_generated_ids_are_unique() {
    let a = generate_id();
    let b = generate_id();
    assert_ne!(a, b);
    assert_eq!(a.len(), 36);
}

#[test]
fn test_filters_narrow_instances() {
    let mut a = chore("a");
    a.category = Category::Cleaning;
    a.assignee_id = Some("m1".into());
    let mut b = chore("b").with_recurrence(Recurrence::daily(1));
    b.priority = Priority::High;
    let chores = vec![a, b];
    let day = parse_date("2024-01-01").unwrap();

    let all = expand_occurrences(&chores, day, day);
    assert_eq!(Filters::default().apply(all.clone()).len(), 2);

    let cleaning = Filters { category: Some(Category::Cleaning), ..Default::default() };
    assert_eq!(cleaning.apply(all.clone())[0].chore.id, "a");

    let high = Filters { priority: Some(Priority::High), ..Default::default() };
    assert_eq!(high.apply(all.clone())[0].chore.id, "b");

    let by_member = Filters { assignee_id: Some("m1".into()), ..Default::default() };
    let got = by_member.apply(all);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].chore.id, "a");
}

#[test]
fn test_cycle_category_filter() {
    let mut f = Filters::default();
    let mut seen = Vec::new();
    for _ in 0..5 {
        f.cycle_category();
        seen.push(f.category);
    }
    assert_eq!(
        seen,
        vec![
            Some(Category::Cleaning),
            Some(Category::Admin),
            Some(Category::Maintenance),
            Some(Category::Other),
            None,
        ]
    );
    assert!(f.is_empty());
}
