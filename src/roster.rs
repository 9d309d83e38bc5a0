//! Pure transformations over the chore and team collections.
//!
//! Each function takes the current collection by value and returns the new
//! one; callers decide when to persist the result.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::dates::format_date;
use crate::models::{Chore, TeamMember};

/// Default member colors, handed out in order.
pub const PALETTE: [&str; 10] = [
    "#4CAF50", "#2196F3", "#FF9800", "#9C27B0", "#E91E63",
    "#00BCD4", "#FF5722", "#3F51B5", "#009688", "#FFC107",
];

/// Returns a fresh opaque record id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn add_chore(mut chores: Vec<Chore>, chore: Chore) -> Vec<Chore> {
    chores.push(chore);
    chores
}

/// Replaces the chore with the same id. Unknown ids leave the list unchanged.
pub fn update_chore(chores: Vec<Chore>, updated: Chore) -> Vec<Chore> {
    chores
        .into_iter()
        .map(|c| if c.id == updated.id { updated.clone() } else { c })
        .collect()
}

pub fn remove_chore(chores: Vec<Chore>, chore_id: &str) -> Vec<Chore> {
    chores.into_iter().filter(|c| c.id != chore_id).collect()
}

/// Flips the completion state of one occurrence of a chore.
///
/// The date is not checked against the chore's recurrence.
pub fn toggle_completion(chores: Vec<Chore>, chore_id: &str, date: NaiveDate) -> Vec<Chore> {
    let key = format_date(date);
    chores
        .into_iter()
        .map(|mut c| {
            if c.id == chore_id && !c.completed_dates.remove(&key) {
                c.completed_dates.insert(key.clone());
            }
            c
        })
        .collect()
}

pub fn add_member(mut members: Vec<TeamMember>, member: TeamMember) -> Vec<TeamMember> {
    members.push(member);
    members
}

/// Removes a member and unassigns every chore that pointed at them.
pub fn remove_member(
    members: Vec<TeamMember>,
    chores: Vec<Chore>,
    member_id: &str,
) -> (Vec<TeamMember>, Vec<Chore>) {
    let members = members.into_iter().filter(|m| m.id != member_id).collect();
    let chores = chores
        .into_iter()
        .map(|mut c| {
            if c.assignee_id.as_deref() == Some(member_id) {
                c.assignee_id = None;
            }
            c
        })
        .collect();
    (members, chores)
}

/// First palette color no current member uses, cycling once all are taken.
pub fn next_color(members: &[TeamMember]) -> String {
    PALETTE
        .iter()
        .find(|color| !members.iter().any(|m| m.color.eq_ignore_ascii_case(color)))
        .unwrap_or(&PALETTE[members.len() % PALETTE.len()])
        .to_string()
}
