use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::format_date;
use crate::error::ChoreError;

/// Kind of work a chore represents.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cleaning,
    Admin,
    Maintenance,
    #[default]
    Other,
}

/// How important a chore is.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Recurrence rule kinds supported by the engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    #[default]
    None,
    Daily,
    Weekly,
}

/// Recurrence rule embedded in a chore.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    #[serde(rename = "type")]
    pub kind: RecurrenceType,
    /// Step in days (daily) or weeks (weekly).
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Weekday numbers, 0 = Sunday. Only used by weekly rules.
    #[serde(default)]
    pub days_of_week: BTreeSet<u8>,
    /// Last day an occurrence may fall on.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

fn default_interval() -> u32 {
    1
}

impl Default for Recurrence {
    fn default() -> Self {
        Recurrence {
            kind: RecurrenceType::None,
            interval: default_interval(),
            days_of_week: BTreeSet::new(),
            end_date: None,
        }
    }
}

impl Recurrence {
    pub fn daily(interval: u32) -> Self {
        Recurrence { kind: RecurrenceType::Daily, interval, ..Default::default() }
    }

    pub fn weekly(interval: u32, days: impl IntoIterator<Item = u8>) -> Self {
        Recurrence {
            kind: RecurrenceType::Weekly,
            interval,
            days_of_week: days.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Human readable summary, e.g. `every 2 weeks on Mon, Thu until 2024-06-30`.
    pub fn describe(&self) -> String {
        let mut s = match self.kind {
            RecurrenceType::None => return "once".to_string(),
            RecurrenceType::Daily if self.interval == 1 => "daily".to_string(),
            RecurrenceType::Daily => format!("every {} days", self.interval),
            RecurrenceType::Weekly => {
                let days: Vec<&str> = self.days_of_week.iter().map(|d| crate::dates::weekday_label(*d)).collect();
                let every = if self.interval == 1 { "weekly".to_string() } else { format!("every {} weeks", self.interval) };
                format!("{} on {}", every, if days.is_empty() { "-".to_string() } else { days.join(", ") })
            }
        };
        if let Some(end) = self.end_date {
            s.push_str(&format!(" until {}", end));
        }
        s
    }
}

/// A chore definition, the unit persisted by the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    /// Opaque unique identifier.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Weak reference to a team member.
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    /// Anchor date of the recurrence, or the single due date.
    pub due_date: NaiveDate,
    #[serde(default)]
    pub recurrence: Recurrence,
    /// ISO date keys of completed occurrences.
    #[serde(default)]
    pub completed_dates: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

impl Chore {
    /// Creates a one-off chore with the default category and priority.
    pub fn new(id: impl Into<String>, title: impl Into<String>, due_date: NaiveDate) -> Self {
        Chore {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            assignee_id: None,
            category: Category::default(),
            priority: Priority::default(),
            due_date,
            recurrence: Recurrence::default(),
            completed_dates: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&format_date(date))
    }
}

/// A person chores can be assigned to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    /// Display color as `#RRGGBB`.
    pub color: String,
}

/// One dated occurrence of a chore. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoreInstance<'a> {
    pub chore: &'a Chore,
    pub date: NaiveDate,
    pub is_completed: bool,
}

impl ChoreInstance<'_> {
    pub fn date_key(&self) -> String {
        format_date(self.date)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Cleaning => "Cleaning",
            Category::Admin => "Admin",
            Category::Maintenance => "Maintenance",
            Category::Other => "Other",
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        })
    }
}

impl FromStr for Category {
    type Err = ChoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cleaning" => Ok(Category::Cleaning),
            "admin" => Ok(Category::Admin),
            "maintenance" => Ok(Category::Maintenance),
            "other" => Ok(Category::Other),
            _ => Err(ChoreError::UnknownValue { kind: "category", value: s.to_string() }),
        }
    }
}

impl FromStr for Priority {
    type Err = ChoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ChoreError::UnknownValue { kind: "priority", value: s.to_string() }),
        }
    }
}

impl FromStr for RecurrenceType {
    type Err = ChoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "once" => Ok(RecurrenceType::None),
            "daily" => Ok(RecurrenceType::Daily),
            "weekly" => Ok(RecurrenceType::Weekly),
            _ => Err(ChoreError::UnknownValue { kind: "recurrence", value: s.to_string() }),
        }
    }
}
