use crate::models::{Category, Chore, ChoreInstance, Priority};

/// Narrowing applied to calendar and day views. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub assignee_id: Option<String>,
}

impl Filters {
    pub fn matches(&self, chore: &Chore) -> bool {
        self.category.map_or(true, |c| chore.category == c)
            && self.priority.map_or(true, |p| chore.priority == p)
            && self
                .assignee_id
                .as_deref()
                .map_or(true, |id| chore.assignee_id.as_deref() == Some(id))
    }

    pub fn apply<'a>(&self, instances: Vec<ChoreInstance<'a>>) -> Vec<ChoreInstance<'a>> {
        instances.into_iter().filter(|i| self.matches(i.chore)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.priority.is_none() && self.assignee_id.is_none()
    }

    /// Advances the category filter: all, cleaning, admin, maintenance, other, all.
    pub fn cycle_category(&mut self) {
        self.category = match self.category {
            None => Some(Category::Cleaning),
            Some(Category::Cleaning) => Some(Category::Admin),
            Some(Category::Admin) => Some(Category::Maintenance),
            Some(Category::Maintenance) => Some(Category::Other),
            Some(Category::Other) => None,
        };
    }
}
