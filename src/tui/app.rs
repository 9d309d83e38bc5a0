use chrono::{Local, Months, NaiveDate};
use ratatui::widgets::ListState;

use crate::commands::{cmd_add, cmd_remove, cmd_toggle, ChoreOptions};
use crate::dates::{add_days, format_date};
use crate::filters::Filters;
use crate::models::{Chore, ChoreInstance, TeamMember};
use crate::recurrence::{expand_occurrences, instances_for_month};
use crate::storage::Store;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Adding,
}

pub struct App {
    pub store: Store,
    pub chores: Vec<Chore>,
    pub members: Vec<TeamMember>,
    pub today: NaiveDate,
    /// Day highlighted in the grid; the grid shows its month.
    pub selected: NaiveDate,
    pub filters: Filters,
    pub list_state: ListState,
    pub input_mode: InputMode,
    pub input_buffer: String,
    /// Last command result, shown in the help bar.
    pub status: Option<String>,
}

impl App {
    /// Creates a new App instance and loads initial data.
    pub fn new(store: Store) -> App {
        let today = Local::now().date_naive();
        let mut app = App {
            store,
            chores: Vec::new(),
            members: Vec::new(),
            today,
            selected: today,
            filters: Filters::default(),
            list_state: ListState::default(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            status: None,
        };
        app.reload();
        app
    }

    /// Reloads chores and members from storage and clamps the list selection.
    pub fn reload(&mut self) {
        self.chores = self.store.load_chores();
        self.members = self.store.load_members();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.day_instances().len();
        if len == 0 {
            self.list_state.select(None);
        } else if let Some(i) = self.list_state.selected() {
            if i >= len {
                self.list_state.select(Some(len - 1));
            }
        } else {
            self.list_state.select(Some(0));
        }
    }

    /// Instances visible in the current month grid, after filters.
    pub fn month_instances(&self) -> Vec<ChoreInstance<'_>> {
        self.filters.apply(instances_for_month(&self.chores, self.selected))
    }

    /// Instances due on the selected day, after filters.
    pub fn day_instances(&self) -> Vec<ChoreInstance<'_>> {
        self.filters.apply(expand_occurrences(&self.chores, self.selected, self.selected))
    }

    pub fn member(&self, id: Option<&str>) -> Option<&TeamMember> {
        id.and_then(|id| self.members.iter().find(|m| m.id == id))
    }

    /// Moves the selected day by `n` days.
    pub fn move_days(&mut self, n: i64) {
        if let Some(d) = add_days(self.selected, n) {
            self.selected = d;
            self.list_state.select(None);
            self.clamp_selection();
        }
    }

    pub fn next_month(&mut self) {
        if let Some(d) = self.selected.checked_add_months(Months::new(1)) {
            self.selected = d;
            self.list_state.select(None);
            self.clamp_selection();
        }
    }

    pub fn previous_month(&mut self) {
        if let Some(d) = self.selected.checked_sub_months(Months::new(1)) {
            self.selected = d;
            self.list_state.select(None);
            self.clamp_selection();
        }
    }

    pub fn go_today(&mut self) {
        self.selected = self.today;
        self.list_state.select(None);
        self.clamp_selection();
    }

    /// Selects the next item in the day list.
    pub fn next(&mut self) {
        let len = self.day_instances().len();
        if len == 0 { return; }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Selects the previous item in the day list.
    pub fn previous(&mut self) {
        let len = self.day_instances().len();
        if len == 0 { return; }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_chore_id(&self) -> Option<String> {
        let i = self.list_state.selected()?;
        self.day_instances().get(i).map(|inst| inst.chore.id.clone())
    }

    /// Toggles completion of the selected chore on the selected day.
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_chore_id() {
            let date = format_date(self.selected);
            self.status = Some(match cmd_toggle(&self.store, &id, &date, true) {
                Ok(true) => format!("Marked done on {}", date),
                Ok(false) => format!("Marked pending on {}", date),
                Err(e) => e.to_string(),
            });
            self.reload();
        }
    }

    /// Deletes the selected chore (all of its occurrences).
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_chore_id() {
            if let Err(e) = cmd_remove(&self.store, &id, true) {
                self.status = Some(e.to_string());
            }
            self.reload();
        }
    }

    pub fn cycle_filter(&mut self) {
        self.filters.cycle_category();
        self.list_state.select(None);
        self.clamp_selection();
    }

    /// Starts entering the title of a one-off chore due on the selected day.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input_buffer.clear();
    }

    /// Handles text input based on the current mode.
    pub fn handle_input(&mut self) {
        if self.input_mode == InputMode::Adding && !self.input_buffer.trim().is_empty() {
            let title = self.input_buffer.clone();
            let due = format_date(self.selected);
            if let Err(e) = cmd_add(&self.store, title, &due, ChoreOptions::default(), true) {
                self.status = Some(e.to_string());
            }
            self.reload();
        }
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }
}
