use std::io::{self, Write};

use chrono::{Datelike, Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use tracing::info;

use crate::dates::{self, parse_date, parse_month, parse_weekdays, weekday_number};
use crate::error::{ChoreError, Result};
use crate::filters::Filters;
use crate::models::{Category, Chore, ChoreInstance, Priority, Recurrence, RecurrenceType, TeamMember};
use crate::recurrence::{expand_occurrences, instances_for_month, next_occurrence};
use crate::roster::{self, generate_id, next_color};
use crate::storage::Store;

/// Upper bound for the repeat interval accepted from user input.
pub const MAX_INTERVAL: u32 = 30;

/// Optional chore fields shared by `add` and `edit`.
#[derive(Debug, Clone, Default)]
pub struct ChoreOptions {
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    /// Member id, id prefix or name.
    pub assignee: Option<String>,
    pub recur: Option<RecurrenceType>,
    pub every: Option<u32>,
    /// Comma separated weekdays, e.g. `mon,thu`.
    pub days: Option<String>,
    pub until: Option<String>,
}

/// Filter arguments as typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
}

/// Adds a new chore and returns its id.
///
/// Weekly chores without explicit weekdays repeat on the due date's weekday.
pub fn cmd_add(store: &Store, title: String, due: &str, opts: ChoreOptions, silent: bool) -> Result<String> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(ChoreError::EmptyTitle);
    }
    let due_date = parse_date(due)?;
    let members = store.load_members();

    let mut chore = Chore::new(generate_id(), title, due_date);
    if let Some(d) = opts.description.clone() {
        chore.description = d.trim().to_string();
    }
    chore.category = opts.category.unwrap_or_default();
    chore.priority = opts.priority.unwrap_or_default();
    if let Some(a) = &opts.assignee {
        chore.assignee_id = Some(resolve_member(&members, a)?.id.clone());
    }
    chore.recurrence = apply_recurrence_options(Recurrence::default(), due_date, &opts, false)?;

    let id = chore.id.clone();
    info!(id = %id, title = %chore.title, recurrence = %chore.recurrence.describe(), "adding chore");
    let chores = roster::add_chore(store.load_chores(), chore);
    store.save_chores(&chores)?;
    if !silent { println!("Chore added (id = {})", short_id(&id)); }
    Ok(id)
}

/// Edits an existing chore. Only the provided fields change.
#[allow(clippy::too_many_arguments)]
pub fn cmd_edit(
    store: &Store,
    id: &str,
    title: Option<String>,
    due: Option<String>,
    opts: ChoreOptions,
    clear_until: bool,
    unassign: bool,
    silent: bool,
) -> Result<()> {
    let chores = store.load_chores();
    let members = store.load_members();
    let mut chore = find_chore(&chores, id)?.clone();

    if let Some(t) = title {
        let t = t.trim().to_string();
        if t.is_empty() {
            return Err(ChoreError::EmptyTitle);
        }
        chore.title = t;
    }
    if let Some(d) = due {
        chore.due_date = parse_date(&d)?;
    }
    if let Some(d) = opts.description.clone() { chore.description = d.trim().to_string(); }
    if let Some(c) = opts.category { chore.category = c; }
    if let Some(p) = opts.priority { chore.priority = p; }
    if unassign {
        chore.assignee_id = None;
    } else if let Some(a) = &opts.assignee {
        chore.assignee_id = Some(resolve_member(&members, a)?.id.clone());
    }
    chore.recurrence = apply_recurrence_options(chore.recurrence.clone(), chore.due_date, &opts, clear_until)?;

    info!(id = %chore.id, "updating chore");
    let short = short_id(&chore.id).to_string();
    let chores = roster::update_chore(chores, chore);
    store.save_chores(&chores)?;
    if !silent { println!("Chore {} updated.", short); }
    Ok(())
}

/// Removes a chore by id or id prefix.
pub fn cmd_remove(store: &Store, id: &str, silent: bool) -> Result<()> {
    let chores = store.load_chores();
    let full_id = find_chore(&chores, id)?.id.clone();
    let chores = roster::remove_chore(chores, &full_id);
    store.save_chores(&chores)?;
    info!(id = %full_id, "removed chore");
    if !silent { println!("Chore {} removed.", short_id(&full_id)); }
    Ok(())
}

/// Toggles completion of one occurrence and returns the new state.
pub fn cmd_toggle(store: &Store, id: &str, date: &str, silent: bool) -> Result<bool> {
    let date = parse_date(date)?;
    let chores = store.load_chores();
    let full_id = find_chore(&chores, id)?.id.clone();
    let chores = roster::toggle_completion(chores, &full_id, date);
    let done = chores
        .iter()
        .find(|c| c.id == full_id)
        .is_some_and(|c| c.is_completed_on(date));
    store.save_chores(&chores)?;
    info!(id = %full_id, %date, done, "toggled completion");
    if !silent {
        let state = if done { "done" } else { "pending" };
        println!("Chore {} on {} marked as {}.", short_id(&full_id), date, state);
    }
    Ok(done)
}

/// Prints and returns the next occurrence strictly after `after` (default: today).
pub fn cmd_next(store: &Store, id: &str, after: Option<String>) -> Result<Option<NaiveDate>> {
    let after = match after {
        Some(a) => parse_date(&a)?,
        None => Local::now().date_naive(),
    };
    let chores = store.load_chores();
    let chore = find_chore(&chores, id)?;
    let next = next_occurrence(chore, after);
    match next {
        Some(d) => println!("{}: next on {} ({})", chore.title, d, dates::weekday_label(weekday_number(d))),
        None => println!("{}: no occurrence after {}", chore.title, after),
    }
    Ok(next)
}

/// Lists every chore with its rule and next occurrence.
pub fn cmd_list(store: &Store) {
    let chores = store.load_chores();
    if chores.is_empty() {
        println!("No chores found.");
        return;
    }
    let members = store.load_members();
    let today = Local::now().date_naive();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Assignee").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Repeats").add_attribute(Attribute::Bold),
            Cell::new("Next").add_attribute(Attribute::Bold),
        ]);

    for c in &chores {
        let next = next_occurrence(c, today).map(|d| d.to_string()).unwrap_or_else(|| "-".into());
        table.add_row(vec![
            Cell::new(short_id(&c.id)),
            Cell::new(&c.title),
            Cell::new(c.category),
            Cell::new(c.priority).fg(priority_color(c.priority)),
            assignee_cell(&members, c),
            Cell::new(c.due_date),
            Cell::new(c.recurrence.describe()),
            Cell::new(next),
        ]);
    }

    println!("{table}");
}

/// Prints the month grid for `month` (`YYYY-MM`, default: current month).
pub fn cmd_calendar(store: &Store, month: Option<String>, filter: FilterArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let month = match month {
        Some(m) => parse_month(&m)?,
        None => today,
    };
    let chores = store.load_chores();
    let members = store.load_members();
    let filters = resolve_filters(&members, filter)?;
    let instances = filters.apply(instances_for_month(&chores, month));

    let (first, _) = dates::month_bounds(month);
    let (grid_start, grid_end) = dates::month_grid_bounds(month);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header((0..7).map(|d| Cell::new(dates::weekday_label(d)).add_attribute(Attribute::Bold)));

    let days: Vec<NaiveDate> = dates::each_day(grid_start, grid_end).collect();
    for week in days.chunks(7) {
        table.add_row(week.iter().map(|day| {
            let mut lines = vec![if *day == today { format!("{}*", day.format("%d")) } else { day.format("%d").to_string() }];
            lines.extend(instances.iter().filter(|i| i.date == *day).map(|i| {
                format!("{} {}", if i.is_completed { "✓" } else { "•" }, i.chore.title)
            }));
            let cell = Cell::new(lines.join("\n"));
            if day.year() == first.year() && day.month() == first.month() {
                cell
            } else {
                cell.fg(Color::DarkGrey)
            }
        }));
    }

    println!("{}", month.format("%B %Y"));
    println!("{table}");
    Ok(())
}

/// Lists the chore instances due on a single date.
pub fn cmd_day(store: &Store, date: &str, filter: FilterArgs) -> Result<()> {
    let date = parse_date(date)?;
    let chores = store.load_chores();
    let members = store.load_members();
    let filters = resolve_filters(&members, filter)?;
    let instances = filters.apply(expand_occurrences(&chores, date, date));

    println!("{}", date.format("%A, %B %-d, %Y"));
    if instances.is_empty() {
        println!("No chores scheduled.");
        return Ok(());
    }
    println!("{}", day_table(&members, &instances));
    Ok(())
}

fn day_table(members: &[TeamMember], instances: &[ChoreInstance<'_>]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Title", "Category", "Priority", "Assignee", "Status"]);
    let mut sorted: Vec<&ChoreInstance<'_>> = instances.iter().collect();
    sorted.sort_by(|a, b| b.chore.priority.cmp(&a.chore.priority).then_with(|| a.chore.title.cmp(&b.chore.title)));
    for i in sorted {
        let (status, color) = if i.is_completed { ("Done", Color::Green) } else { ("Pending", Color::Yellow) };
        table.add_row(vec![
            Cell::new(short_id(&i.chore.id)),
            Cell::new(&i.chore.title),
            Cell::new(i.chore.category),
            Cell::new(i.chore.priority).fg(priority_color(i.chore.priority)),
            assignee_cell(members, i.chore),
            Cell::new(status).fg(color),
        ]);
    }
    table
}

/// Adds a team member, picking the next free palette color if none is given.
pub fn cmd_member_add(store: &Store, name: String, color: Option<String>, silent: bool) -> Result<String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(ChoreError::EmptyName);
    }
    let members = store.load_members();
    let member = TeamMember {
        id: generate_id(),
        name,
        color: color.unwrap_or_else(|| next_color(&members)),
    };
    let id = member.id.clone();
    info!(id = %id, name = %member.name, color = %member.color, "adding team member");
    if !silent { println!("Team member '{}' added (id = {}).", member.name, short_id(&id)); }
    let members = roster::add_member(members, member);
    store.save_members(&members)?;
    Ok(id)
}

pub fn cmd_member_list(store: &Store) {
    let members = store.load_members();
    if members.is_empty() {
        println!("No team members yet.");
        return;
    }
    let chores = store.load_chores();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["ID", "Name", "Color", "Chores"]);
    for m in &members {
        let assigned = chores.iter().filter(|c| c.assignee_id.as_deref() == Some(m.id.as_str())).count();
        let cell = match parse_hex_color(&m.color) {
            Some((r, g, b)) => Cell::new(&m.color).fg(Color::Rgb { r, g, b }),
            None => Cell::new(&m.color),
        };
        table.add_row(vec![Cell::new(short_id(&m.id)), Cell::new(&m.name), cell, Cell::new(assigned)]);
    }
    println!("{table}");
}

/// Removes a team member and unassigns their chores.
pub fn cmd_member_remove(store: &Store, id: &str, silent: bool) -> Result<()> {
    let members = store.load_members();
    let member = resolve_member(&members, id)?;
    let (full_id, name) = (member.id.clone(), member.name.clone());
    let (members, chores) = roster::remove_member(members, store.load_chores(), &full_id);
    store.save_members(&members)?;
    store.save_chores(&chores)?;
    info!(id = %full_id, "removed team member");
    if !silent { println!("Team member '{}' removed.", name); }
    Ok(())
}

/// Resets the store by deleting all chores and team members.
pub fn cmd_reset(store: &Store, force: bool) -> Result<()> {
    if !force {
        print!("Are you sure you want to delete all chores and team members? This cannot be undone. [y/N] ");
        io::stdout().flush().map_err(|source| io_error(store, source))?;
        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(|source| io_error(store, source))?;
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return Ok(());
        }
    }
    store.reset()?;
    println!("Database reset successfully.");
    Ok(())
}

fn io_error(store: &Store, source: io::Error) -> ChoreError {
    crate::error::StorageError::Io { path: store.dir().to_path_buf(), source }.into()
}

/// Finds a chore by exact id or unique id prefix.
pub fn find_chore<'a>(chores: &'a [Chore], id: &str) -> Result<&'a Chore> {
    if let Some(c) = chores.iter().find(|c| c.id == id) {
        return Ok(c);
    }
    let mut matches = chores.iter().filter(|c| !id.is_empty() && c.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(c), None) => Ok(c),
        (Some(_), Some(_)) => Err(ChoreError::AmbiguousId(id.to_string())),
        _ => Err(ChoreError::ChoreNotFound(id.to_string())),
    }
}

/// Finds a member by exact id, unique id prefix, or case-insensitive name.
pub fn resolve_member<'a>(members: &'a [TeamMember], key: &str) -> Result<&'a TeamMember> {
    if let Some(m) = members.iter().find(|m| m.id == key || m.name.eq_ignore_ascii_case(key.trim())) {
        return Ok(m);
    }
    let mut matches = members.iter().filter(|m| !key.is_empty() && m.id.starts_with(key));
    match (matches.next(), matches.next()) {
        (Some(m), None) => Ok(m),
        (Some(_), Some(_)) => Err(ChoreError::AmbiguousId(key.to_string())),
        _ => Err(ChoreError::MemberNotFound(key.to_string())),
    }
}

pub fn resolve_filters(members: &[TeamMember], args: FilterArgs) -> Result<Filters> {
    let assignee_id = match args.assignee {
        Some(a) => Some(resolve_member(members, &a)?.id.clone()),
        None => None,
    };
    Ok(Filters { category: args.category, priority: args.priority, assignee_id })
}

/// Merges recurrence options into `rule`.
fn apply_recurrence_options(
    mut rule: Recurrence,
    due_date: NaiveDate,
    opts: &ChoreOptions,
    clear_until: bool,
) -> Result<Recurrence> {
    if let Some(kind) = opts.recur {
        rule.kind = kind;
    }
    if let Some(every) = opts.every {
        if !(1..=MAX_INTERVAL).contains(&every) {
            return Err(ChoreError::InvalidInterval(every));
        }
        rule.interval = every;
    }
    if let Some(days) = &opts.days {
        rule.days_of_week = parse_weekdays(days)?.into_iter().collect();
    }
    if rule.kind == RecurrenceType::Weekly && rule.days_of_week.is_empty() {
        rule.days_of_week.insert(weekday_number(due_date));
    }
    if clear_until {
        rule.end_date = None;
    } else if let Some(until) = &opts.until {
        rule.end_date = Some(parse_date(until)?);
    }
    Ok(rule)
}

/// First eight characters of an id, enough to type back as a prefix.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Parses `#RRGGBB` into its components.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let h = hex.trim().strip_prefix('#')?;
    if h.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(h.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

fn assignee_cell(members: &[TeamMember], chore: &Chore) -> Cell {
    let member = chore
        .assignee_id
        .as_deref()
        .and_then(|id| members.iter().find(|m| m.id == id));
    match member {
        Some(m) => match parse_hex_color(&m.color) {
            Some((r, g, b)) => Cell::new(&m.name).fg(Color::Rgb { r, g, b }),
            None => Cell::new(&m.name),
        },
        None => Cell::new("Unassigned").fg(Color::DarkGrey),
    }
}
