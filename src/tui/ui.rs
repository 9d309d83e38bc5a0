use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::commands::parse_hex_color;
use crate::dates::{each_day, month_grid_bounds, weekday_label};
use super::app::{App, InputMode};

/// Chore titles shown per grid cell before collapsing into "+N more".
const TITLES_PER_CELL: usize = 2;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Calendar + day list
            Constraint::Length(3)  // Help
        ].as_ref())
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
        .split(chunks[0]);

    render_month(f, app, body[0]);
    render_day(f, app, body[1]);

    let help_text = match app.input_mode {
        InputMode::Normal => {
            let base = "q: Quit | ←↑↓→/hjkl: Day | [ ]: Month | t: Today | Tab/J/K: Select | Space: Done | a: Add | d: Del | f: Filter";
            match &app.status {
                Some(s) => format!("{} | {}", s, base),
                None => base.to_string(),
            }
        }
        InputMode::Adding => "Enter: Save | Esc: Cancel".to_string(),
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[1]);

    if app.input_mode == InputMode::Adding {
        let area = centered_rect(60, 3, f.area());
        f.render_widget(Clear, area);
        let title = format!("Add Chore on {}: Enter Title", app.selected);
        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(input, area);
    }
}

fn render_month(f: &mut Frame, app: &App, area: Rect) {
    let instances = app.month_instances();
    let (grid_start, grid_end) = month_grid_bounds(app.selected);
    let days: Vec<_> = each_day(grid_start, grid_end).collect();

    let rows: Vec<Row> = days
        .chunks(7)
        .map(|week| {
            let cells = week.iter().map(|day| {
                let mut day_style = Style::default();
                if day.month() != app.selected.month() {
                    day_style = day_style.fg(Color::DarkGray);
                }
                if *day == app.today {
                    day_style = day_style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                }

                let mut lines = vec![Line::from(Span::styled(day.day().to_string(), day_style))];
                let on_day: Vec<_> = instances.iter().filter(|i| i.date == *day).collect();
                for inst in on_day.iter().take(TITLES_PER_CELL) {
                    let color = app
                        .member(inst.chore.assignee_id.as_deref())
                        .and_then(|m| parse_hex_color(&m.color))
                        .map(|(r, g, b)| Color::Rgb(r, g, b))
                        .unwrap_or(Color::Gray);
                    let mut style = Style::default().fg(color);
                    if inst.is_completed {
                        style = style.add_modifier(Modifier::CROSSED_OUT | Modifier::DIM);
                    }
                    lines.push(Line::from(Span::styled(inst.chore.title.clone(), style)));
                }
                if on_day.len() > TITLES_PER_CELL {
                    lines.push(Line::from(Span::styled(
                        format!("+{} more", on_day.len() - TITLES_PER_CELL),
                        Style::default().fg(Color::DarkGray),
                    )));
                }

                let cell = Cell::from(Text::from(lines));
                if *day == app.selected {
                    cell.style(Style::default().bg(Color::DarkGray))
                } else {
                    cell
                }
            });
            Row::new(cells).height(TITLES_PER_CELL as u16 + 2)
        })
        .collect();

    let widths = [Constraint::Ratio(1, 7); 7];
    let filter = match app.filters.category {
        Some(c) => format!(" [{}]", c),
        None => String::new(),
    };
    let table = Table::new(rows, widths)
        .header(Row::new((0..7).map(weekday_label))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(format!("Chorust - {}{}", app.selected.format("%B %Y"), filter)));

    f.render_widget(table, area);
}

fn render_day(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .day_instances()
        .iter()
        .map(|inst| {
            let mark = if inst.is_completed { "[x] " } else { "[ ] " };
            let assignee = app
                .member(inst.chore.assignee_id.as_deref())
                .map(|m| m.name.clone())
                .unwrap_or_else(|| "Unassigned".to_string());
            let style = if inst.is_completed {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(inst.chore.title.clone(), style),
                Span::styled(format!("  {} · {}", inst.chore.priority, assignee), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(app.selected.format("%A, %B %-d").to_string()))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(r.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(r.height.saturating_sub(height) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
