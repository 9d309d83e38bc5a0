pub mod app;
pub mod ui;

use std::{error::Error, io};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use app::{App, InputMode};
use ui::ui;

use crate::storage::Store;

pub fn run_tui(store: Store) -> Result<(), Box<dyn Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "calendar view exited with an error");
        return Err(err.into());
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Left | KeyCode::Char('h') => app.move_days(-1),
                    KeyCode::Right | KeyCode::Char('l') => app.move_days(1),
                    KeyCode::Up | KeyCode::Char('k') => app.move_days(-7),
                    KeyCode::Down | KeyCode::Char('j') => app.move_days(7),
                    KeyCode::Char('[') => app.previous_month(),
                    KeyCode::Char(']') => app.next_month(),
                    KeyCode::Char('t') => app.go_today(),
                    KeyCode::Tab | KeyCode::Char('J') => app.next(),
                    KeyCode::BackTab | KeyCode::Char('K') => app.previous(),
                    KeyCode::Char(' ') => app.toggle_selected(),
                    KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                    KeyCode::Char('a') => app.start_add(),
                    KeyCode::Char('f') => app.cycle_filter(),
                    _ => {}
                },
                InputMode::Adding => match key.code {
                    KeyCode::Enter => app.handle_input(),
                    KeyCode::Esc => {
                        app.input_mode = InputMode::Normal;
                        app.input_buffer.clear();
                    }
                    KeyCode::Char(c) => {
                        app.input_buffer.push(c);
                    }
                    KeyCode::Backspace => {
                        app.input_buffer.pop();
                    }
                    _ => {}
                }
            }
        }
    }
}
