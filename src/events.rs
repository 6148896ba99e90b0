use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;

/// File written by the in-app export key.
pub const EXPORT_PATH: &str = "dashboard_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ignore key releases on terminals that report them
    if key.kind == KeyEventKind::Release {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),

        // Theme
        KeyCode::Char('t') => {
            app.toggle_theme();
            let mode = if app.dark_mode { "dark" } else { "light" };
            app.set_status_message(format!("Switched to {} theme", mode));
        }

        // Line selection
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.select_prev(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.select_next(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(index) = c.to_digit(10) {
                app.select_line(index as usize - 1);
            }
        }

        // Detail overlay
        KeyCode::Enter => app.enter_detail(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Poll immediately
        KeyCode::Char('r') => {
            app.reload_data();
        }

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from(EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}
