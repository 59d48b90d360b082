//! Event handling for the dashboard.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::app::{App, InputMode, Tab};

/// Handle keyboard events.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Global shortcuts (work in all modes)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if app.input_mode == InputMode::Normal => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Tab navigation
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_tab(),
        KeyCode::Char(c @ '1'..='4') => app.goto_tab(c as u8 - b'0'),

        // Tab-specific actions
        _ => match app.current_tab {
            Tab::Forecast => handle_forecast_tab_keys(app, key),
            Tab::Predict => handle_predict_tab_keys(app, key),
            Tab::About | Tab::Health => {}
        },
    }
}

fn handle_forecast_tab_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e') | KeyCode::Char('i') => start_editing(app),
        KeyCode::Char('f') | KeyCode::Enter => app.run_forecast(),
        _ => {}
    }
}

fn handle_predict_tab_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e') | KeyCode::Char('i') => start_editing(app),
        KeyCode::Char('p') | KeyCode::Enter => app.run_prediction(),
        KeyCode::Down | KeyCode::Char('j') => app.predict.focus = app.predict.focus.next(),
        KeyCode::Up | KeyCode::Char('k') => app.predict.focus = app.predict.focus.previous(),
        _ => {}
    }
}

fn start_editing(app: &mut App) {
    app.input_mode = InputMode::Editing;
    app.set_status("Editing... Enter to run, Esc to stop");
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            match app.current_tab {
                Tab::Forecast => app.run_forecast(),
                Tab::Predict => app.run_prediction(),
                Tab::About | Tab::Health => {}
            }
        }
        KeyCode::Tab | KeyCode::Down if app.current_tab == Tab::Predict => {
            app.predict.focus = app.predict.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up if app.current_tab == Tab::Predict => {
            app.predict.focus = app.predict.focus.previous();
        }
        KeyCode::Backspace => {
            if let Some(input) = app.active_input() {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.active_input() {
                input.push(c);
            }
        }
        _ => {}
    }
}

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
