//! Keyboard input handling for the TUI.
//!
//! Translates key events into application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, Tab, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Only quitting is possible behind the loading screen
    if app.showing_progress() {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app.state = AppState::ConfirmingQuit;
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('u') => app.refresh()?,
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(tab) = c.to_digit(10).and_then(Tab::from_number) {
                app.switch_tab(tab);
            }
        }
        KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => app.switch_tab(app.current_tab.next()),
        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
            app.switch_tab(app.current_tab.prev())
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next(1),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(1),
        KeyCode::PageDown => app.select_next(PAGE_SCROLL_SIZE),
        KeyCode::PageUp => app.select_prev(PAGE_SCROLL_SIZE),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Esc => app.status_message = None,
        _ => {}
    }

    Ok(false)
}
