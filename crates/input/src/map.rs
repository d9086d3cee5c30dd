//! Key mapping from terminal events to UI actions.

use crate::types::UiAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to UI actions.
pub fn handle_key_event(key: KeyEvent) -> Option<UiAction> {
    match key.code {
        // Cursor
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(UiAction::CursorUp),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(UiAction::CursorDown),
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(UiAction::CursorLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(UiAction::CursorRight),

        // Drops
        KeyCode::Char(' ') | KeyCode::Enter => Some(UiAction::PlacePending),
        KeyCode::Char('m')
        | KeyCode::Char('M')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(UiAction::PickUp),
        KeyCode::Esc => Some(UiAction::Cancel),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
