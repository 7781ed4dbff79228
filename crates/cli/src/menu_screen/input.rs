//! Mapping of terminal key events to menu and editor keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rust_menus_core::navigation::Key;

use super::types::EditorKey;

fn is_cancel(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc => true,
        KeyCode::Char('c' | 'q') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Key of the menu screen for a terminal event, if it has one.
#[must_use]
pub fn menu_key(event: &KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    if is_cancel(event) {
        return Some(Key::Cancel);
    }

    let control = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Char('e') if control => Some(Key::ToggleMode),
        KeyCode::Char('r') if control => Some(Key::ShowResults),
        KeyCode::Char(_) if control || event.modifiers.contains(KeyModifiers::ALT) => None,
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        _ => None,
    }
}

/// Key of the value editor for a terminal event, if it has one.
#[must_use]
pub fn editor_key(event: &KeyEvent) -> Option<EditorKey> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    if is_cancel(event) {
        return Some(EditorKey::Cancel);
    }

    match event.code {
        KeyCode::Char(_) if event.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char(c) => Some(EditorKey::Char(c)),
        KeyCode::Backspace => Some(EditorKey::Backspace),
        KeyCode::Up | KeyCode::BackTab => Some(EditorKey::Up),
        KeyCode::Down => Some(EditorKey::Down),
        KeyCode::Tab => Some(EditorKey::Tab),
        KeyCode::Enter => Some(EditorKey::Enter),
        _ => None,
    }
}
