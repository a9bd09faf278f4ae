//! The fixed key-to-action table for normal mode
//!
//! Bindings are not configurable.

use super::Key;
use crate::cursor::Movement;

/// Editing actions that normal-mode keys resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Save,
    Find,
    Move(Movement),
    Home,
    End,
    PageUp,
    PageDown,
    InsertNewline,
    InsertChar(u8),
    /// Remove the byte before the cursor
    DeleteBackward,
    /// Remove the byte under the cursor
    DeleteForward,
    /// Consumed without effect
    None,
}

/// Resolve a key pressed in normal mode
pub fn action_for(key: Key) -> Action {
    match key {
        Key::Ctrl('q') => Action::Quit,
        Key::Ctrl('s') => Action::Save,
        Key::Ctrl('f') => Action::Find,
        Key::Ctrl('h') | Key::Backspace => Action::DeleteBackward,
        Key::Delete => Action::DeleteForward,
        Key::Enter => Action::InsertNewline,
        Key::ArrowLeft => Action::Move(Movement::Left),
        Key::ArrowRight => Action::Move(Movement::Right),
        Key::ArrowUp => Action::Move(Movement::Up),
        Key::ArrowDown => Action::Move(Movement::Down),
        Key::Home => Action::Home,
        Key::End => Action::End,
        Key::PageUp => Action::PageUp,
        Key::PageDown => Action::PageDown,
        Key::Char(byte) => Action::InsertChar(byte),
        // Ctrl-L, Escape and every other chord
        Key::Ctrl(_) | Key::Escape => Action::None,
    }
}

/// One-line summary of the bindings, shown at startup
pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";
