//! Single-line input shown in the message bar (save-as, search)

use crate::input::Key;
use crate::search::SearchSession;

/// What the prompt is collecting input for
#[derive(Debug, Clone)]
pub enum PromptKind {
    SaveAs,
    /// Incremental search, carrying its match state
    Search(SearchSession),
}

/// Result of feeding one key to a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still collecting input
    Pending,
    /// Enter with non-empty input
    Confirmed,
    /// Escape
    Cancelled,
}

/// Transient line-edit state; dropped when the prompt completes or is cancelled
#[derive(Debug, Clone)]
pub struct PromptSession {
    pub kind: PromptKind,
    input: Vec<u8>,
}

impl PromptSession {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: Vec::new(),
        }
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn input_lossy(&self) -> String {
        String::from_utf8_lossy(&self.input).into_owned()
    }

    /// Apply a key to the input line
    pub fn handle_key(&mut self, key: Key) -> PromptOutcome {
        match key {
            Key::Backspace | Key::Delete | Key::Ctrl('h') => {
                self.input.pop();
                PromptOutcome::Pending
            }
            Key::Escape => PromptOutcome::Cancelled,
            Key::Enter if !self.input.is_empty() => PromptOutcome::Confirmed,
            _ => {
                if let Some(byte) = key.printable_byte() {
                    self.input.push(byte);
                }
                PromptOutcome::Pending
            }
        }
    }

    /// Text for the message bar
    pub fn message(&self) -> String {
        match self.kind {
            PromptKind::SaveAs => format!("Save as: {}", self.input_lossy()),
            PromptKind::Search(_) => {
                format!("Search: {} (Use ESC/Arrows/Enter)", self.input_lossy())
            }
        }
    }
}
