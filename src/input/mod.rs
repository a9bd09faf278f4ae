//! Keyboard input: logical keys, the byte-stream decoder and the fixed bindings

pub mod decoder;
pub mod keybindings;

use std::io;
use std::time::Duration;

pub use decoder::KeyDecoder;
pub use keybindings::{action_for, Action};

/// A logical key produced by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable byte, tab, or any byte without a dedicated meaning
    Char(u8),
    /// Control chord, stored as the lowercase letter (`Ctrl('q')` is byte 0x11)
    /// or the punctuation of the caret form (`Ctrl('_')` is byte 0x1f)
    Ctrl(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Whether this key can be appended to a prompt's input
    pub fn printable_byte(self) -> Option<u8> {
        match self {
            Key::Char(byte) if byte.is_ascii() && !byte.is_ascii_control() => Some(byte),
            _ => None,
        }
    }
}

/// A source of raw input bytes that can wait with a timeout
pub trait ByteSource {
    /// Read one byte, or `None` if nothing arrived within `timeout`
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

/// Anything that yields logical keys
pub trait KeySource {
    /// Next key, or `None` if nothing arrived within `timeout`
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<Key>>;
}
