//! Decoding terminal bytes into [`Key`]s
//!
//! Escape sequences are decoded best-effort. A lone ESC, or a sequence that
//! stalls or is not recognised, comes out as [`Key::Escape`].

use super::{ByteSource, Key, KeySource};
use std::io;
use std::time::Duration;

const ESC: u8 = 0x1b;
const BACKSPACE: u8 = 127;

/// How long to wait for the rest of an escape sequence after ESC
pub const DEFAULT_SEQUENCE_TIMEOUT: Duration = Duration::from_millis(100);

/// Turns a [`ByteSource`] into a stream of keys
#[derive(Debug)]
pub struct KeyDecoder<S> {
    source: S,
    sequence_timeout: Duration,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            sequence_timeout: DEFAULT_SEQUENCE_TIMEOUT,
        }
    }

    pub fn with_sequence_timeout(mut self, timeout: Duration) -> Self {
        self.sequence_timeout = timeout;
        self
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn next_in_sequence(&mut self) -> io::Result<Option<u8>> {
        self.source.read_byte(self.sequence_timeout)
    }

    /// Decode what follows an ESC byte
    fn decode_escape(&mut self) -> io::Result<Key> {
        let Some(first) = self.next_in_sequence()? else {
            return Ok(Key::Escape);
        };
        let Some(second) = self.next_in_sequence()? else {
            return Ok(Key::Escape);
        };

        let key = match (first, second) {
            (b'[', b'0'..=b'8') => {
                let Some(b'~') = self.next_in_sequence()? else {
                    return Ok(Key::Escape);
                };
                match second {
                    b'1' | b'7' => Key::Home,
                    b'3' => Key::Delete,
                    b'4' | b'8' => Key::End,
                    b'5' => Key::PageUp,
                    b'6' => Key::PageDown,
                    _ => Key::Escape,
                }
            }
            (b'[', b'A') => Key::ArrowUp,
            (b'[', b'B') => Key::ArrowDown,
            (b'[', b'C') => Key::ArrowRight,
            (b'[', b'D') => Key::ArrowLeft,
            (b'[' | b'O', b'H') => Key::Home,
            (b'[' | b'O', b'F') => Key::End,
            _ => Key::Escape,
        };
        Ok(key)
    }
}

/// Map a single non-escape byte to a key
pub fn decode_byte(byte: u8) -> Key {
    match byte {
        b'\r' => Key::Enter,
        b'\t' => Key::Char(b'\t'),
        BACKSPACE => Key::Backspace,
        ESC => Key::Escape,
        0x01..=0x1a => Key::Ctrl(char::from(byte - 1 + b'a')),
        // Ctrl-@, Ctrl-\, Ctrl-], Ctrl-^ and Ctrl-_
        0x00 | 0x1c..=0x1f => Key::Ctrl(char::from(byte + b'@')),
        _ => Key::Char(byte),
    }
}

impl<S: ByteSource> KeySource for KeyDecoder<S> {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        let Some(byte) = self.source.read_byte(timeout)? else {
            return Ok(None);
        };
        let key = if byte == ESC {
            self.decode_escape()?
        } else {
            decode_byte(byte)
        };
        tracing::trace!("Decoded {:?} from leading byte {:#04x}", key, byte);
        Ok(Some(key))
    }
}

/// Parse a cursor position report `ESC [ rows ; cols R` into `(rows, cols)`
///
/// The trailing `R` may be omitted, since readers usually stop on it.
pub fn parse_cursor_report(report: &[u8]) -> Option<(u16, u16)> {
    let body = report.strip_prefix(&[ESC, b'['])?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

/// In-memory byte source, used to replay scripted input
#[derive(Debug, Default, Clone)]
pub struct ScriptedBytes {
    bytes: std::collections::VecDeque<u8>,
}

impl ScriptedBytes {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes.iter().copied());
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl ByteSource for ScriptedBytes {
    fn read_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        Ok(self.bytes.pop_front())
    }
}
