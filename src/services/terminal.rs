//! The controlling terminal: raw mode, size, unbuffered input and frame output

use crate::input::decoder::parse_cursor_report;
use crate::input::{ByteSource, Key, KeySource};
use crossterm::cursor::{MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use std::io::{self, Write};
use std::time::Duration;

/// Push the cursor to the bottom-right corner, then ask where it ended up
const SIZE_QUERY: &[u8] = b"\x1b[999C\x1b[999B\x1b[6n";
const REPORT_MAX_LEN: usize = 32;
const REPORT_TIMEOUT: Duration = Duration::from_millis(500);

/// Raw mode plus alternate screen for as long as the guard lives
///
/// Dropping the guard, or panicking while it is alive, clears the screen and
/// puts the terminal back the way it was.
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        install_panic_hook();
        tracing::debug!("Terminal switched to raw mode");
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
        tracing::debug!("Terminal restored");
    }
}

/// Best-effort terminal reset; errors are ignored since this runs on the way out
pub fn restore() {
    let _ = execute!(
        io::stdout(),
        Clear(ClearType::All),
        MoveTo(0, 0),
        Show,
        LeaveAlternateScreen
    );
    let _ = disable_raw_mode();
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        restore();
        original_hook(panic);
    }));
}

/// Terminal size as `(cols, rows)`
///
/// Falls back to asking the terminal for its cursor position when the
/// window size ioctl gives nothing usable.
pub fn window_size() -> io::Result<(u16, u16)> {
    match terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => Ok((cols, rows)),
        other => {
            tracing::debug!("Window size unavailable ({:?}), querying the terminal", other);
            query_size_fallback()
        }
    }
}

#[cfg(unix)]
fn query_size_fallback() -> io::Result<(u16, u16)> {
    query_size(&mut io::stdout(), &mut TtyInput::stdin()?)
}

#[cfg(not(unix))]
fn query_size_fallback() -> io::Result<(u16, u16)> {
    Err(io::Error::other("terminal size is unavailable"))
}

/// Ask the terminal for its size through a cursor position report
pub fn query_size<W: Write, S: ByteSource>(out: &mut W, input: &mut S) -> io::Result<(u16, u16)> {
    out.write_all(SIZE_QUERY)?;
    out.flush()?;

    let mut report = Vec::new();
    while report.len() < REPORT_MAX_LEN {
        match input.read_byte(REPORT_TIMEOUT)? {
            Some(b'R') | None => break,
            Some(byte) => report.push(byte),
        }
    }

    let (rows, cols) = parse_cursor_report(&report).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "malformed cursor position report")
    })?;
    Ok((cols, rows))
}

/// Unbuffered writer for whole frames
pub struct TerminalOutput {
    inner: Box<dyn Write>,
}

impl TerminalOutput {
    /// Writes to stdout; on unix through its own descriptor so a frame is one `write`
    pub fn stdout() -> io::Result<Self> {
        #[cfg(unix)]
        let inner: Box<dyn Write> = {
            use std::os::fd::AsFd;
            Box::new(std::fs::File::from(io::stdout().as_fd().try_clone_to_owned()?))
        };
        #[cfg(not(unix))]
        let inner: Box<dyn Write> = Box::new(io::stdout());
        Ok(Self { inner })
    }

    pub fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.inner.write_all(frame)?;
        self.inner.flush()
    }
}

/// Reads stdin one byte at a time, waiting with `poll(2)`
#[cfg(unix)]
#[derive(Debug)]
pub struct TtyInput {
    file: std::fs::File,
}

#[cfg(unix)]
impl TtyInput {
    pub fn stdin() -> io::Result<Self> {
        use std::os::fd::AsFd;
        let fd = io::stdin().as_fd().try_clone_to_owned()?;
        Ok(Self {
            file: std::fs::File::from(fd),
        })
    }
}

#[cfg(unix)]
impl ByteSource for TtyInput {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        use nix::errno::Errno;
        use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
        use std::io::Read;
        use std::os::fd::AsFd;

        // Clamped to u16::MAX milliseconds
        let timeout_ms = timeout.as_millis().min(u128::from(u16::MAX)) as u16;
        let mut poll_fds = [PollFd::new(self.file.as_fd(), PollFlags::POLLIN)];
        match poll(&mut poll_fds, PollTimeout::from(timeout_ms)) {
            Ok(0) | Err(Errno::EINTR) => return Ok(None),
            Ok(_) => {}
            Err(e) => return Err(e.into()),
        }

        let mut byte = [0u8; 1];
        match self.file.read(&mut byte) {
            Ok(0) => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")),
            Ok(_) => Ok(Some(byte[0])),
            Err(e) if matches!(e.kind(), io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock) => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Key input through crossterm events, for platforms without a byte-level tty
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                Ok(key_from_event(key_event))
            }
            other => {
                tracing::trace!("Ignoring event {:?}", other);
                Ok(None)
            }
        }
    }
}

/// Map a crossterm key event to a [`Key`]; keys without a byte form are dropped
pub fn key_from_event(key_event: KeyEvent) -> Option<Key> {
    let key = match key_event.code {
        KeyCode::Char(c)
            if key_event.modifiers.contains(KeyModifiers::CONTROL) && c.is_ascii_alphabetic() =>
        {
            Key::Ctrl(c.to_ascii_lowercase())
        }
        KeyCode::Char(c @ ('@' | '\\' | ']' | '^' | '_'))
            if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Key::Ctrl(c)
        }
        KeyCode::Char(c) if c.is_ascii() => Key::Char(c as u8),
        KeyCode::Tab => Key::Char(b'\t'),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => return None,
    };
    Some(key)
}
