//! Frame composition
//!
//! A frame is built into one byte buffer and written to the terminal with a
//! single write, so the user never sees a half-drawn screen. Order matters:
//! hide cursor, home, rows, status bar, message bar, place cursor, show cursor.

use crate::buffer::{Document, Highlight, Row};
use crate::cursor::Cursor;
use crate::view::status::StatusMessage;
use crate::viewport::Viewport;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Longest filename prefix shown in the status bar
const STATUS_FILENAME_WIDTH: usize = 20;

/// Everything a frame is drawn from
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub document: &'a Document,
    pub cursor: &'a Cursor,
    pub viewport: &'a Viewport,
    pub status: &'a StatusMessage,
    pub status_ttl: Duration,
    pub now: Instant,
}

pub fn welcome_message() -> String {
    format!("Notavi Editor -- Version {}", env!("CARGO_PKG_VERSION"))
}

/// The full-width status bar text (without attributes)
///
/// The left part is truncated to `cols`. The `row/total` part is only added
/// when it fits exactly into the space that remains.
pub fn status_line(doc: &Document, cursor: &Cursor, cols: usize) -> String {
    let name: String = doc.file_path().map_or_else(
        || "[No Name]".to_string(),
        |path| path.display().to_string().chars().take(STATUS_FILENAME_WIDTH).collect(),
    );
    let modified = if doc.is_modified() { "(modified)" } else { "" };
    let left = format!("{} - {} lines {}", name, doc.num_rows(), modified);
    let right = format!("{}/{}", cursor.cy + 1, doc.num_rows());

    let mut line: String = left.chars().take(cols).collect();
    let mut len = line.chars().count();
    while len < cols {
        if cols - len == right.len() {
            line.push_str(&right);
            break;
        }
        line.push(' ');
        len += 1;
    }
    line
}

pub struct ScreenRenderer;

impl ScreenRenderer {
    /// Build one complete frame into `out`
    pub fn render(ctx: &FrameContext<'_>, out: &mut Vec<u8>) -> io::Result<()> {
        queue!(out, Hide, MoveTo(0, 0))?;

        Self::draw_rows(ctx, out)?;
        Self::draw_status_bar(ctx, out)?;
        Self::draw_message_bar(ctx, out)?;

        let viewport = ctx.viewport;
        let row = ctx.cursor.cy.saturating_sub(viewport.rowoff);
        let col = ctx.cursor.rx.saturating_sub(viewport.coloff);
        queue!(out, MoveTo(to_u16(col), to_u16(row)), Show)?;
        Ok(())
    }

    fn draw_rows(ctx: &FrameContext<'_>, out: &mut Vec<u8>) -> io::Result<()> {
        let doc = ctx.document;
        let viewport = ctx.viewport;
        let cols = viewport.screen_cols;

        for y in 0..viewport.screen_rows {
            let file_row = y + viewport.rowoff;
            match doc.row(file_row) {
                Some(row) => Self::draw_row_slice(row, viewport.coloff, cols, out)?,
                None if doc.is_empty() && y == viewport.screen_rows / 3 => {
                    Self::draw_welcome(cols, out)?;
                }
                None => out.push(b'~'),
            }
            queue!(out, Clear(ClearType::UntilNewLine))?;
            out.write_all(b"\r\n")?;
        }
        Ok(())
    }

    /// Draw `render[coloff..coloff + cols]`, colouring search matches
    fn draw_row_slice(row: &Row, coloff: usize, cols: usize, out: &mut Vec<u8>) -> io::Result<()> {
        let start = coloff.min(row.render_len());
        let end = coloff.saturating_add(cols).min(row.render_len());
        let text = &row.render()[start..end];
        let tags = &row.highlight()[start..end];

        let mut current = Highlight::Normal;
        for (&byte, &tag) in text.iter().zip(tags) {
            if tag != current {
                let color = match tag {
                    Highlight::Match => Color::Blue,
                    Highlight::Normal => Color::Reset,
                };
                queue!(out, SetForegroundColor(color))?;
                current = tag;
            }
            out.push(byte);
        }
        if current != Highlight::Normal {
            queue!(out, SetForegroundColor(Color::Reset))?;
        }
        Ok(())
    }

    fn draw_welcome(cols: usize, out: &mut Vec<u8>) -> io::Result<()> {
        let welcome = welcome_message();
        let len = welcome.len().min(cols);
        let mut padding = (cols - len) / 2;
        if padding > 0 {
            out.push(b'~');
            padding -= 1;
        }
        out.extend(std::iter::repeat(b' ').take(padding));
        out.write_all(&welcome.as_bytes()[..len])
    }

    fn draw_status_bar(ctx: &FrameContext<'_>, out: &mut Vec<u8>) -> io::Result<()> {
        let line = status_line(ctx.document, ctx.cursor, ctx.viewport.screen_cols);
        queue!(out, SetAttribute(Attribute::Reverse))?;
        out.write_all(line.as_bytes())?;
        queue!(out, SetAttribute(Attribute::Reset))?;
        out.write_all(b"\r\n")
    }

    fn draw_message_bar(ctx: &FrameContext<'_>, out: &mut Vec<u8>) -> io::Result<()> {
        queue!(out, Clear(ClearType::UntilNewLine))?;
        if let Some(text) = ctx.status.visible_text(ctx.now, ctx.status_ttl) {
            let shown: String = text.chars().take(ctx.viewport.screen_cols).collect();
            out.write_all(shown.as_bytes())?;
        }
        Ok(())
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
