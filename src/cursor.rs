//! Cursor state and raw/rendered column mapping
//!
//! `cx` indexes raw bytes, `rx` indexes rendered columns after tab expansion.
//! The two mappings are only inverses up to tab rounding: every rendered
//! column inside a tab's run of spaces maps back to the raw index of that tab.

use crate::buffer::Document;

/// Rendered width contributed by a byte that starts at rendered column `rx`
fn byte_width(byte: u8, rx: usize, tab_stop: usize) -> usize {
    if byte == b'\t' {
        tab_stop - (rx % tab_stop)
    } else {
        1
    }
}

/// Rendered column of raw column `cx`
///
/// `cx` past the end of `raw` is treated as the end of the row.
pub fn raw_to_rendered(raw: &[u8], cx: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    raw.iter()
        .take(cx)
        .fold(0, |rx, &byte| rx + byte_width(byte, rx, tab_stop))
}

/// Raw column whose rendered span contains rendered column `rx`
///
/// Returns `raw.len()` when `rx` lies past the rendered end of the row.
pub fn rendered_to_raw(raw: &[u8], rx: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut cur_rx = 0;
    for (cx, &byte) in raw.iter().enumerate() {
        cur_rx += byte_width(byte, cur_rx, tab_stop);
        if cur_rx > rx {
            return cx;
        }
    }
    raw.len()
}

/// Direction for single-step cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
}

/// Cursor position in the document
///
/// `cy == num_rows` is the valid "past the last row" position used for appending.
/// `rx` is derived from `cx` during scrolling and is never authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub cx: usize,
    pub cy: usize,
    pub rx: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute `rx` from `cx` (0 when past the last row)
    pub fn update_rx(&mut self, doc: &Document) {
        self.rx = doc
            .row(self.cy)
            .map_or(0, |row| row.cx_to_rx(self.cx, doc.tab_stop()));
    }

    /// Move one step, wrapping across row boundaries, then clamp to the row length
    pub fn move_by(&mut self, movement: Movement, doc: &Document) {
        let on_row = self.cy < doc.num_rows();

        match movement {
            Movement::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = doc.row_len(self.cy);
                }
            }
            Movement::Right => {
                if on_row {
                    if self.cx < doc.row_len(self.cy) {
                        self.cx += 1;
                    } else {
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            Movement::Up => {
                self.cy = self.cy.saturating_sub(1);
            }
            Movement::Down => {
                if self.cy < doc.num_rows() {
                    self.cy += 1;
                }
            }
        }

        self.clamp_to_row(doc);
    }

    /// Keep `cx` within the current row (0 past the last row)
    pub fn clamp_to_row(&mut self, doc: &Document) {
        self.cy = self.cy.min(doc.num_rows());
        self.cx = self.cx.min(doc.row_len(self.cy));
    }

    /// Move to column 0
    pub fn home(&mut self) {
        self.cx = 0;
    }

    /// Move to the end of the current row
    pub fn end(&mut self, doc: &Document) {
        if self.cy < doc.num_rows() {
            self.cx = doc.row_len(self.cy);
        }
    }
}
