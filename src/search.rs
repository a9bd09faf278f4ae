//! Incremental search over rendered rows
//!
//! The session is re-run on every key typed into the search prompt. Arrow
//! keys step to the next/previous match with wraparound; any other key
//! restarts the search from the top of the document.

use crate::buffer::{Document, Highlight};
use crate::cursor::Cursor;
use crate::input::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Cursor and offsets captured when the search started, restored on cancel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedView {
    pub cursor: Cursor,
    pub rowoff: usize,
    pub coloff: usize,
}

/// A match location in raw coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    pub row: usize,
    pub cx: usize,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    /// Row of the current match, the anchor for stepping
    last_match: Option<usize>,
    direction: Direction,
    saved_view: SavedView,
    /// Highlight of the matched row before it was tagged
    saved_highlight: Option<(usize, Vec<Highlight>)>,
}

impl SearchSession {
    pub fn new(saved_view: SavedView) -> Self {
        Self {
            last_match: None,
            direction: Direction::Forward,
            saved_view,
            saved_highlight: None,
        }
    }

    pub fn saved_view(&self) -> SavedView {
        self.saved_view
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Put back the highlight that the previous match overwrote
    fn restore_highlight(&mut self, doc: &mut Document) {
        if let Some((row, saved)) = self.saved_highlight.take() {
            if let Some(target) = doc.row_mut(row) {
                target.restore_highlight(saved);
            }
        }
    }

    /// End the session: clear match tags and reset the anchor
    pub fn finish(&mut self, doc: &mut Document) {
        self.restore_highlight(doc);
        self.last_match = None;
        self.direction = Direction::Forward;
    }

    /// React to `key` typed into the prompt, whose input is now `query`
    pub fn on_key(&mut self, doc: &mut Document, query: &[u8], key: Key) -> Option<SearchHit> {
        self.restore_highlight(doc);

        match key {
            Key::Enter | Key::Escape => {
                self.finish(doc);
                return None;
            }
            Key::ArrowRight | Key::ArrowDown => self.direction = Direction::Forward,
            Key::ArrowLeft | Key::ArrowUp => self.direction = Direction::Backward,
            _ => {
                self.last_match = None;
                self.direction = Direction::Forward;
            }
        }

        if query.is_empty() {
            return None;
        }
        if self.last_match.is_none() {
            self.direction = Direction::Forward;
        }

        let hit = self.find(doc, query)?;
        self.last_match = Some(hit.row);

        let tab_stop = doc.tab_stop();
        if let Some(row) = doc.row_mut(hit.row) {
            let rx = row.cx_to_rx(hit.cx, tab_stop);
            self.saved_highlight = Some((hit.row, row.highlight().to_vec()));
            row.set_highlight(rx..rx + query.len(), Highlight::Match);
        }
        tracing::debug!("Search match at row {} col {}", hit.row, hit.cx);
        Some(hit)
    }

    /// Visit every row once, starting after the anchor, wrapping at either end
    fn find(&self, doc: &Document, query: &[u8]) -> Option<SearchHit> {
        let num_rows = doc.num_rows();
        let mut current = self.last_match;

        for _ in 0..num_rows {
            let next = match (current, self.direction) {
                (None, _) => 0,
                (Some(row), Direction::Forward) => (row + 1) % num_rows,
                (Some(0), Direction::Backward) => num_rows - 1,
                (Some(row), Direction::Backward) => row - 1,
            };
            current = Some(next);

            let row = doc.row(next)?;
            if let Some(rx) = row.find_in_render(query) {
                return Some(SearchHit {
                    row: next,
                    cx: row.rx_to_cx(rx, doc.tab_stop()),
                });
            }
        }
        None
    }
}
