use crate::buffer::Document;
use crate::cursor::Cursor;

/// The visible window into the document
///
/// `rowoff`/`coloff` are the top-left visible cell in rendered coordinates.
/// `screen_rows` excludes the status and message bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rowoff: usize,
    pub coloff: usize,
    pub screen_rows: usize,
    pub screen_cols: usize,
}

impl Viewport {
    pub fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            rowoff: 0,
            coloff: 0,
            screen_rows,
            screen_cols,
        }
    }

    pub fn resize(&mut self, screen_rows: usize, screen_cols: usize) {
        self.screen_rows = screen_rows;
        self.screen_cols = screen_cols;
    }

    /// Recompute `cursor.rx` and shift the offsets so the cursor is visible
    ///
    /// Run once per frame before drawing.
    pub fn scroll(&mut self, cursor: &mut Cursor, doc: &Document) {
        cursor.update_rx(doc);

        if cursor.cy < self.rowoff {
            self.rowoff = cursor.cy;
        }
        if cursor.cy >= self.rowoff + self.screen_rows {
            self.rowoff = (cursor.cy + 1).saturating_sub(self.screen_rows);
        }
        if cursor.rx < self.coloff {
            self.coloff = cursor.rx;
        }
        if cursor.rx >= self.coloff + self.screen_cols {
            self.coloff = (cursor.rx + 1).saturating_sub(self.screen_cols);
        }
    }

    /// Whether rendered position (`row`, `col`) lies inside the visible rectangle
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.rowoff..self.rowoff + self.screen_rows).contains(&row)
            && (self.coloff..self.coloff + self.screen_cols).contains(&col)
    }
}
