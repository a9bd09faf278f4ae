use crate::cursor;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Default width that tabs expand to
pub const DEFAULT_TAB_STOP: usize = 8;

/// Per-byte tag attached to a row's render form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Normal,
    /// Current search match
    Match,
}

/// One line of text: the raw bytes as stored on disk plus the derived render form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    raw: Vec<u8>,
    /// Tabs expanded to spaces. Always recomputed from `raw`, never edited directly.
    render: Vec<u8>,
    /// One tag per byte of `render`
    highlight: Vec<Highlight>,
}

/// Expand tabs in `raw` to spaces padded up to the next tab stop
pub fn render_row(raw: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab_stop = tab_stop.max(1);
    let tabs = raw.iter().filter(|&&b| b == b'\t').count();
    let mut render = Vec::with_capacity(raw.len() + tabs * (tab_stop - 1));

    for &byte in raw {
        if byte == b'\t' {
            render.push(b' ');
            while render.len() % tab_stop != 0 {
                render.push(b' ');
            }
        } else {
            render.push(byte);
        }
    }

    render
}

impl Row {
    /// Create a row from raw bytes, computing its render form
    pub fn new(raw: impl Into<Vec<u8>>, tab_stop: usize) -> Self {
        let mut row = Self {
            raw: raw.into(),
            render: Vec::new(),
            highlight: Vec::new(),
        };
        row.update(tab_stop);
        row
    }

    /// Recompute render and highlight from raw
    fn update(&mut self, tab_stop: usize) {
        self.render = render_row(&self.raw, tab_stop);
        self.highlight = vec![Highlight::Normal; self.render.len()];
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn render(&self) -> &[u8] {
        &self.render
    }

    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Number of raw bytes
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Number of rendered columns
    pub fn render_len(&self) -> usize {
        self.render.len()
    }

    /// Rendered column for raw column `cx`
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        cursor::raw_to_rendered(&self.raw, cx, tab_stop)
    }

    /// Raw column for rendered column `rx`
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        cursor::rendered_to_raw(&self.raw, rx, tab_stop)
    }

    /// Find `needle` in the render form, returning the rendered column of the first hit
    pub fn find_in_render(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() || self.render.len() < needle.len() {
            return None;
        }
        self.render
            .windows(needle.len())
            .position(|window| window == needle)
    }

    /// Tag `range` of the render form. Out-of-range parts are ignored.
    pub fn set_highlight(&mut self, range: std::ops::Range<usize>, tag: Highlight) {
        let end = range.end.min(self.highlight.len());
        let start = range.start.min(end);
        for slot in &mut self.highlight[start..end] {
            *slot = tag;
        }
    }

    /// Replace the highlight tags wholesale; ignored if the length no longer matches
    pub fn restore_highlight(&mut self, saved: Vec<Highlight>) {
        if saved.len() == self.highlight.len() {
            self.highlight = saved;
        }
    }
}

/// The ordered rows being edited, plus the file they belong to
///
/// All content mutation goes through the methods below so that every row's
/// render form stays in sync with its raw bytes. Index arguments that fall
/// outside the document are silently ignored.
#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,

    /// Optional file path for persistence
    file_path: Option<PathBuf>,

    /// Number of content changes since the last load or save
    dirty: usize,

    /// Refuse to save (file was not writable when opened)
    readonly: bool,

    tab_stop: usize,
}

impl Document {
    /// Create a new empty document
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            file_path: None,
            dirty: 0,
            readonly: false,
            tab_stop: tab_stop.max(1),
        }
    }

    /// Build a document from a reader, one row per line
    ///
    /// Trailing `\n` and `\r` bytes are stripped from each line. The result is clean.
    pub fn from_reader<R: BufRead>(mut reader: R, tab_stop: usize) -> io::Result<Self> {
        let mut doc = Self::new(tab_stop);
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            while matches!(line.last(), Some(b'\n' | b'\r')) {
                line.pop();
            }
            doc.insert_row(doc.num_rows(), &line);
        }

        doc.dirty = 0;
        Ok(doc)
    }

    /// Build a document from in-memory text
    pub fn from_bytes(bytes: &[u8], tab_stop: usize) -> Self {
        // Reading from a slice cannot fail
        Self::from_reader(bytes, tab_stop).unwrap_or_else(|_| Self::new(tab_stop))
    }

    /// Load a document from a file
    pub fn load<P: AsRef<Path>>(path: P, tab_stop: usize) -> io::Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let readonly = file.metadata()?.permissions().readonly();

        let mut doc = Self::from_reader(io::BufReader::new(file), tab_stop)?;
        doc.file_path = Some(path.to_path_buf());
        doc.readonly = readonly;

        tracing::info!(
            "Loaded {} ({} rows, readonly={})",
            path.display(),
            doc.num_rows(),
            readonly
        );
        Ok(doc)
    }

    /// Save the document to its file path, returning the number of bytes written
    pub fn save(&mut self) -> io::Result<usize> {
        let Some(path) = self.file_path.clone() else {
            return Err(io::Error::other("No file path set for document"));
        };
        if self.readonly {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "File is read-only",
            ));
        }

        let content = self.serialize();
        let mut file = fs::File::create(&path)?;
        file.write_all(&content)?;
        file.flush()?;

        self.dirty = 0;
        tracing::info!("Saved {} bytes to {}", content.len(), path.display());
        Ok(content.len())
    }

    /// Every row's raw bytes, each followed by exactly one `\n`
    pub fn serialize(&self) -> Vec<u8> {
        let total = self.rows.iter().map(|row| row.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.raw());
            out.push(b'\n');
        }
        out
    }

    /// Insert a new row at `at` (valid range `0..=num_rows`)
    pub fn insert_row(&mut self, at: usize, text: &[u8]) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(text, self.tab_stop));
        self.dirty += 1;
    }

    /// Remove the row at `at`
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty += 1;
    }

    /// Insert `ch` into row `row` at column `col`, clamping `col` to the row length
    pub fn insert_char(&mut self, row: usize, col: usize, ch: u8) {
        let tab_stop = self.tab_stop;
        let Some(target) = self.rows.get_mut(row) else {
            return;
        };
        let col = col.min(target.raw.len());
        target.raw.insert(col, ch);
        target.update(tab_stop);
        self.dirty += 1;
    }

    /// Remove the byte at column `col` of row `row`
    pub fn delete_char(&mut self, row: usize, col: usize) {
        let tab_stop = self.tab_stop;
        let Some(target) = self.rows.get_mut(row) else {
            return;
        };
        if col >= target.raw.len() {
            return;
        }
        target.raw.remove(col);
        target.update(tab_stop);
        self.dirty += 1;
    }

    /// Append `text` to the end of row `row`
    pub fn append_text(&mut self, row: usize, text: &[u8]) {
        let tab_stop = self.tab_stop;
        let Some(target) = self.rows.get_mut(row) else {
            return;
        };
        target.raw.extend_from_slice(text);
        target.update(tab_stop);
        self.dirty += 1;
    }

    /// Split row `row` at `col`: the suffix becomes a new row right below it
    pub fn split_row_at(&mut self, row: usize, col: usize) {
        let tab_stop = self.tab_stop;
        let Some(target) = self.rows.get_mut(row) else {
            return;
        };
        let col = col.min(target.raw.len());
        let suffix = target.raw.split_off(col);
        target.update(tab_stop);
        self.insert_row(row + 1, &suffix);
    }

    /// Merge row `row` onto the end of `row - 1` and delete it
    ///
    /// Returns the column in the previous row where the joined text begins.
    pub fn join_with_previous(&mut self, row: usize) -> Option<usize> {
        if row == 0 || row >= self.rows.len() {
            return None;
        }
        let join_col = self.rows[row - 1].len();
        let moved = std::mem::take(&mut self.rows[row].raw);
        self.append_text(row - 1, &moved);
        self.delete_row(row);
        Some(join_col)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw length of row `index`, or 0 past the end
    pub fn row_len(&self, index: usize) -> usize {
        self.rows.get(index).map_or(0, Row::len)
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn set_file_path(&mut self, path: PathBuf) {
        self.file_path = Some(path);
    }

    /// Number of changes since the last load or save
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    pub fn is_modified(&self) -> bool {
        self.dirty > 0
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}
