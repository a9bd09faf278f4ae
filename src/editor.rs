//! The editing session: routes keys to document and cursor changes
//!
//! The editor is either in normal mode, where keys resolve through the fixed
//! keybindings, or has a prompt open in the message bar (save-as or search)
//! that receives every key until it is confirmed or cancelled.

use crate::buffer::Document;
use crate::config::Config;
use crate::cursor::{Cursor, Movement};
use crate::input::{action_for, Action, Key};
use crate::prompt::{PromptKind, PromptOutcome, PromptSession};
use crate::search::{SavedView, SearchSession};
use crate::view::{FrameContext, ScreenRenderer, StatusMessage};
use crate::viewport::Viewport;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Rows taken by the status bar and message bar
pub const RESERVED_ROWS: u16 = 2;

/// Input mode of the editor
#[derive(Debug, Clone, Default)]
pub enum Mode {
    #[default]
    Normal,
    Prompt(PromptSession),
}

/// A single editing session over one document
#[derive(Debug)]
pub struct Editor {
    document: Document,
    cursor: Cursor,
    viewport: Viewport,
    status: StatusMessage,
    mode: Mode,
    config: Config,

    /// Quit presses still required before a dirty document is abandoned
    quit_times: usize,

    should_quit: bool,
}

impl Editor {
    /// Create an editor with an empty, unnamed document
    ///
    /// `width`/`height` are the full terminal size; two rows go to the bars.
    pub fn new(config: Config, width: u16, height: u16) -> Self {
        let viewport = Viewport::new(
            usize::from(height.saturating_sub(RESERVED_ROWS)),
            usize::from(width),
        );
        Self {
            document: Document::new(config.tab_stop),
            cursor: Cursor::new(),
            viewport,
            status: StatusMessage::new(),
            mode: Mode::Normal,
            quit_times: config.quit_times,
            config,
            should_quit: false,
        }
    }

    /// Open `path` as the document
    ///
    /// A path that does not exist yet gives an empty document with that name.
    pub fn open(&mut self, path: &Path) -> io::Result<()> {
        let document = match Document::load(path, self.config.tab_stop) {
            Ok(doc) => doc,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("{} does not exist, starting a new file", path.display());
                let mut doc = Document::new(self.config.tab_stop);
                doc.set_file_path(path.to_path_buf());
                doc
            }
            Err(e) => return Err(e),
        };
        self.set_document(document);
        Ok(())
    }

    /// Replace the document and reset cursor and scrolling
    pub fn set_document(&mut self, document: Document) {
        self.document = document;
        self.cursor = Cursor::new();
        self.viewport.rowoff = 0;
        self.viewport.coloff = 0;
        self.mode = Mode::Normal;
    }

    /// Follow a terminal resize
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(
            usize::from(height.saturating_sub(RESERVED_ROWS)),
            usize::from(width),
        );
    }

    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.status.set(text, Instant::now());
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Dispatch one key according to the current mode
    pub fn handle_key(&mut self, key: Key) {
        tracing::trace!("Key {:?} in {} mode", key, self.mode_name());
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Prompt(_) => {
                self.handle_prompt_key(key);
                self.quit_times = self.config.quit_times;
            }
        }
    }

    fn mode_name(&self) -> &'static str {
        match &self.mode {
            Mode::Normal => "normal",
            Mode::Prompt(prompt) => match prompt.kind {
                PromptKind::SaveAs => "save-as",
                PromptKind::Search(_) => "search",
            },
        }
    }

    fn handle_normal_key(&mut self, key: Key) {
        let action = action_for(key);
        if action == Action::Quit {
            self.quit();
            return;
        }

        match action {
            Action::Save => self.save(),
            Action::Find => self.start_find(),
            Action::Move(movement) => self.cursor.move_by(movement, &self.document),
            Action::Home => self.cursor.home(),
            Action::End => self.cursor.end(&self.document),
            Action::PageUp => self.page_up(),
            Action::PageDown => self.page_down(),
            Action::InsertNewline => self.insert_newline(),
            Action::InsertChar(byte) => self.insert_char(byte),
            Action::DeleteBackward => self.delete_backward(),
            Action::DeleteForward => {
                self.cursor.move_by(Movement::Right, &self.document);
                self.delete_backward();
            }
            Action::Quit | Action::None => {}
        }
        self.quit_times = self.config.quit_times;
    }

    /// Quit, unless the document is dirty and this is not yet the final confirming press
    fn quit(&mut self) {
        if self.document.is_modified() && self.quit_times > 1 {
            self.quit_times -= 1;
            self.set_status_message(format!(
                "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                self.quit_times
            ));
            tracing::debug!("Quit refused, {} presses left", self.quit_times);
            return;
        }
        tracing::info!("Quitting");
        self.should_quit = true;
    }

    fn save(&mut self) {
        if self.document.file_path().is_none() {
            let prompt = PromptSession::new(PromptKind::SaveAs);
            self.set_status_message(prompt.message());
            self.mode = Mode::Prompt(prompt);
            return;
        }
        self.write_document();
    }

    fn write_document(&mut self) {
        if self.document.is_readonly() {
            self.set_status_message("Can't save! File is read-only");
            return;
        }
        match self.document.save() {
            Ok(bytes) => self.set_status_message(format!("{bytes} bytes written to disk")),
            Err(e) => {
                tracing::warn!("Save failed: {}", e);
                self.set_status_message(format!("Can't save! I/O error: {e}"));
            }
        }
    }

    fn start_find(&mut self) {
        let saved = SavedView {
            cursor: self.cursor,
            rowoff: self.viewport.rowoff,
            coloff: self.viewport.coloff,
        };
        let prompt = PromptSession::new(PromptKind::Search(SearchSession::new(saved)));
        self.set_status_message(prompt.message());
        self.mode = Mode::Prompt(prompt);
    }

    fn handle_prompt_key(&mut self, key: Key) {
        let Mode::Prompt(mut prompt) = std::mem::take(&mut self.mode) else {
            return;
        };

        let outcome = prompt.handle_key(key);
        let query = prompt.input().to_vec();

        if let PromptKind::Search(session) = &mut prompt.kind {
            if let Some(hit) = session.on_key(&mut self.document, &query, key) {
                self.cursor.cy = hit.row;
                self.cursor.cx = hit.cx;
                // Forces the next scroll to put the match on the top row
                self.viewport.rowoff = self.document.num_rows();
            }
        }

        match outcome {
            PromptOutcome::Pending => {
                self.set_status_message(prompt.message());
                self.mode = Mode::Prompt(prompt);
            }
            PromptOutcome::Confirmed => {
                self.set_status_message("");
                if let PromptKind::SaveAs = prompt.kind {
                    let path = PathBuf::from(prompt.input_lossy());
                    self.document.set_file_path(path);
                    self.write_document();
                }
            }
            PromptOutcome::Cancelled => match prompt.kind {
                PromptKind::SaveAs => self.set_status_message("Save aborted"),
                PromptKind::Search(session) => {
                    self.set_status_message("");
                    let saved = session.saved_view();
                    self.cursor = saved.cursor;
                    self.viewport.rowoff = saved.rowoff;
                    self.viewport.coloff = saved.coloff;
                }
            },
        }
    }

    fn page_up(&mut self) {
        self.cursor.cy = self.viewport.rowoff;
        for _ in 0..self.viewport.screen_rows {
            self.cursor.move_by(Movement::Up, &self.document);
        }
    }

    fn page_down(&mut self) {
        let bottom = (self.viewport.rowoff + self.viewport.screen_rows).saturating_sub(1);
        self.cursor.cy = bottom.min(self.document.num_rows());
        for _ in 0..self.viewport.screen_rows {
            self.cursor.move_by(Movement::Down, &self.document);
        }
    }

    fn insert_char(&mut self, byte: u8) {
        if self.cursor.cy == self.document.num_rows() {
            self.document.insert_row(self.document.num_rows(), b"");
        }
        self.document.insert_char(self.cursor.cy, self.cursor.cx, byte);
        self.cursor.cx += 1;
    }

    fn insert_newline(&mut self) {
        if self.cursor.cx == 0 {
            self.document.insert_row(self.cursor.cy, b"");
        } else {
            self.document.split_row_at(self.cursor.cy, self.cursor.cx);
        }
        self.cursor.cy += 1;
        self.cursor.cx = 0;
    }

    fn delete_backward(&mut self) {
        if self.cursor.cy == self.document.num_rows() {
            return;
        }
        if self.cursor.cx == 0 && self.cursor.cy == 0 {
            return;
        }

        if self.cursor.cx > 0 {
            self.document.delete_char(self.cursor.cy, self.cursor.cx - 1);
            self.cursor.cx -= 1;
        } else if let Some(join_col) = self.document.join_with_previous(self.cursor.cy) {
            self.cursor.cy -= 1;
            self.cursor.cx = join_col;
        }
    }

    /// Bring the cursor into view; run before every frame
    pub fn scroll(&mut self) {
        self.viewport.scroll(&mut self.cursor, &self.document);
    }

    /// Scroll, then build the complete frame for `now`
    pub fn render(&mut self, now: Instant) -> io::Result<Vec<u8>> {
        self.scroll();
        let ctx = FrameContext {
            document: &self.document,
            cursor: &self.cursor,
            viewport: &self.viewport,
            status: &self.status,
            status_ttl: self.config.status_message_ttl(),
            now,
        };
        let mut frame = Vec::new();
        ScreenRenderer::render(&ctx, &mut frame)?;
        Ok(frame)
    }
}
