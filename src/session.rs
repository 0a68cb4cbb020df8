//! Document session - one open buffer
//!
//! A session owns its document, its highlight cache, the cursor and
//! selection, and the snapshot of the text as last loaded or saved. The
//! modified flag is never stored: it is the comparison of the current text
//! against that snapshot.
//!
//! Outside observers subscribe to text and cursor changes through hooks;
//! gutters and renderers pull state through the query methods and never
//! hold a reference back into the session.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::assist::EditAssistant;
use crate::document::{normalize_newlines, Document, TextEdit};
use crate::error::{EditorError, Result};
use crate::input::{Key, KeyEvent};
use crate::syntax::{Highlighter, Span};

/// Title used for sessions with no path when none is configured
pub const DEFAULT_UNTITLED: &str = "untitled.py";

/// Description of a completed text change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// Byte range of the text that was replaced
    pub range: Range<usize>,
    /// Length of the text inserted in its place
    pub inserted_len: usize,
    /// Lines whose text or highlighting changed and need redrawing
    pub lines: Range<usize>,
}

type TextChangedHook = Box<dyn FnMut(&TextChange)>;
type CursorMovedHook = Box<dyn FnMut(usize)>;

/// Per-buffer editing state
pub struct DocumentSession {
    document: Document,
    path: Option<PathBuf>,
    original_content: String,
    highlighter: Option<Highlighter>,
    cursor: usize,
    selection: Option<Range<usize>>,
    text_changed: Vec<TextChangedHook>,
    cursor_moved: Vec<CursorMovedHook>,
}

impl DocumentSession {
    /// Create an empty session with no path
    pub fn new_empty() -> Self {
        Self::from_parts(Document::new(), None, String::new())
    }

    /// Load a file into a new session
    pub fn open(path: &Path) -> Result<Self> {
        let text = normalize_newlines(&fs::read_to_string(path)?);
        tracing::debug!(path = %path.display(), bytes = text.len(), "opened document");
        Ok(Self::from_parts(
            Document::from_text(&text),
            Some(path.to_path_buf()),
            text,
        ))
    }

    fn from_parts(document: Document, path: Option<PathBuf>, original_content: String) -> Self {
        Self {
            document,
            path,
            original_content,
            highlighter: None,
            cursor: 0,
            selection: None,
            text_changed: Vec::new(),
            cursor_moved: Vec::new(),
        }
    }

    /// Attach (or detach) a highlighter and recompute every line
    pub fn set_highlighter(&mut self, highlighter: Option<Highlighter>) {
        self.highlighter = highlighter;
        if let Some(highlighter) = &self.highlighter {
            highlighter.highlight_all(self.document.lines_mut());
        }
    }

    /// Builder form of [`set_highlighter`](Self::set_highlighter)
    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.set_highlighter(Some(highlighter));
        self
    }

    /// Whether this session highlights its text
    pub fn is_highlighted(&self) -> bool {
        self.highlighter.is_some()
    }

    /// The underlying document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Associated file path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Full current text
    pub fn current_text(&self) -> String {
        self.document.text()
    }

    /// Whether the text differs from the last loaded or saved snapshot
    pub fn is_modified(&self) -> bool {
        self.document.len() != self.original_content.len()
            || self.current_text() != self.original_content
    }

    /// Write the text to `path` and make it the new snapshot and path
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let text = self.current_text();
        fs::write(path, &text)?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "saved document");
        self.original_content = text;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Save to the associated path
    pub fn save_in_place(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(EditorError::NoFilePath)?;
        self.save(&path)
    }

    /// Tab-style title: file name or `untitled`, with ` *` when modified
    pub fn title(&self, untitled: &str) -> String {
        let mut title = self
            .path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| untitled.to_string());
        if self.is_modified() {
            title.push_str(" *");
        }
        title
    }

    /// Register a text-changed observer
    pub fn on_text_changed(&mut self, hook: impl FnMut(&TextChange) + 'static) {
        self.text_changed.push(Box::new(hook));
    }

    /// Register a cursor-moved observer
    pub fn on_cursor_moved(&mut self, hook: impl FnMut(usize) + 'static) {
        self.cursor_moved.push(Box::new(hook));
    }

    /// Cursor byte offset
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Active selection, ordered and non-empty
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    /// Move the cursor (clamped) and clear the selection
    pub fn set_cursor(&mut self, offset: usize) {
        self.selection = None;
        self.move_cursor(offset);
    }

    /// Select a range (clamped); the cursor goes to its end
    pub fn set_selection(&mut self, range: Range<usize>) {
        let a = self.document.clamp_offset(range.start);
        let b = self.document.clamp_offset(range.end);
        self.selection = (a != b).then(|| a.min(b)..a.max(b));
        self.move_cursor(b);
    }

    fn move_cursor(&mut self, offset: usize) {
        let offset = self.document.clamp_offset(offset);
        if offset != self.cursor {
            self.cursor = offset;
            for hook in &mut self.cursor_moved {
                hook(offset);
            }
        }
    }

    /// Apply an edit, rehighlight what it touched, and notify observers.
    ///
    /// The cursor keeps its place in the surrounding text: it shifts by the
    /// size change when the edit lies before it, and moves to the start of
    /// the edit when it was inside the replaced range.
    pub fn apply_edit(&mut self, edit: &TextEdit) -> TextChange {
        let change = self.splice(edit);
        let cursor = shift_offset(self.cursor, &change.range, change.inserted_len);
        self.move_cursor(cursor);
        change
    }

    /// Apply an edit without touching the cursor; the caller places it.
    ///
    /// Until then `self.cursor` still holds the pre-edit offset, so the
    /// following `move_cursor` compares against where the cursor was.
    fn splice(&mut self, edit: &TextEdit) -> TextChange {
        let applied = self.document.apply(edit);
        self.selection = None;
        let mut lines = applied.lines.clone();
        if let Some(highlighter) = &self.highlighter {
            let redrawn = highlighter.rehighlight(self.document.lines_mut(), applied.lines);
            lines = lines.start.min(redrawn.start)..lines.end.max(redrawn.end);
        }
        let change = TextChange {
            range: applied.range,
            inserted_len: applied.inserted_len,
            lines,
        };
        for hook in &mut self.text_changed {
            hook(&change);
        }
        change
    }

    /// Replace the selection (or insert at the cursor) with `text`
    pub fn insert_text(&mut self, text: &str) {
        let range = self.selection.take().unwrap_or(self.cursor..self.cursor);
        let change = self.splice(&TextEdit::replace(range, text));
        self.move_cursor(change.range.start + change.inserted_len);
    }

    /// Feed one key press through the assistant, falling back to plain
    /// insertion for unhandled printable characters.
    ///
    /// Returns whether the buffer changed.
    pub fn handle_key(&mut self, event: KeyEvent, assistant: &EditAssistant) -> bool {
        if let Some(transform) =
            assistant.handle_key(event, &self.document, self.cursor, self.selection.clone())
        {
            self.selection = None;
            let changed = transform.edit.is_some();
            if let Some(edit) = &transform.edit {
                self.splice(edit);
            }
            self.move_cursor(transform.cursor);
            return changed;
        }

        match event.key {
            Key::Char(ch) if !event.modifiers.is_command() => {
                self.insert_text(ch.encode_utf8(&mut [0; 4]));
                true
            }
            _ => false,
        }
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.document.line_count()
    }

    /// Text of a line
    pub fn line_text(&self, idx: usize) -> Option<&str> {
        self.document.line(idx).map(|line| line.text())
    }

    /// Spans of a line; empty when unhighlighted or out of range
    pub fn line_spans(&self, idx: usize) -> &[Span] {
        self.document.line(idx).map_or(&[], |line| line.spans())
    }

    /// Line index holding the cursor
    pub fn cursor_line(&self) -> usize {
        self.document.offset_to_position(self.cursor).0
    }

    /// Cursor as (line index, display column)
    pub fn cursor_position(&self) -> (usize, usize) {
        let (line, col) = self.document.offset_to_position(self.cursor);
        let width = self.document.line(line).map_or(0, |l| l.width_to(col));
        (line, width)
    }
}

/// Where an offset lands after `range` is replaced by `inserted_len` bytes
fn shift_offset(offset: usize, range: &Range<usize>, inserted_len: usize) -> usize {
    if offset >= range.end {
        offset - range.len() + inserted_len
    } else if offset > range.start {
        range.start
    } else {
        offset
    }
}

impl Default for DocumentSession {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl std::fmt::Debug for DocumentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSession")
            .field("path", &self.path)
            .field("lines", &self.document.line_count())
            .field("cursor", &self.cursor)
            .field("modified", &self.is_modified())
            .finish()
    }
}
