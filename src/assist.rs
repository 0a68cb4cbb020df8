//! Edit assistant - structural transforms for single keystrokes
//!
//! Each transform reads the document, cursor and selection, and returns one
//! [`TextEdit`] plus the new cursor. Nothing here holds state between keys,
//! so a pair insertion and its deletion are each one atomic edit.

use std::ops::Range;

use crate::config::Config;
use crate::document::{Document, TextEdit};
use crate::input::{Key, KeyEvent};
use crate::line::Line;

/// Bracket and quote pairs completed on input
pub const PAIRS: [(char, char); 5] = [('(', ')'), ('"', '"'), ('\'', '\''), ('{', '}'), ('[', ']')];

/// Closing counterpart of an opening pair character
pub fn closing_for(open: char) -> Option<char> {
    PAIRS.iter().find(|(o, _)| *o == open).map(|(_, c)| *c)
}

/// Result of a fully handled key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    /// Buffer change, if any
    pub edit: Option<TextEdit>,
    /// Cursor offset after the edit is applied
    pub cursor: usize,
}

/// Per-keystroke structural editing rules
#[derive(Debug, Clone)]
pub struct EditAssistant {
    indent_width: usize,
    block_openers: Vec<String>,
    auto_pair: bool,
}

impl EditAssistant {
    /// Create an assistant with the default settings
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create an assistant from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            indent_width: config.indent_width.max(1),
            block_openers: config.block_openers.clone(),
            auto_pair: config.auto_pair,
        }
    }

    /// Replace the list of block-opening prefixes
    pub fn with_block_openers<I, S>(mut self, openers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.block_openers = openers.into_iter().map(Into::into).collect();
        self
    }

    /// One indent unit as spaces
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }

    /// Dispatch a key press.
    ///
    /// Returns `None` when the key is not transformed and default insertion
    /// should happen.
    pub fn handle_key(
        &self,
        event: KeyEvent,
        doc: &Document,
        cursor: usize,
        selection: Option<Range<usize>>,
    ) -> Option<Transform> {
        if event.modifiers.is_command() {
            return None;
        }
        match event.key {
            Key::Char(ch) => self.pair_insert(ch, doc, cursor, selection),
            Key::Enter => Some(self.newline(doc, cursor, selection)),
            Key::Tab => Some(self.tab(doc, cursor, selection)),
            Key::Backspace => Some(self.backspace(doc, cursor, selection)),
            Key::Other => None,
        }
    }

    /// Insert a pair around the cursor, or wrap the selection in it
    pub fn pair_insert(
        &self,
        open: char,
        doc: &Document,
        cursor: usize,
        selection: Option<Range<usize>>,
    ) -> Option<Transform> {
        if !self.auto_pair {
            return None;
        }
        let close = closing_for(open)?;

        if let Some(sel) = clamp_selection(doc, selection) {
            let wrapped = format!("{open}{}{close}", doc.slice(sel.clone()));
            let cursor = sel.start + wrapped.len();
            return Some(Transform {
                edit: Some(TextEdit::replace(sel, wrapped)),
                cursor,
            });
        }

        let cursor = doc.clamp_offset(cursor);
        Some(Transform {
            edit: Some(TextEdit::insert(cursor, format!("{open}{close}"))),
            cursor: cursor + open.len_utf8(),
        })
    }

    /// Backspace: selection, then empty pair, then indent unit, then one char
    pub fn backspace(&self, doc: &Document, cursor: usize, selection: Option<Range<usize>>) -> Transform {
        if let Some(sel) = clamp_selection(doc, selection) {
            return Transform {
                cursor: sel.start,
                edit: Some(TextEdit::delete(sel)),
            };
        }

        let cursor = doc.clamp_offset(cursor);
        if cursor == 0 {
            return Transform { edit: None, cursor };
        }

        let (line_idx, col) = doc.offset_to_position(cursor);
        let text = doc.line(line_idx).map_or("", |line| line.text());
        let before = &text[..col];
        let after = &text[col..];

        if self.auto_pair {
            if let (Some(prev), Some(next)) = (before.chars().next_back(), after.chars().next()) {
                if PAIRS.contains(&(prev, next)) {
                    let start = cursor - prev.len_utf8();
                    return Transform {
                        edit: Some(TextEdit::delete(start..cursor + next.len_utf8())),
                        cursor: start,
                    };
                }
            }
        }

        let spaces = before.len() - before.trim_end_matches(' ').len();
        if spaces > 0 && spaces % self.indent_width == 0 {
            let start = cursor - self.indent_width;
            return Transform {
                edit: Some(TextEdit::delete(start..cursor)),
                cursor: start,
            };
        }

        // Line start: the previous char is the line break
        let width = before.chars().next_back().map_or(1, char::len_utf8);
        let start = cursor - width;
        Transform {
            edit: Some(TextEdit::delete(start..cursor)),
            cursor: start,
        }
    }

    /// Enter: break the line and carry its indentation over
    pub fn newline(&self, doc: &Document, cursor: usize, selection: Option<Range<usize>>) -> Transform {
        let range = clamp_selection(doc, selection).unwrap_or_else(|| {
            let cursor = doc.clamp_offset(cursor);
            cursor..cursor
        });

        let (line_idx, _) = doc.offset_to_position(range.start);
        let line = doc.line(line_idx);
        let mut indent = line.map_or(0, Line::indent_len);
        if line.is_some_and(|line| self.opens_block(line.text())) {
            indent += self.indent_width;
        }

        let insert = format!("\n{}", " ".repeat(indent));
        let cursor = range.start + insert.len();
        Transform {
            edit: Some(TextEdit::replace(range, insert)),
            cursor,
        }
    }

    /// Tab: insert one indent unit, never a tab character
    pub fn tab(&self, doc: &Document, cursor: usize, selection: Option<Range<usize>>) -> Transform {
        let range = clamp_selection(doc, selection).unwrap_or_else(|| {
            let cursor = doc.clamp_offset(cursor);
            cursor..cursor
        });
        let cursor = range.start + self.indent_width;
        Transform {
            edit: Some(TextEdit::replace(range, self.indent_unit())),
            cursor,
        }
    }

    /// Whether a line starts with one of the block-opening prefixes
    pub fn opens_block(&self, line: &str) -> bool {
        let trimmed = line.trim();
        self.block_openers
            .iter()
            .any(|opener| trimmed.starts_with(opener.as_str()))
    }
}

impl Default for EditAssistant {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp and order a selection; empty selections count as none
fn clamp_selection(doc: &Document, selection: Option<Range<usize>>) -> Option<Range<usize>> {
    let sel = selection?;
    let a = doc.clamp_offset(sel.start);
    let b = doc.clamp_offset(sel.end);
    let range = a.min(b)..a.max(b);
    (!range.is_empty()).then_some(range)
}
