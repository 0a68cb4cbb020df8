//! Document representation - an ordered sequence of lines
//!
//! Offsets are byte offsets into the full text, where lines are joined
//! with a single `\n`. Every offset accepted from outside is clamped to the
//! text and snapped down to a char boundary.

use std::ops::Range;

use crate::line::{floor_char_boundary, Line};

/// Replace `range` of the document text with `insert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte range being replaced (empty for a pure insertion)
    pub range: Range<usize>,
    /// Replacement text (empty for a pure deletion)
    pub insert: String,
}

impl TextEdit {
    /// Insert text at an offset
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            range: offset..offset,
            insert: text.into(),
        }
    }

    /// Delete a byte range
    pub fn delete(range: Range<usize>) -> Self {
        Self {
            range,
            insert: String::new(),
        }
    }

    /// Replace a byte range
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            insert: text.into(),
        }
    }
}

/// Outcome of applying an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
    /// Byte range that was actually replaced, after clamping
    pub range: Range<usize>,
    /// Bytes inserted in its place
    pub inserted_len: usize,
    /// Indices of the lines holding the new text
    pub lines: Range<usize>,
}

/// A document containing lines of text
#[derive(Debug, Clone)]
pub struct Document {
    /// Lines of text; never empty
    lines: Vec<Line>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
        }
    }

    /// Create a document from text; `\r\n` is normalized to `\n`
    pub fn from_text(text: &str) -> Self {
        let text = normalize_newlines(text);
        Self {
            lines: text.split('\n').map(Line::from).collect(),
        }
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Get all lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Mutable access for the highlighter
    pub fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    /// Total length of the text in bytes
    pub fn len(&self) -> usize {
        self.lines.iter().map(Line::len).sum::<usize>() + self.lines.len() - 1
    }

    /// Check if the document has no text
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// The full text, lines joined with `\n`
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.len());
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line.text());
        }
        out
    }

    /// Byte offset where a line starts (clamped to the last line)
    pub fn line_start(&self, line_idx: usize) -> usize {
        let line_idx = line_idx.min(self.lines.len() - 1);
        self.lines[..line_idx].iter().map(|l| l.len() + 1).sum()
    }

    /// Clamp an offset into the text and onto a char boundary
    pub fn clamp_offset(&self, offset: usize) -> usize {
        let (line, col) = self.offset_to_position(offset);
        self.line_start(line) + col
    }

    /// Convert a byte offset into (line index, byte column)
    pub fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        let mut remaining = offset;
        for (idx, line) in self.lines.iter().enumerate() {
            if remaining <= line.len() {
                return (idx, floor_char_boundary(line.text(), remaining));
            }
            remaining -= line.len() + 1;
        }
        let last = self.lines.len() - 1;
        (last, self.lines[last].len())
    }

    /// Convert (line index, byte column) into a byte offset, clamping both
    pub fn position_to_offset(&self, line_idx: usize, col: usize) -> usize {
        let line_idx = line_idx.min(self.lines.len() - 1);
        let line = &self.lines[line_idx];
        self.line_start(line_idx) + floor_char_boundary(line.text(), col)
    }

    /// Text in a byte range, clamped
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = self.clamp_offset(range.start);
        let end = self.clamp_offset(range.end).max(start);
        let (start_line, start_col) = self.offset_to_position(start);
        let (end_line, end_col) = self.offset_to_position(end);
        if start_line == end_line {
            return self.lines[start_line].text()[start_col..end_col].to_string();
        }
        let mut out = self.lines[start_line].text()[start_col..].to_string();
        for line in &self.lines[start_line + 1..end_line] {
            out.push('\n');
            out.push_str(line.text());
        }
        out.push('\n');
        out.push_str(&self.lines[end_line].text()[..end_col]);
        out
    }

    /// Apply an edit, splicing the affected lines.
    ///
    /// Rewritten lines lose their cached highlighting; lines outside the
    /// edit keep theirs.
    pub fn apply(&mut self, edit: &TextEdit) -> AppliedEdit {
        let start = self.clamp_offset(edit.range.start);
        let end = self.clamp_offset(edit.range.end).max(start);
        let (start_line, start_col) = self.offset_to_position(start);
        let (end_line, end_col) = self.offset_to_position(end);

        let insert = normalize_newlines(&edit.insert);
        let mut joined = String::with_capacity(
            start_col + insert.len() + self.lines[end_line].len() - end_col,
        );
        joined.push_str(&self.lines[start_line].text()[..start_col]);
        joined.push_str(&insert);
        joined.push_str(&self.lines[end_line].text()[end_col..]);

        let new_lines: Vec<Line> = joined.split('\n').map(Line::from).collect();
        let count = new_lines.len();
        self.lines.splice(start_line..=end_line, new_lines);

        AppliedEdit {
            range: start..end,
            inserted_len: insert.len(),
            lines: start_line..start_line + count,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert Windows line endings to `\n`
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.line_count(), 1);
        assert!(doc.is_empty());
        assert_eq!(doc.text(), "");
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_from_text_round_trips() {
        for text in ["a\nb", "a\nb\n", "\n\n", "single", ""] {
            assert_eq!(Document::from_text(text).text(), text);
        }
    }

    #[test]
    fn test_crlf_normalized() {
        let doc = Document::from_text("a\r\nb\r\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.text(), "a\nb\n");
    }

    #[test]
    fn test_offset_position_conversion() {
        let doc = Document::from_text("abc\nde\n\nf");
        assert_eq!(doc.offset_to_position(0), (0, 0));
        assert_eq!(doc.offset_to_position(3), (0, 3));
        assert_eq!(doc.offset_to_position(4), (1, 0));
        assert_eq!(doc.offset_to_position(7), (2, 0));
        assert_eq!(doc.offset_to_position(8), (3, 0));
        assert_eq!(doc.offset_to_position(100), (3, 1));
        assert_eq!(doc.position_to_offset(1, 1), 5);
        assert_eq!(doc.position_to_offset(1, 99), 6);
        assert_eq!(doc.position_to_offset(99, 0), 8);
        assert_eq!(doc.line_start(2), 7);
    }

    #[test]
    fn test_clamp_offset_snaps_to_char_boundary() {
        let doc = Document::from_text("é!");
        assert_eq!(doc.clamp_offset(1), 0);
        assert_eq!(doc.clamp_offset(2), 2);
        assert_eq!(doc.clamp_offset(50), 3);
    }

    #[test]
    fn test_insert_within_line() {
        let mut doc = Document::from_text("hello world");
        let applied = doc.apply(&TextEdit::insert(5, ","));
        assert_eq!(doc.text(), "hello, world");
        assert_eq!(applied.lines, 0..1);
        assert_eq!(applied.range, 5..5);
        assert_eq!(applied.inserted_len, 1);
    }

    #[test]
    fn test_insert_newlines_splits_line() {
        let mut doc = Document::from_text("ab\ncd");
        let applied = doc.apply(&TextEdit::insert(1, "x\ny\n"));
        assert_eq!(doc.text(), "ax\ny\nb\ncd");
        assert_eq!(applied.lines, 0..3);
        assert_eq!(doc.line_count(), 4);
    }

    #[test]
    fn test_delete_across_lines_joins() {
        let mut doc = Document::from_text("one\ntwo\nthree");
        let applied = doc.apply(&TextEdit::delete(2..9));
        assert_eq!(doc.text(), "onhree");
        assert_eq!(applied.lines, 0..1);
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn test_replace_clamps_out_of_range() {
        let mut doc = Document::from_text("abc");
        let applied = doc.apply(&TextEdit::replace(2..40, "Z"));
        assert_eq!(doc.text(), "abZ");
        assert_eq!(applied.range, 2..3);

        // Reversed ranges collapse to an insertion
        doc.apply(&TextEdit::replace(3..1, "!"));
        assert_eq!(doc.text(), "abZ!");
    }

    #[test]
    fn test_slice() {
        let doc = Document::from_text("one\ntwo\nthree");
        assert_eq!(doc.slice(1..3), "ne");
        assert_eq!(doc.slice(2..9), "e\ntwo\nt");
        assert_eq!(doc.slice(10..100), "ree");
    }
}
