//! Line representation and cached highlighting

use unicode_width::UnicodeWidthStr;

use crate::syntax::{BlockState, LineClassification, Span};

/// Highlighting computed for one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlight {
    /// State at line start
    pub entry: BlockState,
    /// State at line end
    pub exit: BlockState,
    /// Flattened spans for the line
    pub spans: Vec<Span>,
}

impl LineHighlight {
    /// Record a classification computed from `entry`
    pub fn new(entry: BlockState, result: LineClassification) -> Self {
        Self {
            entry,
            exit: result.exit,
            spans: result.spans,
        }
    }
}

/// A single line of text in a document
#[derive(Debug, Clone, Default)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
    /// Cached highlighting; cleared whenever the text changes
    highlight: Option<LineHighlight>,
}

impl Line {
    /// Create a new empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line from a string
    pub fn from_string(s: String) -> Self {
        Self {
            text: s,
            highlight: None,
        }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Display width of the text up to a byte position
    pub fn width_to(&self, byte_pos: usize) -> usize {
        let end = floor_char_boundary(&self.text, byte_pos);
        self.text[..end].width()
    }

    /// Number of leading spaces and tabs
    pub fn indent_len(&self) -> usize {
        leading_whitespace(&self.text)
    }

    /// Cached highlighting, if computed since the last edit
    pub fn highlight(&self) -> Option<&LineHighlight> {
        self.highlight.as_ref()
    }

    /// Store freshly computed highlighting
    pub fn set_highlight(&mut self, highlight: LineHighlight) {
        self.highlight = Some(highlight);
    }

    /// Spans from the cache, empty if not highlighted
    pub fn spans(&self) -> &[Span] {
        self.highlight.as_ref().map_or(&[], |h| h.spans.as_slice())
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

/// Byte length of the run of spaces and tabs at the start of `text`
pub fn leading_whitespace(text: &str) -> usize {
    text.len() - text.trim_start_matches([' ', '\t']).len()
}

/// Nearest char boundary at or before `pos`, clamped to the text length
pub fn floor_char_boundary(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos;
    while p > 0 && !text.is_char_boundary(p) {
        p -= 1;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::StyleTag;

    #[test]
    fn test_basic_line() {
        let line = Line::from("Hello");
        assert_eq!(line.text(), "Hello");
        assert_eq!(line.len(), 5);
        assert!(!line.is_empty());
        assert!(line.highlight().is_none());
        assert!(line.spans().is_empty());
    }

    #[test]
    fn test_indent_len() {
        assert_eq!(Line::from("    x").indent_len(), 4);
        assert_eq!(Line::from("\t  x").indent_len(), 3);
        assert_eq!(Line::from("x    ").indent_len(), 0);
        assert_eq!(Line::from("   ").indent_len(), 3);
    }

    #[test]
    fn test_width_to_wide_chars() {
        let line = Line::from("你好x");
        assert_eq!(line.width_to(3), 2);
        assert_eq!(line.width_to(6), 4);
        // Mid-char positions round down
        assert_eq!(line.width_to(4), 2);
        assert_eq!(line.width_to(100), 5);
    }

    #[test]
    fn test_floor_char_boundary() {
        let text = "café";
        assert_eq!(floor_char_boundary(text, 4), 3);
        assert_eq!(floor_char_boundary(text, 5), 5);
        assert_eq!(floor_char_boundary(text, 9), 5);
        assert_eq!(floor_char_boundary(text, 0), 0);
    }

    #[test]
    fn test_set_highlight() {
        let mut line = Line::from("42");
        line.set_highlight(LineHighlight::new(
            BlockState::Code,
            LineClassification {
                spans: vec![Span::new(0, 2, StyleTag::Number)],
                exit: BlockState::Code,
            },
        ));
        assert_eq!(line.spans(), &[Span::new(0, 2, StyleTag::Number)]);
    }
}
