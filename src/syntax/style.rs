//! Style and span types
//!
//! Spans are what the highlighter produces; styles are what the
//! render layer turns them into.

use super::tokens::StyleTag;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a kebab-case color name ("bright-black", "red", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.trim().to_lowercase().as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A styled region within one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    /// Lexical category of the region
    pub tag: StyleTag,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, len: usize, tag: StyleTag) -> Self {
        Self { start, len, tag }
    }

    /// Byte offset one past the end of the span
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end()
    }
}

/// Tag at a byte position, if any span covers it
pub fn tag_at(spans: &[Span], pos: usize) -> Option<StyleTag> {
    spans.iter().find(|span| span.contains(pos)).map(|span| span.tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold();
        assert_eq!(style.fg, Color::Red);
        assert_eq!(style.bg, Color::Default);
        assert!(style.bold);
        assert!(!style.is_default());
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(5, 5, StyleTag::Number);
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.end(), 10);
    }

    #[test]
    fn test_color_from_name() {
        assert_eq!(Color::from_name("bright-black"), Some(Color::BrightBlack));
        assert_eq!(Color::from_name(" Red "), Some(Color::Red));
        assert_eq!(Color::from_name("mauve"), None);
    }
}
