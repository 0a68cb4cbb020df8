//! Style tags for syntax highlighting
//!
//! This module defines the lexical categories a rule can assign
//! and their default visual styles.

use super::style::{Color, Style};

/// Lexical categories, declared in priority order (lowest first).
///
/// When spans of two categories overlap, the later variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleTag {
    /// Language keywords (def, class, if, ...)
    Keyword,
    /// Built-in identifiers (print, len, range, ...)
    Builtin,
    /// Single- or double-quoted string literals
    StringLiteral,
    /// Triple-quoted strings, possibly spanning lines
    MultilineString,
    /// `#` comments
    Comment,
    /// Numeric literals
    Number,
    /// `@decorator` markers
    Decorator,
}

impl StyleTag {
    /// All tags, lowest priority first
    pub const ALL: [StyleTag; 7] = [
        StyleTag::Keyword,
        StyleTag::Builtin,
        StyleTag::StringLiteral,
        StyleTag::MultilineString,
        StyleTag::Comment,
        StyleTag::Number,
        StyleTag::Decorator,
    ];

    /// Position in the fixed priority ordering (higher overrides lower)
    pub fn priority(self) -> u8 {
        self as u8
    }

    /// Get the default style for this tag
    pub fn default_style(self) -> Style {
        match self {
            StyleTag::Keyword => Style::fg(Color::Blue).with_bold(),
            StyleTag::Builtin => Style::fg(Color::Cyan),
            StyleTag::StringLiteral => Style::fg(Color::Green),
            StyleTag::MultilineString => Style::fg(Color::Green),
            StyleTag::Comment => Style::fg(Color::BrightBlack).with_italic(),
            StyleTag::Number => Style::fg(Color::Red),
            StyleTag::Decorator => Style::fg(Color::Yellow),
        }
    }

    /// Get a human-readable name for this tag
    pub fn name(self) -> &'static str {
        match self {
            StyleTag::Keyword => "Keyword",
            StyleTag::Builtin => "Builtin",
            StyleTag::StringLiteral => "StringLiteral",
            StyleTag::MultilineString => "MultilineString",
            StyleTag::Comment => "Comment",
            StyleTag::Number => "Number",
            StyleTag::Decorator => "Decorator",
        }
    }

    /// Parse a tag from its name (for theme overrides)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }
}
