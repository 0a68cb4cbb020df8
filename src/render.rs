//! Rendering of highlighted lines to an ANSI terminal
//!
//! The renderer is a passive consumer: it pulls line text and spans from a
//! session, writes them out, and keeps nothing.

use std::collections::HashMap;
use std::io::Write;

use crossterm::style::{
    Attribute, Color as TermColor, ContentStyle, Print, PrintStyledContent, StyledContent,
};
use crossterm::QueueableCommand;

use crate::config::Config;
use crate::error::Result;
use crate::session::DocumentSession;
use crate::syntax::{Color, Span, Style, StyleTag};

/// Presentation settings for the render layer
#[derive(Debug, Clone)]
pub struct Theme {
    styles: HashMap<StyleTag, Style>,
    /// Line-number color
    pub gutter: Style,
    /// Spaces between line number and text
    pub gutter_margin: usize,
}

impl Theme {
    /// Theme built from the tags' default styles
    pub fn new() -> Self {
        Self {
            styles: StyleTag::ALL
                .into_iter()
                .map(|tag| (tag, tag.default_style()))
                .collect(),
            gutter: Style::fg(Color::BrightBlack),
            gutter_margin: 1,
        }
    }

    /// Default theme with `[theme]` overrides from the config applied.
    ///
    /// Unknown tag or color names are skipped with a warning.
    pub fn from_config(config: &Config) -> Self {
        let mut theme = Self::new();
        for (tag_name, color_name) in &config.theme {
            match (StyleTag::from_name(tag_name), Color::from_name(color_name)) {
                (Some(tag), Some(color)) => {
                    let style = theme.style(tag).with_fg(color);
                    theme.styles.insert(tag, style);
                }
                _ => tracing::warn!(tag = %tag_name, color = %color_name, "ignoring theme entry"),
            }
        }
        theme
    }

    /// Style for a tag
    pub fn style(&self, tag: StyleTag) -> Style {
        self.styles
            .get(&tag)
            .copied()
            .unwrap_or_else(|| tag.default_style())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

fn term_color(color: Color) -> Option<TermColor> {
    let color = match color {
        Color::Default => return None,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    };
    Some(color)
}

fn content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = term_color(style.fg);
    content.background_color = term_color(style.bg);
    if style.bold {
        content.attributes.set(Attribute::Bold);
    }
    if style.italic {
        content.attributes.set(Attribute::Italic);
    }
    content
}

/// Width of the line-number column for a document of `line_count` lines
pub fn gutter_width(line_count: usize) -> usize {
    line_count.max(1).to_string().len()
}

/// Write one line with its spans applied
pub fn render_line<W: Write>(out: &mut W, text: &str, spans: &[Span], theme: &Theme) -> Result<()> {
    let mut pos = 0;
    for span in spans {
        let start = span.start.min(text.len());
        let end = span.end().min(text.len());
        if start < pos || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            continue;
        }
        if pos < start {
            out.queue(Print(&text[pos..start]))?;
        }
        let styled = StyledContent::new(content_style(theme.style(span.tag)), &text[start..end]);
        out.queue(PrintStyledContent(styled))?;
        pos = end;
    }
    if pos < text.len() {
        out.queue(Print(&text[pos..]))?;
    }
    Ok(())
}

/// Write every line of a session, optionally with a line-number gutter
pub fn render_session<W: Write>(
    out: &mut W,
    session: &DocumentSession,
    theme: &Theme,
    line_numbers: bool,
) -> Result<()> {
    let count = session.line_count();
    let width = gutter_width(count);
    let gutter_style = content_style(theme.gutter);

    for idx in 0..count {
        if line_numbers {
            let number = format!("{:>width$}{}", idx + 1, " ".repeat(theme.gutter_margin));
            out.queue(PrintStyledContent(StyledContent::new(gutter_style, number)))?;
        }
        render_line(out, session.line_text(idx).unwrap_or(""), session.line_spans(idx), theme)?;
        out.queue(Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}
