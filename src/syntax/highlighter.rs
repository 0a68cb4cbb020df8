//! Block highlighter
//!
//! Tracks triple-quoted string regions across lines and keeps each line's
//! cached spans in sync with its predecessor's exit state. After an edit
//! only the edited lines are recomputed, plus however many following lines
//! see their exit state flip as a result.

use std::ops::Range;
use std::sync::Arc;

use super::rules::{BlockState, Delimiter, LineClassification, RuleSet};
use crate::line::{Line, LineHighlight};

/// Triple-quoted string layout of one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockScan {
    /// Byte ranges styled as multi-line string, delimiters included
    pub regions: Vec<Range<usize>>,
    /// First byte where ordinary rules may match
    pub code_start: usize,
    /// State at end of line
    pub exit: BlockState,
}

/// Earliest opening delimiter at or after `from`
fn find_opening(text: &str, from: usize) -> Option<(usize, Delimiter)> {
    Delimiter::ALL
        .into_iter()
        .filter_map(|delim| text[from..].find(delim.as_str()).map(|i| (from + i, delim)))
        .min_by_key(|(pos, _)| *pos)
}

/// Position of `delim` at or after `from`
fn find_closing(text: &str, from: usize, delim: Delimiter) -> Option<usize> {
    text.get(from..)
        .and_then(|rest| rest.find(delim.as_str()))
        .map(|i| from + i)
}

/// Scan a line for triple-quoted string regions.
///
/// Each occurrence of the active delimiter toggles the state. Inside a
/// region the other delimiter is plain content.
pub fn scan_block(text: &str, entry: BlockState) -> BlockScan {
    let mut regions = Vec::new();
    let mut pos = 0;

    if let BlockState::InsideMultilineString(delim) = entry {
        match find_closing(text, 0, delim) {
            Some(close) => {
                pos = close + delim.len();
                regions.push(0..pos);
            }
            None => {
                if !text.is_empty() {
                    regions.push(0..text.len());
                }
                return BlockScan {
                    regions,
                    code_start: text.len(),
                    exit: entry,
                };
            }
        }
    }

    let code_start = pos;
    let mut exit = BlockState::Code;

    while let Some((open, delim)) = find_opening(text, pos) {
        let body = open + delim.len();
        match find_closing(text, body, delim) {
            Some(close) => {
                pos = close + delim.len();
                regions.push(open..pos);
            }
            None => {
                regions.push(open..text.len());
                exit = BlockState::InsideMultilineString(delim);
                break;
            }
        }
    }

    BlockScan {
        regions,
        code_start,
        exit,
    }
}

/// Applies a shared [`RuleSet`] to the lines of one document
#[derive(Debug, Clone)]
pub struct Highlighter {
    rules: Arc<RuleSet>,
}

impl Highlighter {
    /// Create a highlighter over a compiled rule set
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Classify a single line without touching any cache
    pub fn classify(&self, text: &str, entry: BlockState) -> LineClassification {
        self.rules.classify_line(text, entry)
    }

    /// Recompute every line from the top
    pub fn highlight_all(&self, lines: &mut [Line]) -> Range<usize> {
        let mut entry = BlockState::Code;
        for line in lines.iter_mut() {
            let result = self.classify(line.text(), entry);
            let exit = result.exit;
            line.set_highlight(LineHighlight::new(entry, result));
            entry = exit;
        }
        0..lines.len()
    }

    /// Recompute `changed` and propagate forward until exit states settle.
    ///
    /// Returns the range of lines whose spans were recomputed.
    pub fn rehighlight(&self, lines: &mut [Line], changed: Range<usize>) -> Range<usize> {
        if lines.is_empty() {
            return 0..0;
        }
        let mut start = changed.start.min(lines.len() - 1);
        // Never trust an uncached predecessor
        while start > 0 && lines[start - 1].highlight().is_none() {
            start -= 1;
        }
        let last_changed = changed.end.max(start + 1);

        let mut idx = start;
        while idx < lines.len() {
            let entry = if idx == 0 {
                BlockState::Code
            } else {
                lines[idx - 1]
                    .highlight()
                    .map(|h| h.exit)
                    .unwrap_or_default()
            };
            let result = self.classify(lines[idx].text(), entry);
            let exit = result.exit;
            lines[idx].set_highlight(LineHighlight::new(entry, result));
            idx += 1;

            // Settled once the next line was already computed from this exit
            let next_entry = lines.get(idx).and_then(|l| l.highlight()).map(|h| h.entry);
            if idx >= last_changed && next_entry == Some(exit) {
                break;
            }
        }

        tracing::trace!(from = start, to = idx, "rehighlighted lines");
        start..idx
    }
}
