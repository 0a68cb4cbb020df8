//! Syntax highlighting
//!
//! Rules classify a single line; the highlighter threads triple-quoted
//! string state between lines and keeps per-line caches current.

mod style;
mod tokens;
mod rules;
mod highlighter;
mod python;

pub use style::{tag_at, Color, Span, Style};
pub use tokens::StyleTag;
pub use rules::{BlockState, Delimiter, LineClassification, Rule, RuleSet};
pub use highlighter::{scan_block, BlockScan, Highlighter};
pub use python::python_rules;
