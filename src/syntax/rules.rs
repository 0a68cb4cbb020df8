//! Lexical rules and rule sets
//!
//! A [`RuleSet`] is built once at startup and never mutated. Classifying a
//! line paints every match of every rule in priority order, so a later
//! category overwrites an earlier one wherever their matches overlap.

use regex::Regex;

use super::highlighter::scan_block;
use super::style::Span;
use super::tokens::StyleTag;
use crate::error::{EditorError, Result};

/// Closing/opening delimiter of a triple-quoted string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `"""`
    TripleDouble,
    /// `'''`
    TripleSingle,
}

impl Delimiter {
    /// Both delimiters, in the order they are searched for
    pub const ALL: [Delimiter; 2] = [Delimiter::TripleDouble, Delimiter::TripleSingle];

    /// Literal text of the delimiter
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::TripleDouble => "\"\"\"",
            Delimiter::TripleSingle => "'''",
        }
    }

    /// Length of the delimiter in bytes
    pub fn len(self) -> usize {
        self.as_str().len()
    }
}

/// Carry-over state at the start (or end) of a line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlockState {
    /// Ordinary code context
    #[default]
    Code,
    /// Inside a triple-quoted string opened by the given delimiter
    InsideMultilineString(Delimiter),
}

/// A single-line pattern rule
pub struct Rule {
    /// Name for debugging and error reporting
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Tag assigned to matches
    pub tag: StyleTag,
}

impl Rule {
    /// Compile a new rule
    pub fn new(name: &str, pattern: &str, tag: StyleTag) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| EditorError::InvalidPattern {
            rule: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern: regex,
            tag,
        })
    }

    /// All non-overlapping matches starting at or after `from`, as byte ranges.
    ///
    /// Searching starts at `from` but still sees the text before it, so word
    /// boundaries and anchors behave as they would on the whole line.
    pub fn matches_from(&self, text: &str, from: usize) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        let mut pos = from;
        while pos <= text.len() {
            let Some(m) = self.pattern.find_at(text, pos) else {
                break;
            };
            if m.end() > m.start() {
                found.push((m.start(), m.end()));
                pos = m.end();
            } else {
                // Empty match: step over one char
                pos = m.end()
                    + text[m.end()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
            }
        }
        found
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("tag", &self.tag)
            .finish()
    }
}

/// Result of classifying a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClassification {
    /// Non-overlapping spans, sorted by offset
    pub spans: Vec<Span>,
    /// State at end of line (entry state of the next line)
    pub exit: BlockState,
}

/// Immutable, priority-ordered collection of rules
#[derive(Debug)]
pub struct RuleSet {
    /// Rules sorted by tag priority (lowest first); ties keep insertion order
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set from rules in any order
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(|rule| rule.tag.priority());
        tracing::debug!(rules = rules.len(), "compiled rule set");
        Self { rules }
    }

    /// Compile a rule set from `(name, pattern, tag)` triples.
    ///
    /// Fails on the first malformed pattern.
    pub fn compile(specs: &[(&str, &str, StyleTag)]) -> Result<Self> {
        let rules = specs
            .iter()
            .map(|(name, pattern, tag)| Rule::new(name, pattern, *tag))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(rules))
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classify one line given the state at its start.
    ///
    /// Text covered by a triple-quoted string carried over from the previous
    /// line is inert: no ordinary rule may match inside it.
    pub fn classify_line(&self, text: &str, entry: BlockState) -> LineClassification {
        let scan = scan_block(text, entry);
        let mut paint: Vec<Option<StyleTag>> = vec![None; text.len()];

        for tag in StyleTag::ALL {
            if tag == StyleTag::MultilineString {
                for region in &scan.regions {
                    paint[region.clone()].fill(Some(tag));
                }
            }
            for rule in self.rules.iter().filter(|rule| rule.tag == tag) {
                for (start, end) in rule.matches_from(text, scan.code_start) {
                    paint[start..end].fill(Some(tag));
                }
            }
        }

        LineClassification {
            spans: flatten(&paint),
            exit: scan.exit,
        }
    }
}

/// Collapse a per-byte tag map into runs
fn flatten(paint: &[Option<StyleTag>]) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for (pos, tag) in paint.iter().enumerate() {
        let Some(tag) = *tag else { continue };
        match spans.last_mut() {
            Some(last) if last.tag == tag && last.end() == pos => last.len += 1,
            _ => spans.push(Span::new(pos, 1, tag)),
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rules() -> RuleSet {
        RuleSet::compile(&[
            ("number", r"\b\d+\b", StyleTag::Number),
            ("keyword", r"\b(if|else)\b", StyleTag::Keyword),
            ("string", r#""[^"]*""#, StyleTag::StringLiteral),
            ("comment", r"#.*$", StyleTag::Comment),
        ])
        .unwrap()
    }

    #[test]
    fn test_rules_sorted_by_priority() {
        let rules = test_rules();
        let tags: Vec<_> = rules.rules().iter().map(|r| r.tag).collect();
        assert_eq!(
            tags,
            vec![StyleTag::Keyword, StyleTag::StringLiteral, StyleTag::Comment, StyleTag::Number]
        );
    }

    #[test]
    fn test_malformed_pattern_fails() {
        let err = RuleSet::compile(&[("bad", r"(unclosed", StyleTag::Keyword)]).unwrap_err();
        assert!(matches!(err, EditorError::InvalidPattern { ref rule, .. } if rule == "bad"));
    }

    #[test]
    fn test_matches_from_non_overlapping() {
        let rule = Rule::new("number", r"\d+", StyleTag::Number).unwrap();
        assert_eq!(rule.matches_from("a 12 b 345", 0), vec![(2, 4), (7, 10)]);
        assert_eq!(rule.matches_from("a 12 b 345", 5), vec![(7, 10)]);
        assert!(rule.matches_from("none", 0).is_empty());
    }

    #[test]
    fn test_matches_from_keeps_word_boundaries() {
        let rule = Rule::new("number", r"\b\d+\b", StyleTag::Number).unwrap();
        // Starting mid-word must not invent a boundary
        assert!(rule.matches_from("x12", 1).is_empty());
    }

    #[test]
    fn test_matches_from_empty_pattern_terminates() {
        let rule = Rule::new("empty", r"x*", StyleTag::Keyword).unwrap();
        assert_eq!(rule.matches_from("ab→xx", 0), vec![(5, 7)]);
    }

    #[test]
    fn test_keyword_inside_string_is_string() {
        let result = test_rules().classify_line(r#"x = "if" if y"#, BlockState::Code);
        assert_eq!(
            result.spans,
            vec![Span::new(4, 4, StyleTag::StringLiteral), Span::new(9, 2, StyleTag::Keyword)]
        );
    }

    #[test]
    fn test_comment_overrides_string_and_number_overrides_comment() {
        let result = test_rules().classify_line(r#"# "a" 12"#, BlockState::Code);
        assert_eq!(
            result.spans,
            vec![Span::new(0, 6, StyleTag::Comment), Span::new(6, 2, StyleTag::Number)]
        );
    }

    #[test]
    fn test_classify_is_idempotent() {
        let rules = test_rules();
        let text = r#"if x: "y" # 3"#;
        assert_eq!(
            rules.classify_line(text, BlockState::Code),
            rules.classify_line(text, BlockState::Code)
        );
    }

    #[test]
    fn test_spans_never_overlap() {
        let result = test_rules().classify_line(r#"if "else 1" # 2 "3""#, BlockState::Code);
        for pair in result.spans.windows(2) {
            assert!(pair[0].end() <= pair[1].start);
        }
    }

    #[test]
    fn test_block_state_default() {
        assert_eq!(BlockState::default(), BlockState::Code);
    }
}
