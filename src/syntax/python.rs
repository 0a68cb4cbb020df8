//! Python rule set

use super::rules::RuleSet;
use super::tokens::StyleTag;
use crate::error::Result;

const KEYWORDS: &str = r"\b(False|None|True|and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield)\b";

const BUILTINS: &str = r"\b(abs|all|any|ascii|bin|bool|bytearray|bytes|callable|chr|classmethod|cls|compile|complex|delattr|dict|dir|divmod|enumerate|eval|exec|filter|float|format|frozenset|getattr|globals|hasattr|hash|help|hex|id|input|int|isinstance|issubclass|iter|len|list|locals|map|max|memoryview|min|next|object|oct|open|ord|pow|print|property|range|repr|reversed|round|self|set|setattr|slice|sorted|staticmethod|str|sum|super|tuple|type|vars|zip)\b";

/// Compile the Python rule set.
///
/// Triple-quoted strings are not listed here: the block scanner owns them.
pub fn python_rules() -> Result<RuleSet> {
    RuleSet::compile(&[
        ("keyword", KEYWORDS, StyleTag::Keyword),
        ("builtin", BUILTINS, StyleTag::Builtin),
        // Prefixed (f"", r'', b"") or plain, terminated on the same line
        ("double_string", r#"(?:\b[rRbBuUfF]{1,2})?"(?:[^"\\]|\\.)*""#, StyleTag::StringLiteral),
        ("single_string", r"(?:\b[rRbBuUfF]{1,2})?'(?:[^'\\]|\\.)*'", StyleTag::StringLiteral),
        ("comment", r"#.*$", StyleTag::Comment),
        ("decimal", r"\b\d+(?:\.\d+)?\b", StyleTag::Number),
        ("hex", r"\b0[xX][0-9a-fA-F]+\b", StyleTag::Number),
        ("octal", r"\b0[oO][0-7]+\b", StyleTag::Number),
        ("binary", r"\b0[bB][01]+\b", StyleTag::Number),
        ("decorator", r"@[A-Za-z_][\w.]*", StyleTag::Decorator),
    ])
}
