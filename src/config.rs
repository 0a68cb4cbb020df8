//! Configuration file support
//!
//! Loads settings from ~/.pyscribe.toml (or %USERPROFILE%\.pyscribe.toml on Windows)
//!
//! Example:
//! ```toml
//! indent-width = 4
//! block-openers = ["def ", "class ", "if ", "for "]
//! auto-pair = true
//! highlight-extensions = ["py", "pyw"]
//! line-numbers = true
//!
//! [theme]
//! Keyword = "blue"
//! Comment = "bright-black"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

const MIN_INDENT_WIDTH: usize = 1;
const MAX_INDENT_WIDTH: usize = 16;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Width of one indent unit, in spaces
    pub indent_width: usize,
    /// Trimmed-line prefixes that open an indented block
    pub block_openers: Vec<String>,
    /// Whether brackets and quotes are paired automatically
    pub auto_pair: bool,
    /// File extensions that get syntax highlighting
    pub highlight_extensions: Vec<String>,
    /// Title shown for sessions with no file path
    pub untitled_name: String,
    /// Whether the renderer draws a line-number gutter
    pub line_numbers: bool,
    /// Style tag name -> color name overrides for rendering
    pub theme: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: 4,
            block_openers: vec!["def ".to_string(), "class ".to_string()],
            auto_pair: true,
            highlight_extensions: vec!["py".to_string(), "pyw".to_string(), "pyi".to_string()],
            untitled_name: "untitled.py".to_string(),
            line_numbers: true,
            theme: HashMap::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".pyscribe.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".pyscribe.toml"))
        }
    }

    /// Load configuration from the default location.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.normalize();
        Ok(config)
    }

    fn normalize(&mut self) {
        self.indent_width = self.indent_width.clamp(MIN_INDENT_WIDTH, MAX_INDENT_WIDTH);
        for ext in &mut self.highlight_extensions {
            *ext = ext.trim_start_matches('.').to_lowercase();
        }
    }

    /// Whether a file at `path` should be highlighted
    pub fn highlights(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.highlight_extensions.iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
indent-width = 2
block-openers = ["def ", "class ", "if "]
auto-pair = false
highlight-extensions = [".PY"]

[theme]
Keyword = "red"
"#;
        let config = Config::parse(contents).unwrap();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.block_openers.len(), 3);
        assert!(!config.auto_pair);
        assert_eq!(config.highlight_extensions, vec!["py".to_string()]);
        assert_eq!(config.theme.get("Keyword").map(String::as_str), Some("red"));
        // Unset keys keep their defaults
        assert_eq!(config.untitled_name, "untitled.py");
        assert!(config.line_numbers);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_indent_width_clamped() {
        let config = Config::parse("indent-width = 0").unwrap();
        assert_eq!(config.indent_width, 1);
        let config = Config::parse("indent-width = 100").unwrap();
        assert_eq!(config.indent_width, 16);
    }

    #[test]
    fn test_malformed_config() {
        assert!(Config::parse("indent-width = \"four\"").is_err());
        assert!(Config::parse("indent-width = ").is_err());
    }

    #[test]
    fn test_highlights_extension() {
        let config = Config::default();
        assert!(config.highlights(Path::new("main.py")));
        assert!(config.highlights(Path::new("MAIN.PY")));
        assert!(!config.highlights(Path::new("notes.txt")));
        assert!(!config.highlights(Path::new("Makefile")));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyscribe.toml");
        fs::write(&path, "line-numbers = false\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert!(!config.line_numbers);
    }
}
