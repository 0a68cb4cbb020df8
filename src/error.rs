//! Error types for pyscribe

use thiserror::Error;

/// Result type alias for pyscribe operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pattern for rule `{rule}`: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("No file path associated with this document")]
    NoFilePath,

    #[error("No such session: {0}")]
    NoSuchSession(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: EditorError = io.into();
        assert!(matches!(err, EditorError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_invalid_pattern_message() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = EditorError::InvalidPattern {
            rule: "broken".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid pattern for rule `broken`"));
    }
}
