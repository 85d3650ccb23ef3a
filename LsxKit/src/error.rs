//! Error types for `LsxKit`

use std::fmt;

use thiserror::Error;

/// Which safety ceiling a document exceeded while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// Total number of elements in the document.
    NodeCount,
    /// Element nesting depth.
    Depth,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitKind::NodeCount => write!(f, "node count"),
            LimitKind::Depth => write!(f, "nesting depth"),
        }
    }
}

/// The error type for `LsxKit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Parsing Errors ====================
    /// The document is not well-formed (unbalanced tags, no root element, ...).
    #[error("LSX parse error at byte {position}: {message}")]
    Parse {
        /// Byte offset reported by the reader when the problem was found.
        position: usize,
        /// What went wrong.
        message: String,
    },

    /// The document exceeded a configured node-count or depth ceiling.
    #[error("document too large: {limit} exceeds the limit of {max}")]
    DocumentTooLarge {
        /// The ceiling that was hit.
        limit: LimitKind,
        /// The configured maximum.
        max: usize,
    },

    /// XML writer error.
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== Structure Errors ====================
    /// An expected substructure (e.g. the `dialog` node) is absent.
    #[error("structural path missing: {0}")]
    StructuralPathMissing(String),

    /// An edit request could not be turned into an edit command.
    #[error("invalid edit: {0}")]
    InvalidEdit(String),

    // ==================== Configuration Errors ====================
    /// The configuration file could not be parsed.
    #[error("config error: {0}")]
    ConfigError(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

impl Error {
    /// Whether this error came from malformed or oversized input rather than the environment.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::Parse { .. } | Error::DocumentTooLarge { .. } | Error::Utf8Error(_)
        )
    }
}

/// A specialized Result type for `LsxKit` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_large_message() {
        let err = Error::DocumentTooLarge {
            limit: LimitKind::Depth,
            max: 8,
        };
        assert_eq!(err.to_string(), "document too large: nesting depth exceeds the limit of 8");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_structural_error_is_not_input_error() {
        let err = Error::StructuralPathMissing("dialog".to_string());
        assert!(!err.is_input_error());
    }
}
