//! Error types for MusicXML import
//!
//! All extractor-level failures surface through [`ParseError`]; callers of
//! the import entry points receive either a complete `Score` or exactly one
//! error describing the first failure encountered.

use thiserror::Error;

/// Result type for MusicXML import operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Fatal import errors
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// XML is malformed (not well-formed)
    #[error("invalid XML: {0}")]
    InvalidXml(String),

    /// MusicXML format not supported (e.g., timewise instead of partwise)
    #[error("unsupported MusicXML format: {0}")]
    UnsupportedFormat(String),

    /// Required structural element is missing
    #[error("missing required element: {0}")]
    MissingElement(String),

    /// Invalid value in XML
    #[error("invalid value '{value}' for element '{element}': {reason}")]
    InvalidValue {
        element: String,
        value: String,
        reason: String,
    },
}
