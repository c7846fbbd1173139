//! Error types for the md2wechat library.

use crate::detect::Format;
use std::io;
use thiserror::Error;

/// Result type alias for md2wechat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file extension does not map to any known format.
    #[error("Unsupported file format: {0}")]
    UnknownFormat(String),

    /// The adapter for a format was not compiled in.
    #[error("{format} support requires the `{feature}` feature (provided by the `{package}` crate)")]
    MissingDependency {
        /// Format whose adapter is unavailable
        format: Format,
        /// Cargo feature that enables the adapter
        feature: &'static str,
        /// Crate providing the parser
        package: &'static str,
    },

    /// The source is not valid text in the expected encoding.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required document component is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Invalid or malformed data in the document.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// reStructuredText parsing or rendering failed.
    #[error("RST error: {0}")]
    Rst(String),
}

impl Error {
    /// Whether this error is the "unknown format" sentinel that callers are
    /// expected to branch on.
    pub fn is_unknown_format(&self) -> bool {
        matches!(self, Error::UnknownFormat(_))
    }

    /// Whether this error reports an adapter that was not compiled in.
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, Error::MissingDependency { .. })
    }
}

#[cfg(feature = "docx")]
impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

#[cfg(feature = "docx")]
impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
