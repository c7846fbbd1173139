//! Format detection from file names.

use serde::Serialize;
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Extension table, lower-case and without the leading dot.
const EXTENSIONS: &[(&str, Format)] = &[
    ("md", Format::Markdown),
    ("markdown", Format::Markdown),
    ("html", Format::Html),
    ("htm", Format::Html),
    ("txt", Format::Text),
    ("rst", Format::Rst),
    ("docx", Format::Docx),
    ("rtf", Format::Rtf),
];

/// Source document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Markdown (.md, .markdown)
    Markdown,
    /// HTML (.html, .htm)
    Html,
    /// Plain text (.txt)
    Text,
    /// reStructuredText (.rst)
    Rst,
    /// Word document (.docx)
    Docx,
    /// Rich Text Format (.rtf)
    Rtf,
    /// Anything else. A valid detection result, not an error.
    Unknown,
}

impl Format {
    /// All formats that have an adapter, in listing order.
    pub fn all_supported() -> &'static [Format] {
        &[
            Format::Markdown,
            Format::Html,
            Format::Text,
            Format::Rst,
            Format::Docx,
            Format::Rtf,
        ]
    }

    /// Returns the format tag.
    pub fn label(&self) -> &'static str {
        match self {
            Format::Markdown => "markdown",
            Format::Html => "html",
            Format::Text => "text",
            Format::Rst => "rst",
            Format::Docx => "docx",
            Format::Rtf => "rtf",
            Format::Unknown => "unknown",
        }
    }

    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Markdown => "Markdown",
            Format::Html => "HTML",
            Format::Text => "Plain text",
            Format::Rst => "RST",
            Format::Docx => "Word",
            Format::Rtf => "RTF",
            Format::Unknown => "Unknown",
        }
    }

    /// File extensions mapped to this format.
    pub fn extensions(&self) -> Vec<&'static str> {
        EXTENSIONS
            .iter()
            .filter(|(_, format)| format == self)
            .map(|(ext, _)| *ext)
            .collect()
    }

    /// Short note on how the format is handled and what it needs.
    pub fn note(&self) -> &'static str {
        match self {
            Format::Markdown => "native, full feature set",
            Format::Html => "converted to Markdown first",
            Format::Text => "heading and list markers recognized",
            Format::Rst => "requires the `rst` feature",
            Format::Docx => "requires the `docx` feature",
            Format::Rtf => "requires the `rtf` feature",
            Format::Unknown => "not supported",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Detect the format from a file name or path.
///
/// The lower-cased extension is matched against a fixed table. Unmatched or
/// missing extensions yield [`Format::Unknown`].
///
/// # Example
///
/// ```
/// use md2wechat::detect::{detect_format, Format};
///
/// assert_eq!(detect_format("notes.MD"), Format::Markdown);
/// assert_eq!(detect_format("report.pdf"), Format::Unknown);
/// ```
pub fn detect_format(path: impl AsRef<Path>) -> Format {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(format_from_extension)
        .unwrap_or(Format::Unknown)
}

/// Map a bare extension (with or without the leading dot) to a format.
pub fn format_from_extension(ext: &str) -> Format {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    EXTENSIONS
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, format)| *format)
        .unwrap_or(Format::Unknown)
}

/// The dotted, lower-cased extension of a path, or an empty string.
pub fn dotted_extension(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}
