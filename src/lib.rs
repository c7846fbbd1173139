//! # md2wechat
//!
//! Convert documents into self-contained, styled HTML ready to paste into the
//! WeChat article editor.
//!
//! Every input is first brought to Markdown, then rendered to HTML, given
//! inline styles for the elements the editor strips class styling from, and
//! wrapped in a full document carrying one of eight stylesheets.
//!
//! ## Quick Start
//!
//! ```no_run
//! use md2wechat::{convert_file, ConvertOptions};
//!
//! let options = ConvertOptions::new()
//!     .with_style("tech")
//!     .with_title("Release notes");
//!
//! match convert_file("notes.md", None, &options) {
//!     Some(report) => println!("wrote {}", report.output.display()),
//!     None => eprintln!("conversion failed"),
//! }
//! ```
//!
//! ## In-memory rendering
//!
//! ```
//! use md2wechat::{markdown_to_wechat, ConvertOptions};
//!
//! let doc = markdown_to_wechat("# Hello\n\n> quoted", &ConvertOptions::default());
//! assert!(doc.html.starts_with("<!DOCTYPE html>"));
//! assert!(doc.html.contains("<blockquote style="));
//! ```
//!
//! ## Features
//!
//! - `docx` (default): Word document support
//! - `rtf` (default): RTF support
//! - `service` (default): upload conversion service with in-memory history
//! - `rst`: reStructuredText support
//! - `async`: Async file I/O with Tokio

pub mod convert;
pub mod converter;
pub mod detect;
pub mod error;
pub mod model;
pub mod render;
pub mod styles;

#[cfg(feature = "docx")]
pub mod docx;

#[cfg(feature = "service")]
pub mod service;

// Re-exports
pub use converter::{default_output_path, Converter};
pub use detect::{detect_format, Format};
pub use error::{Error, Result};
pub use model::{ConversionReport, SourceDocument, WeChatDocument};
pub use render::ConvertOptions;
pub use styles::{available_styles, get_style, StyleSheet, DEFAULT_STYLE};

use std::path::Path;

/// Convert a file and write the styled article.
///
/// Without `output` the article is written next to the input with an
/// `.html` extension. Failures are logged and reported as `None`.
///
/// # Example
///
/// ```no_run
/// use md2wechat::{convert_file, ConvertOptions};
/// use std::path::Path;
///
/// let options = ConvertOptions::new().with_style("elegant");
/// let report = convert_file("essay.docx", Some(Path::new("essay.html")), &options);
/// assert!(report.is_some());
/// ```
pub fn convert_file(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Option<ConversionReport> {
    Converter::new(options.clone()).convert_file(input, output)
}

/// Render Markdown text straight into a styled article.
pub fn markdown_to_wechat(markdown: &str, options: &ConvertOptions) -> WeChatDocument {
    render::render_document(markdown, options)
}

/// Convert in-memory content of a known format.
///
/// # Example
///
/// ```
/// use md2wechat::{convert_bytes, ConvertOptions, Format};
///
/// let doc = convert_bytes(b"<h2>News</h2>", Format::Html, &ConvertOptions::default())?;
/// assert!(doc.html.contains("<h2 id=\"news\">News</h2>"));
/// # Ok::<(), md2wechat::Error>(())
/// ```
pub fn convert_bytes(
    content: &[u8],
    format: Format,
    options: &ConvertOptions,
) -> Result<WeChatDocument> {
    let source = SourceDocument::new(content.to_vec(), format);
    Converter::new(options.clone()).convert_source(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_markdown_to_wechat() {
        let options = ConvertOptions::new().with_style("colorful");
        let doc = markdown_to_wechat("Hello", &options);
        assert_eq!(doc.style, "colorful");
        assert!(doc.html.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_convert_bytes_text() {
        let doc = convert_bytes(b"# Title\n* a", Format::Text, &ConvertOptions::default()).unwrap();
        assert!(doc.html.contains("<h1 id=\"title\">Title</h1>"));
        assert!(doc.html.contains("<li>a</li>"));
    }

    #[test]
    fn test_convert_bytes_unknown() {
        let err = convert_bytes(b"x", Format::Unknown, &ConvertOptions::default()).unwrap_err();
        assert!(err.is_unknown_format());
    }

    #[test]
    fn test_convert_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("page.htm");
        std::fs::write(&input, "<p>Body</p>").unwrap();

        let report = convert_file(&input, None, &ConvertOptions::default()).unwrap();
        assert_eq!(report.format, Format::Html);
        assert_eq!(report.output, dir.path().join("page.html"));
        assert!(report.output.exists());
    }
}
