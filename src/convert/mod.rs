//! Format-to-Markdown adapters.
//!
//! Every input format has one adapter implementing [`MarkdownAdapter`]. The
//! pipeline asks [`adapter_for`] for the adapter and never branches on the
//! format itself.
//!
//! Adapters whose parser lives behind a Cargo feature are always present;
//! when the feature is off they return [`Error::MissingDependency`] at call
//! time.
//!
//! # Example
//!
//! ```
//! use md2wechat::convert::to_markdown;
//! use md2wechat::{Format, SourceDocument};
//!
//! let source = SourceDocument::from_text("<h2>Hello</h2>", Format::Html);
//! assert_eq!(to_markdown(&source)?, "## Hello");
//! # Ok::<(), md2wechat::Error>(())
//! ```

mod docx;
mod html;
mod rst;
mod rtf;
mod text;

pub use docx::{paragraphs_to_markdown, DocxAdapter};
pub use html::{html_to_markdown, HtmlAdapter};
#[cfg(feature = "rst")]
pub use rst::rst_to_html;
pub use rst::RstAdapter;
#[cfg(feature = "rtf")]
pub use rtf::rtf_to_text;
pub use rtf::RtfAdapter;
pub use text::{text_to_markdown, TextAdapter};

use crate::detect::Format;
use crate::error::{Error, Result};
use crate::model::SourceDocument;

/// Produces Markdown text from one source format.
pub trait MarkdownAdapter: Send + Sync {
    /// Format this adapter reads.
    fn format(&self) -> Format;

    /// Convert the source to Markdown.
    fn to_markdown(&self, source: &SourceDocument) -> Result<String>;

    /// Short name used in log messages.
    fn name(&self) -> &'static str {
        self.format().name()
    }
}

/// Markdown sources pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownPassthrough;

impl MarkdownAdapter for MarkdownPassthrough {
    fn format(&self) -> Format {
        Format::Markdown
    }

    fn to_markdown(&self, source: &SourceDocument) -> Result<String> {
        Ok(source.text()?.to_string())
    }
}

static MARKDOWN: MarkdownPassthrough = MarkdownPassthrough;
static HTML: HtmlAdapter = HtmlAdapter;
static TEXT: TextAdapter = TextAdapter;
static RST: RstAdapter = RstAdapter;
static DOCX: DocxAdapter = DocxAdapter;
static RTF: RtfAdapter = RtfAdapter;

/// Adapter for a format, or `None` for [`Format::Unknown`].
pub fn adapter_for(format: Format) -> Option<&'static dyn MarkdownAdapter> {
    match format {
        Format::Markdown => Some(&MARKDOWN),
        Format::Html => Some(&HTML),
        Format::Text => Some(&TEXT),
        Format::Rst => Some(&RST),
        Format::Docx => Some(&DOCX),
        Format::Rtf => Some(&RTF),
        Format::Unknown => None,
    }
}

/// Convert a source document to Markdown with the adapter for its format.
pub fn to_markdown(source: &SourceDocument) -> Result<String> {
    let adapter = adapter_for(source.format).ok_or_else(|| {
        let ext = source
            .path
            .as_ref()
            .map(crate::detect::dotted_extension)
            .unwrap_or_default();
        Error::UnknownFormat(ext)
    })?;

    let markdown = adapter.to_markdown(source)?;
    log::debug!(
        "{} adapter produced {} bytes of markdown from {}",
        adapter.name(),
        markdown.len(),
        source.display_name()
    );
    Ok(markdown)
}
