//! reStructuredText to Markdown, by way of HTML.

use super::MarkdownAdapter;
use crate::detect::Format;
use crate::error::Result;
use crate::model::SourceDocument;

/// Renders RST to an HTML body and converts that with the HTML adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RstAdapter;

impl MarkdownAdapter for RstAdapter {
    fn format(&self) -> Format {
        Format::Rst
    }

    #[cfg(feature = "rst")]
    fn to_markdown(&self, source: &SourceDocument) -> Result<String> {
        let html = rst_to_html(source.text()?)?;
        Ok(super::html::html_to_markdown(&html))
    }

    #[cfg(not(feature = "rst"))]
    fn to_markdown(&self, _source: &SourceDocument) -> Result<String> {
        Err(crate::error::Error::MissingDependency {
            format: Format::Rst,
            feature: "rst",
            package: "rst_parser",
        })
    }
}

/// Render RST source to an HTML body fragment.
#[cfg(feature = "rst")]
pub fn rst_to_html(rst: &str) -> Result<String> {
    use crate::error::Error;

    let document = rst_parser::parse(rst).map_err(|e| Error::Rst(e.to_string()))?;
    let mut out = Vec::new();
    rst_renderer::render_html(&document, &mut out, false).map_err(|e| Error::Rst(e.to_string()))?;
    String::from_utf8(out).map_err(|e| Error::Encoding(e.to_string()))
}
