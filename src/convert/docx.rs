//! Word documents to Markdown.

use super::MarkdownAdapter;
use crate::detect::Format;
use crate::error::Result;
use crate::model::{Paragraph, SourceDocument};

/// Converts body paragraphs of a `.docx` file.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxAdapter;

impl MarkdownAdapter for DocxAdapter {
    fn format(&self) -> Format {
        Format::Docx
    }

    #[cfg(feature = "docx")]
    fn to_markdown(&self, source: &SourceDocument) -> Result<String> {
        let reader = crate::docx::DocxReader::from_bytes(source.content.clone())?;
        let paragraphs = reader.paragraphs()?;
        log::debug!("{}: {} body paragraphs", source.display_name(), paragraphs.len());
        Ok(paragraphs_to_markdown(&paragraphs))
    }

    #[cfg(not(feature = "docx"))]
    fn to_markdown(&self, _source: &SourceDocument) -> Result<String> {
        Err(crate::error::Error::MissingDependency {
            format: Format::Docx,
            feature: "docx",
            package: "zip",
        })
    }
}

/// Render paragraphs as Markdown blocks separated by blank lines.
///
/// Empty paragraphs are skipped. Heading styles become `#` headings. In other
/// paragraphs every bold run's text, then every italic run's text, is wrapped
/// by plain substring replacement over the whole paragraph, so repeated text
/// is wrapped wherever it occurs.
pub fn paragraphs_to_markdown(paragraphs: &[Paragraph]) -> String {
    let mut blocks = Vec::new();

    for para in paragraphs {
        let full = para.text();
        let text = full.trim();
        if text.is_empty() {
            continue;
        }

        if let Some(level) = para.heading_level() {
            blocks.push(format!("{} {}", "#".repeat(level), text));
            continue;
        }

        let mut formatted = text.to_string();
        for run in &para.runs {
            if run.bold {
                formatted = formatted.replace(&run.text, &format!("**{}**", run.text));
            }
            if run.italic {
                formatted = formatted.replace(&run.text, &format!("*{}*", run.text));
            }
        }
        blocks.push(formatted);
    }

    blocks.join("\n\n")
}
