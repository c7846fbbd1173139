//! Plain text to Markdown.

use super::MarkdownAdapter;
use crate::detect::Format;
use crate::error::Result;
use crate::model::SourceDocument;

/// Line-oriented plain text conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextAdapter;

impl MarkdownAdapter for TextAdapter {
    fn format(&self) -> Format {
        Format::Text
    }

    fn to_markdown(&self, source: &SourceDocument) -> Result<String> {
        Ok(text_to_markdown(source.text()?))
    }
}

/// Convert plain text to Markdown, one line at a time.
///
/// Lines are trimmed. Markdown prefixes (`# `, `## `, `### `, `- `, `> `,
/// `1. `) pass through, `* ` bullets become `- ` bullets, blank lines stay
/// blank and everything else is kept verbatim.
pub fn text_to_markdown(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let line = line.trim();
            match line.strip_prefix("* ") {
                Some(item) => format!("- {}", item),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
