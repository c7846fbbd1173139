//! Document model structures.

use crate::detect::{detect_format, Format};
use crate::error::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Raw input content plus its declared format.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Raw content bytes
    pub content: Vec<u8>,

    /// Declared format
    pub format: Format,

    /// Path the content was read from, if any
    pub path: Option<PathBuf>,
}

impl SourceDocument {
    /// Create a source from bytes with an explicit format.
    pub fn new(content: impl Into<Vec<u8>>, format: Format) -> Self {
        Self {
            content: content.into(),
            format,
            path: None,
        }
    }

    /// Create a source from text with an explicit format.
    pub fn from_text(text: impl Into<String>, format: Format) -> Self {
        Self::new(text.into().into_bytes(), format)
    }

    /// Read a file, detecting its format from the extension.
    ///
    /// The file is read even when the format is [`Format::Unknown`]; callers
    /// decide what to do with it.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        Ok(Self {
            content,
            format: detect_format(path),
            path: Some(path.to_path_buf()),
        })
    }

    /// Attach the originating path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// The content as UTF-8 text.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.content).map_err(|e| {
            Error::Encoding(format!(
                "{} is not valid UTF-8: {}",
                self.display_name(),
                e
            ))
        })
    }

    /// Name used in messages: the path if known, otherwise the format tag.
    pub fn display_name(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => format!("{} input", self.format),
        }
    }
}

/// The final, assembled article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeChatDocument {
    /// Complete HTML document, `<!DOCTYPE html>` through `</html>`
    pub html: String,

    /// Title shown above the article body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Subtitle shown under the title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Id of the stylesheet embedded in the head
    pub style: &'static str,
}

impl WeChatDocument {
    /// The HTML text.
    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Consume the document, returning the HTML text.
    pub fn into_html(self) -> String {
        self.html
    }

    /// Write the HTML to a file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.html)?;
        Ok(())
    }
}

impl std::fmt::Display for WeChatDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.html)
    }
}

/// Outcome of converting a file on disk.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Input file
    pub input: PathBuf,

    /// Output file that was written
    pub output: PathBuf,

    /// Detected input format
    pub format: Format,

    /// The assembled article
    pub document: WeChatDocument,
}

impl ConversionReport {
    /// One-line description of the pipeline that ran.
    pub fn pipeline(&self) -> String {
        if self.format == Format::Markdown {
            "markdown → WeChat HTML".to_string()
        } else {
            format!("{} → markdown → WeChat HTML", self.format)
        }
    }
}
