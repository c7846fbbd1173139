//! The conversion pipeline.
//!
//! Format detection, Markdown adaptation, rendering and assembly run in
//! that order, once per document.

use crate::convert;
use crate::detect::{detect_format, dotted_extension, Format};
use crate::error::{Error, Result};
use crate::model::{ConversionReport, SourceDocument, WeChatDocument};
use crate::render::{render_document, ConvertOptions};
use std::path::{Path, PathBuf};

/// Drives documents through the pipeline with fixed options.
///
/// # Example
///
/// ```no_run
/// use md2wechat::{ConvertOptions, Converter};
///
/// let converter = Converter::new(ConvertOptions::new().with_style("finance"));
/// if let Some(report) = converter.convert_file("report.docx", None) {
///     println!("wrote {}", report.output.display());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// The options this converter applies.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a source document to Markdown.
    pub fn to_markdown(&self, source: &SourceDocument) -> Result<String> {
        convert::to_markdown(source)
    }

    /// Render Markdown into a finished article.
    pub fn render(&self, markdown: &str) -> WeChatDocument {
        render_document(markdown, &self.options)
    }

    /// Run the whole pipeline on an in-memory source.
    pub fn convert_source(&self, source: &SourceDocument) -> Result<WeChatDocument> {
        if source.format == Format::Markdown {
            log::debug!("{} is already markdown", source.display_name());
        }
        let markdown = self.to_markdown(source)?;
        Ok(self.render(&markdown))
    }

    /// Convert a file and write the result.
    ///
    /// Without `output` the article is written next to the input, see
    /// [`default_output_path`]. An unrecognized extension fails with
    /// [`Error::UnknownFormat`] before the file is read.
    pub fn try_convert_file(
        &self,
        input: impl AsRef<Path>,
        output: Option<&Path>,
    ) -> Result<ConversionReport> {
        let input = input.as_ref();
        let format = detect_format(input);
        if format == Format::Unknown {
            return Err(Error::UnknownFormat(dotted_extension(input)));
        }
        log::info!("detected format: {} ({})", format, input.display());

        let source = SourceDocument::read(input)?;
        let document = self.convert_source(&source)?;

        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_path(input));
        document.write_to(&output)?;
        log::info!("wrote {} ({} bytes)", output.display(), document.html.len());

        Ok(ConversionReport {
            input: input.to_path_buf(),
            output,
            format,
            document,
        })
    }

    /// Convert a file, logging any failure and returning `None` instead of an
    /// error.
    pub fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output: Option<&Path>,
    ) -> Option<ConversionReport> {
        let input = input.as_ref();
        match self.try_convert_file(input, output) {
            Ok(report) => Some(report),
            Err(e) => {
                log::error!("conversion of {} failed: {}", input.display(), e);
                None
            }
        }
    }

    /// Convert a file, reading it with Tokio's file system API.
    #[cfg(feature = "async")]
    pub async fn convert_file_async(
        &self,
        input: impl AsRef<Path>,
        output: Option<&Path>,
    ) -> Result<ConversionReport> {
        let input = input.as_ref();
        let format = detect_format(input);
        if format == Format::Unknown {
            return Err(Error::UnknownFormat(dotted_extension(input)));
        }

        let content = tokio::fs::read(input).await?;
        let source = SourceDocument::new(content, format).with_path(input);
        let document = self.convert_source(&source)?;

        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_path(input));
        tokio::fs::write(&output, document.html.as_bytes()).await?;

        Ok(ConversionReport {
            input: input.to_path_buf(),
            output,
            format,
            document,
        })
    }
}

/// Output path used when none is given: the input with an `.html`
/// extension, or `.wechat.html` when that would overwrite the input.
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let output = input.with_extension("html");
    if output == input {
        input.with_extension("wechat.html")
    } else {
        output
    }
}
