//! Conversion options configuration.

use crate::styles::DEFAULT_STYLE;

/// Options for converting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Stylesheet id; unknown ids fall back to the default style
    pub style: String,

    /// Title shown above the article and used as the page title
    pub title: Option<String>,

    /// Subtitle shown under the title
    pub subtitle: Option<String>,

    /// HTML-escape title and subtitle instead of inserting them raw
    pub escape_header: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            style: DEFAULT_STYLE.to_string(),
            title: None,
            subtitle: None,
            escape_header: false,
        }
    }
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stylesheet id.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Set the article title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the article subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Escape title and subtitle markup.
    pub fn with_escape_header(mut self, escape: bool) -> Self {
        self.escape_header = escape;
        self
    }

    /// The title, if set and non-empty.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// The subtitle, if set and non-empty.
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref().filter(|s| !s.is_empty())
    }
}
