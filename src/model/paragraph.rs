//! Word paragraph and text run models.

use serde::{Deserialize, Serialize};

/// Style name applied when a paragraph names none.
pub const NORMAL_STYLE: &str = "Normal";

/// A run of text with direct character formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// Run text
    pub text: String,

    /// Directly applied bold
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,

    /// Directly applied italic
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
}

impl TextRun {
    /// Create a plain run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Mark the run bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Mark the run italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// A body-level paragraph of a Word document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// UI name of the paragraph style (e.g., "Heading 2")
    pub style_name: String,

    /// Text runs in document order
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

impl Default for Paragraph {
    fn default() -> Self {
        Self {
            style_name: NORMAL_STYLE.to_string(),
            runs: Vec::new(),
        }
    }
}

impl Paragraph {
    /// Create an empty paragraph with the "Normal" style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty paragraph with the given style name.
    pub fn with_style(style_name: impl Into<String>) -> Self {
        Self {
            style_name: style_name.into(),
            runs: Vec::new(),
        }
    }

    /// Append a run.
    pub fn push_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether the style marks this paragraph as a heading.
    pub fn is_heading(&self) -> bool {
        self.style_name.starts_with("Heading")
    }

    /// Heading level taken from the last word of the style name.
    ///
    /// Returns `None` for non-heading paragraphs and `Some(1)` for heading
    /// styles without a numeric suffix.
    pub fn heading_level(&self) -> Option<usize> {
        if !self.is_heading() {
            return None;
        }
        let suffix = self.style_name.split_whitespace().last().unwrap_or_default();
        if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) {
            Some(suffix.parse().unwrap_or(1))
        } else {
            Some(1)
        }
    }
}
