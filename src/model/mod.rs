//! Transient document model for the conversion pipeline.
//!
//! A [`SourceDocument`] enters the pipeline, an adapter turns it into Markdown
//! text, and the renderer produces a [`WeChatDocument`]. Word paragraphs are
//! modelled separately so the DOCX adapter can apply its heading and emphasis
//! rules.

mod document;
mod paragraph;

pub use document::*;
pub use paragraph::*;
