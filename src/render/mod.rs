//! Markdown rendering and article assembly.
//!
//! Rendering runs in three fixed steps: Markdown to an HTML fragment, inline
//! style injection on the fragment, and assembly into a full document with
//! the selected stylesheet.
//!
//! # Example
//!
//! ```
//! use md2wechat::render::{render_document, ConvertOptions};
//!
//! let options = ConvertOptions::new().with_style("tech").with_title("Notes");
//! let doc = render_document("> quoted", &options);
//! assert!(doc.html.contains("<blockquote style="));
//! assert_eq!(doc.style, "tech");
//! ```

mod assemble;
pub mod fragment;
mod highlight;
mod markdown;
mod options;

pub use assemble::{assemble, DEFAULT_TITLE};
pub use fragment::{inline_styles, HtmlFragment};
pub use highlight::{highlight_code, THEME};
pub use markdown::{
    markdown_to_html, parser_options, render_toc, slugify, table_of_contents, unique_slug,
    TocEntry, TOC_MARKER,
};
pub use options::ConvertOptions;

use crate::model::WeChatDocument;
use crate::styles::get_style;

/// Render Markdown into a finished article.
pub fn render_document(markdown: &str, options: &ConvertOptions) -> WeChatDocument {
    let style = get_style(&options.style);

    let fragment = markdown_to_html(markdown);
    let styled = HtmlFragment::parse(&fragment).with_inline_styles().to_html();
    log::debug!(
        "rendered {} bytes of markdown to {} bytes of html",
        markdown.len(),
        styled.len()
    );

    let html = assemble(
        &styled,
        options.title(),
        options.subtitle(),
        style,
        options.escape_header,
    );

    WeChatDocument {
        html,
        title: options.title().map(str::to_string),
        subtitle: options.subtitle().map(str::to_string),
        style: style.id,
    }
}
