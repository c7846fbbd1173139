//! HTML to Markdown.

use super::MarkdownAdapter;
use crate::detect::Format;
use crate::error::Result;
use crate::model::SourceDocument;
use crate::render::fragment::{attribute, child_elements, tag_name, text_content, HtmlFragment};

/// Tags that produce Markdown output. Everything else is dropped.
const RECOGNIZED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "ul", "ol", "li", "blockquote", "pre", "code",
    "strong", "em", "a", "img",
];

/// Converts HTML by emitting one block per recognized element.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlAdapter;

impl MarkdownAdapter for HtmlAdapter {
    fn format(&self) -> Format {
        Format::Html
    }

    fn to_markdown(&self, source: &SourceDocument) -> Result<String> {
        Ok(html_to_markdown(source.text()?))
    }
}

/// Convert HTML text to Markdown.
///
/// Recognized elements are visited in document order, including elements
/// nested inside other recognized elements, and each contributes one block.
/// Lists only take their direct `<li>` children.
pub fn html_to_markdown(html: &str) -> String {
    let fragment = HtmlFragment::parse(html);
    let mut blocks = Vec::new();

    for element in fragment.elements_in(RECOGNIZED_TAGS) {
        let Some(tag) = tag_name(&element) else {
            continue;
        };
        match tag.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = tag[1..].parse::<usize>().unwrap_or(1);
                blocks.push(format!("{} {}", "#".repeat(level), text_content(&element)));
            }
            "p" => {
                let text = text_content(&element);
                let text = text.trim();
                if !text.is_empty() {
                    blocks.push(text.to_string());
                }
            }
            "ul" | "ol" => {
                let items = child_elements(&element)
                    .into_iter()
                    .filter(|child| tag_name(child).as_deref() == Some("li"));
                for (i, li) in items.enumerate() {
                    let marker = if tag == "ul" {
                        "-".to_string()
                    } else {
                        format!("{}.", i + 1)
                    };
                    blocks.push(format!("{} {}", marker, text_content(&li)));
                }
            }
            "blockquote" => {
                blocks.push(format!("> {}", text_content(&element).trim()));
            }
            "pre" => {
                blocks.push(format!("```\n{}\n```", text_content(&element)));
            }
            "code" => blocks.push(format!("`{}`", text_content(&element))),
            "strong" => blocks.push(format!("**{}**", text_content(&element))),
            "em" => blocks.push(format!("*{}*", text_content(&element))),
            "a" => {
                let href = attribute(&element, "href").unwrap_or_default();
                blocks.push(format!("[{}]({})", text_content(&element), href));
            }
            "img" => {
                let src = attribute(&element, "src").unwrap_or_default();
                let alt = attribute(&element, "alt").unwrap_or_default();
                blocks.push(format!("![{}]({})", alt, src));
            }
            // li is emitted through its list
            _ => {}
        }
    }

    log::debug!("html adapter produced {} blocks", blocks.len());
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_headings_and_paragraphs() {
        let md = html_to_markdown("<h2>Section</h2><p>  Body  </p><p>   </p>");
        assert_eq!(md, "## Section\n\nBody");
    }

    #[test]
    fn test_lists_direct_items_only() {
        let md = html_to_markdown(
            "<ul><li>a</li><li>b<ul><li>inner</li></ul></li></ul><ol><li>one</li><li>two</li></ol>",
        );
        assert_eq!(
            md,
            "- a\n\n- binner\n\n- inner\n\n1. one\n\n2. two"
        );
    }

    #[test]
    fn test_nested_inline_elements_also_emit() {
        let md = html_to_markdown("<p>Hello <strong>world</strong></p>");
        assert_eq!(md, "Hello world\n\n**world**");
    }

    #[test]
    fn test_links_images_code() {
        let md = html_to_markdown(
            "<a href=\"https://example.com\">site</a><img src=\"a.png\" alt=\"pic\"><img>\
<pre>let x = 1;</pre><blockquote> quoted </blockquote><em>e</em>",
        );
        assert_eq!(
            md,
            "[site](https://example.com)\n\n![pic](a.png)\n\n![]()\n\n```\nlet x = 1;\n```\n\n> quoted\n\n*e*"
        );
    }

    #[test]
    fn test_unrecognized_tags_dropped() {
        let md = html_to_markdown("<div>lost</div><span>also lost</span><table><tr><td>x</td></tr></table>");
        assert_eq!(md, "");
    }

    #[test]
    fn test_adapter_reads_source() {
        let source = SourceDocument::from_text("<h1>T</h1>", Format::Html);
        assert_eq!(HtmlAdapter.to_markdown(&source).unwrap(), "# T");
    }
}
