//! HTML fragment tree: parsing, inline-style injection and serialization.
//!
//! Fragments are parsed as full documents by html5ever and serialized back
//! from the children of `<head>` and `<body>`, so the implied wrappers never
//! reach the output.

use html5ever::parse_document;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{Attribute, LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Inline style for images that carry none.
pub const IMG_STYLE: &str = "max-width: 100%; height: auto; display: block; margin: 1em auto;";

/// Inline style forced onto every table.
pub const TABLE_STYLE: &str = "width: 100%; border-collapse: collapse; margin: 1em 0;";

/// Inline style forced onto every code block.
pub const PRE_STYLE: &str =
    "background-color: #2c3e50; color: #ecf0f1; padding: 1em; border-radius: 5px; overflow-x: auto;";

/// Inline style forced onto every quote block.
pub const BLOCKQUOTE_STYLE: &str =
    "margin: 1em 0; padding: 0.5em 1em; background-color: #f8f9fa; border-left: 4px solid #3498db;";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// A parsed HTML fragment.
pub struct HtmlFragment {
    dom: RcDom,
}

impl HtmlFragment {
    /// Parse HTML text.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self { dom }
    }

    /// All elements with the given tag name, in document order.
    pub fn elements(&self, tag: &str) -> Vec<Handle> {
        let mut found = Vec::new();
        collect_elements(&self.dom.document, &|name: &str| name == tag, &mut found);
        found
    }

    /// All elements whose tag name is in `tags`, in document order.
    ///
    /// Nested matches are included after their ancestors.
    pub fn elements_in(&self, tags: &[&str]) -> Vec<Handle> {
        let mut found = Vec::new();
        collect_elements(&self.dom.document, &|name: &str| tags.contains(&name), &mut found);
        found
    }

    /// Apply the fixed inline styles, returning the styled fragment.
    ///
    /// Images keep a non-empty existing `style`; tables, code blocks and
    /// quote blocks always get the fixed value.
    pub fn with_inline_styles(self) -> Self {
        for img in self.elements("img") {
            if attribute(&img, "style").map_or(true, |s| s.is_empty()) {
                set_attribute(&img, "style", IMG_STYLE);
            }
        }
        for (tag, style) in [
            ("table", TABLE_STYLE),
            ("pre", PRE_STYLE),
            ("blockquote", BLOCKQUOTE_STYLE),
        ] {
            for node in self.elements(tag) {
                set_attribute(&node, "style", style);
            }
        }
        self
    }

    /// Serialize the fragment back to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for section in ["head", "body"] {
            let mut nodes = Vec::new();
            collect_elements(&self.dom.document, &|name: &str| name == section, &mut nodes);
            if let Some(node) = nodes.first() {
                for child in node.children.borrow().iter() {
                    serialize(child, &mut out);
                }
            }
        }
        out
    }
}

impl std::fmt::Debug for HtmlFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlFragment")
            .field("html", &self.to_html())
            .finish()
    }
}

/// Apply the fixed inline styles to an HTML fragment string.
pub fn inline_styles(html: &str) -> String {
    HtmlFragment::parse(html).with_inline_styles().to_html()
}

/// Local tag name of an element node.
pub fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

/// Value of an attribute on an element node.
pub fn attribute(node: &Handle, key: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.ns.is_empty() && &*a.name.local == key)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Set (or replace) an attribute on an element node.
pub fn set_attribute(node: &Handle, key: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs
            .iter_mut()
            .find(|a| a.name.ns.is_empty() && &*a.name.local == key)
        {
            Some(existing) => existing.value = StrTendril::from_slice(value),
            None => attrs.push(Attribute {
                name: QualName::new(None, Namespace::from(""), LocalName::from(key)),
                value: StrTendril::from_slice(value),
            }),
        }
    }
}

/// Concatenated text of all descendant text nodes.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    push_text(node, &mut text);
    text
}

fn push_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } if matches!(&*name.local, "script" | "style") => {}
        _ => {
            for child in node.children.borrow().iter() {
                push_text(child, out);
            }
        }
    }
}

/// Element children of a node, skipping text and comments.
pub fn child_elements(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|c| matches!(c.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

fn collect_elements(node: &Handle, matches: &dyn Fn(&str) -> bool, out: &mut Vec<Handle>) {
    if let NodeData::Element { name, .. } = &node.data {
        if matches(&*name.local) {
            out.push(node.clone());
        }
    }
    for child in node.children.borrow().iter() {
        collect_elements(child, matches, out);
    }
}

// html5ever's serializer drops the leading newline of <pre> content.
fn serialize(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => {
            let text = contents.borrow();
            let raw = node_parent_name(node)
                .map(|p| RAW_TEXT_ELEMENTS.contains(&p.as_str()))
                .unwrap_or(false);
            if raw {
                out.push_str(&text);
            } else {
                out.push_str(&escape_text(&text));
            }
        }
        NodeData::Comment { contents } => {
            out.push_str("<!--");
            out.push_str(contents);
            out.push_str("-->");
        }
        NodeData::Element {
            name,
            attrs,
            template_contents,
            ..
        } => {
            let tag = name.local.to_string();
            out.push('<');
            out.push_str(&tag);
            for attr in attrs.borrow().iter() {
                out.push(' ');
                match &*attr.name.ns {
                    "" => {}
                    "http://www.w3.org/XML/1998/namespace" => out.push_str("xml:"),
                    "http://www.w3.org/1999/xlink" => out.push_str("xlink:"),
                    "http://www.w3.org/2000/xmlns/" if &*attr.name.local != "xmlns" => {
                        out.push_str("xmlns:")
                    }
                    _ => {}
                }
                out.push_str(&attr.name.local);
                out.push_str("=\"");
                out.push_str(&escape_attr(&attr.value));
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }

            // The parser drops one leading newline in these elements
            if matches!(tag.as_str(), "pre" | "textarea" | "listing") {
                if let Some(first) = node.children.borrow().first() {
                    if let NodeData::Text { contents } = &first.data {
                        if contents.borrow().starts_with('\n') {
                            out.push('\n');
                        }
                    }
                }
            }

            if let Some(contents) = template_contents.borrow().as_ref() {
                for child in contents.children.borrow().iter() {
                    serialize(child, out);
                }
            }
            for child in node.children.borrow().iter() {
                serialize(child, out);
            }

            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
        _ => {
            for child in node.children.borrow().iter() {
                serialize(child, out);
            }
        }
    }
}

fn node_parent_name(node: &Handle) -> Option<String> {
    let parent = node.parent.take();
    let name = parent
        .as_ref()
        .and_then(|weak| weak.upgrade())
        .and_then(|p| tag_name(&p));
    node.parent.set(parent);
    name
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for inclusion in HTML markup, quotes included.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_round_trip() {
        let html = "<h1 id=\"t\">Title</h1>\n<p>A &amp; B <em>x</em><br>y</p>\n";
        assert_eq!(HtmlFragment::parse(html).to_html(), html);
    }

    #[test]
    fn test_styles_applied() {
        let html = "<table><tr><td>1</td></tr></table><pre><code>x</code></pre>\
<blockquote><p>q</p></blockquote><img src=\"a.png\">";
        let styled = inline_styles(html);
        assert!(styled.contains(&format!("<table style=\"{}\">", TABLE_STYLE)));
        assert!(styled.contains(&format!("<pre style=\"{}\">", PRE_STYLE)));
        assert!(styled.contains(&format!("<blockquote style=\"{}\">", BLOCKQUOTE_STYLE)));
        assert!(styled.contains(&format!("<img src=\"a.png\" style=\"{}\">", IMG_STYLE)));
    }

    #[test]
    fn test_img_style_guarded_others_overwritten() {
        let html = "<img src=\"a.png\" style=\"width: 10px\">\
<table style=\"color: red\"><tr><td>1</td></tr></table>\
<pre style=\"x\">code</pre><blockquote style=\"y\">q</blockquote>";
        let styled = inline_styles(html);
        assert!(styled.contains("style=\"width: 10px\""));
        assert!(!styled.contains("color: red"));
        assert!(!styled.contains("style=\"x\""));
        assert!(!styled.contains("style=\"y\""));
    }

    #[test]
    fn test_empty_img_style_replaced() {
        let styled = inline_styles("<img src=\"a.png\" style=\"\">");
        assert_eq!(styled, format!("<img src=\"a.png\" style=\"{}\">", IMG_STYLE));
    }

    #[test]
    fn test_inline_styles_idempotent() {
        let html = "<p><img src=\"a.png\"></p><table><tbody><tr><td>1</td></tr></tbody></table>\
<pre><code>x</code></pre><blockquote><p>q</p></blockquote>";
        let once = inline_styles(html);
        let twice = inline_styles(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_raw_text_and_pre_newline() {
        let html = "<style>a > b { color: red; }</style><pre>\n\nindented</pre>";
        let out = HtmlFragment::parse(html).to_html();
        assert!(out.contains("<style>a > b { color: red; }</style>"));
        assert!(out.contains("<pre>\n\nindented</pre>"));
    }

    #[test]
    fn test_text_content_and_children() {
        let fragment = HtmlFragment::parse("<ul><li>one <b>bold</b></li><!-- c --><li>two</li></ul>");
        let ul = &fragment.elements("ul")[0];
        assert_eq!(text_content(ul), "one boldtwo");
        let items = child_elements(ul);
        assert_eq!(items.len(), 2);
        assert_eq!(tag_name(&items[1]).as_deref(), Some("li"));
    }

    #[test]
    fn test_escape_html() {
        let escaped = escape_html("<a & 'b'>\"");
        assert!(escaped.starts_with("&lt;a &amp; "));
        assert!(escaped.ends_with("&gt;&quot;"));
        assert!(!escaped.contains('\''));
        assert_eq!(escape_html("plain text"), "plain text");
    }
}
