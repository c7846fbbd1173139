//! Markdown to HTML.

use super::highlight::{fence_language, highlight_code};
use super::fragment::escape_html;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Paragraph text replaced by the table of contents.
pub const TOC_MARKER: &str = "[TOC]";

/// A heading as listed in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level, 1 through 6
    pub level: usize,
    /// Anchor id
    pub id: String,
    /// Heading text
    pub title: String,
}

/// The fixed extension set: tables, footnotes, definition lists and heading
/// attributes. Fenced code is always on. `~~text~~` stays literal.
pub fn parser_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_DEFINITION_LIST);
    opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    opts
}

/// Render Markdown to an HTML fragment.
///
/// Headings get unique ids, a `[TOC]` paragraph becomes a table of contents
/// and fenced code with a known language is highlighted with inline styles.
///
/// # Example
///
/// ```
/// use md2wechat::render::markdown_to_html;
///
/// let html = markdown_to_html("# Title\n\nBody text.");
/// assert_eq!(html, "<h1 id=\"title\">Title</h1>\n<p>Body text.</p>\n");
/// ```
pub fn markdown_to_html(markdown: &str) -> String {
    let events: Vec<Event<'_>> = Parser::new_ext(markdown, parser_options()).collect();
    let (events, toc) = assign_heading_ids(events);
    let events = replace_toc_markers(events, &toc);
    let events = highlight_code_blocks(events);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Headings of a Markdown document with the ids they render with.
pub fn table_of_contents(markdown: &str) -> Vec<TocEntry> {
    let events: Vec<Event<'_>> = Parser::new_ext(markdown, parser_options()).collect();
    assign_heading_ids(events).1
}

fn assign_heading_ids(mut events: Vec<Event<'_>>) -> (Vec<Event<'_>>, Vec<TocEntry>) {
    // Explicit `{#id}` attributes are reserved before any slug is generated
    let mut used: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();
    let mut toc = Vec::new();

    for i in 0..events.len() {
        let title = match &events[i] {
            Event::Start(Tag::Heading { .. }) => heading_text(&events[i + 1..]),
            _ => continue,
        };
        if let Event::Start(Tag::Heading { level, id, .. }) = &mut events[i] {
            let anchor = match id {
                Some(existing) => existing.to_string(),
                None => {
                    let slug = unique_slug(slugify(&title), &mut used);
                    *id = Some(CowStr::from(slug.clone()));
                    slug
                }
            };
            toc.push(TocEntry {
                level: *level as usize,
                id: anchor,
                title,
            });
        }
    }

    (events, toc)
}

fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Heading slug: NFKD-normalized, reduced to ASCII word characters, spaces
/// and hyphens, lower-cased, with runs of spaces and hyphens joined by `-`.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .nfkd()
        .filter(|c| c.is_ascii())
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_ascii_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_separator = false;
    for c in kept.trim().to_lowercase().chars() {
        if c == '-' || c.is_ascii_whitespace() {
            if !in_separator {
                slug.push('-');
            }
            in_separator = true;
        } else {
            slug.push(c);
            in_separator = false;
        }
    }
    slug
}

/// Make `id` unique among `used` by appending or bumping a `_N` suffix.
///
/// Empty ids become `_1`.
pub fn unique_slug(mut id: String, used: &mut HashSet<String>) -> String {
    while id.is_empty() || used.contains(&id) {
        id = match id.rsplit_once('_') {
            Some((base, n)) if !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) => {
                let next = n.parse::<u64>().map(|n| n + 1).unwrap_or(1);
                format!("{}_{}", base, next)
            }
            _ => format!("{}_1", id),
        };
    }
    used.insert(id.clone());
    id
}

fn replace_toc_markers<'a>(events: Vec<Event<'a>>, toc: &[TocEntry]) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len());
    let mut i = 0;
    while i < events.len() {
        if let Event::Start(Tag::Paragraph) = events[i] {
            if let Some(end) = toc_marker_end(&events, i) {
                out.push(Event::Html(CowStr::from(render_toc(toc))));
                i = end + 1;
                continue;
            }
        }
        out.push(events[i].clone());
        i += 1;
    }
    out
}

/// Index of the paragraph end if the paragraph at `start` is only the marker.
fn toc_marker_end(events: &[Event<'_>], start: usize) -> Option<usize> {
    let mut text = String::new();
    for (offset, event) in events[start + 1..].iter().enumerate() {
        match event {
            Event::Text(t) => text.push_str(t),
            Event::End(TagEnd::Paragraph) => {
                return (text.trim() == TOC_MARKER).then_some(start + 1 + offset);
            }
            _ => return None,
        }
    }
    None
}

/// Nested `<div class="toc">` list linking to each heading.
pub fn render_toc(toc: &[TocEntry]) -> String {
    let mut out = String::from("<div class=\"toc\">\n");
    let mut pos = 0;
    render_toc_level(toc, &mut pos, 0, &mut out);
    out.push_str("</div>\n");
    out
}

/// Render entries deeper than `parent_level` starting at `pos`.
fn render_toc_level(toc: &[TocEntry], pos: &mut usize, parent_level: usize, out: &mut String) {
    out.push_str("<ul>\n");
    while let Some(entry) = toc.get(*pos) {
        if entry.level <= parent_level {
            break;
        }
        *pos += 1;
        out.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            escape_html(&entry.id),
            escape_html(&entry.title)
        ));
        if toc.get(*pos).is_some_and(|next| next.level > entry.level) {
            render_toc_level(toc, pos, entry.level, out);
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
}

fn highlight_code_blocks(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut iter = events.into_iter();

    while let Some(event) = iter.next() {
        let lang = match &event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                fence_language(info).map(str::to_string)
            }
            _ => None,
        };
        let Some(lang) = lang else {
            out.push(event);
            continue;
        };

        let mut block = vec![event];
        let mut code = String::new();
        for inner in iter.by_ref() {
            let done = matches!(inner, Event::End(TagEnd::CodeBlock));
            if let Event::Text(t) = &inner {
                code.push_str(t);
            }
            block.push(inner);
            if done {
                break;
            }
        }

        match highlight_code(&code, &lang) {
            Some(html) => out.push(Event::Html(CowStr::from(html))),
            None => out.extend(block),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_document() {
        let html = markdown_to_html("# Title\n\nBody text.");
        assert_eq!(html.matches("<h1").count(), 1);
        assert_eq!(html.matches("<p>").count(), 1);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Café  au -- lait "), "cafe-au-lait");
        assert_eq!(slugify("snake_case"), "snake_case");
        assert_eq!(slugify("中文标题"), "");
    }

    #[test]
    fn test_unique_slug() {
        let mut used = HashSet::new();
        assert_eq!(unique_slug("intro".into(), &mut used), "intro");
        assert_eq!(unique_slug("intro".into(), &mut used), "intro_1");
        assert_eq!(unique_slug("intro".into(), &mut used), "intro_2");
        assert_eq!(unique_slug(String::new(), &mut used), "_1");
        assert_eq!(unique_slug(String::new(), &mut used), "_2");
    }

    #[test]
    fn test_heading_ids() {
        let html = markdown_to_html("## Setup\n\n## Setup\n\n### 安装\n\n## Custom {#mine}\n");
        assert!(html.contains("<h2 id=\"setup\">Setup</h2>"));
        assert!(html.contains("<h2 id=\"setup_1\">Setup</h2>"));
        assert!(html.contains("<h3 id=\"_1\">安装</h3>"));
        assert!(html.contains("<h2 id=\"mine\">Custom</h2>"));
    }

    #[test]
    fn test_toc_marker() {
        let html = markdown_to_html("[TOC]\n\n# A\n\n## B\n\n# C\n");
        assert!(html.starts_with(
            "<div class=\"toc\">\n<ul>\n<li><a href=\"#a\">A</a><ul>\n<li><a href=\"#b\">B</a></li>\n</ul>\n</li>\n<li><a href=\"#c\">C</a></li>\n</ul>\n</div>\n"
        ));
        assert!(!html.contains("[TOC]"));
    }

    #[test]
    fn test_toc_marker_must_be_alone() {
        let html = markdown_to_html("See [TOC] here\n\n# A\n");
        assert!(html.contains("See [TOC] here"));
        assert!(!html.contains("class=\"toc\""));
    }

    #[test]
    fn test_toc_entries() {
        let toc = table_of_contents("# One\n\n### Deep\n");
        assert_eq!(
            toc,
            vec![
                TocEntry { level: 1, id: "one".into(), title: "One".into() },
                TocEntry { level: 3, id: "deep".into(), title: "Deep".into() },
            ]
        );
    }

    #[test]
    fn test_extensions() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n\nnote[^1]\n\n[^1]: foot\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("footnote"));
    }

    #[test]
    fn test_definition_list() {
        let html = markdown_to_html("Term\n: Definition\n");
        let compact: String = html.split('\n').collect();
        assert_eq!(compact, "<dl><dt>Term</dt><dd>Definition</dd></dl>");
    }

    #[test]
    fn test_strikethrough_stays_literal() {
        let html = markdown_to_html("~~gone~~\n");
        assert_eq!(html, "<p>~~gone~~</p>\n");
    }

    #[test]
    fn test_fenced_code_highlighted_or_plain() {
        let html = markdown_to_html("```python\nprint('hi')\n```\n\n```\nplain\n```\n");
        assert!(html.contains("<div class=\"highlight\"><pre style="));
        assert!(html.contains("<pre><code>plain\n</code></pre>"));
    }
}
