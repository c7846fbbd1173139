//! Full document assembly.

use super::fragment::escape_html;
use crate::styles::StyleSheet;

/// Page title used when the article has none.
pub const DEFAULT_TITLE: &str = "微信公众号文章";

/// Wrap an HTML fragment into a complete document.
///
/// The head carries the stylesheet's CSS verbatim. Title and subtitle blocks
/// are emitted only when non-empty. Unless `escape` is set they are inserted
/// as raw markup.
pub fn assemble(
    fragment: &str,
    title: Option<&str>,
    subtitle: Option<&str>,
    style: &StyleSheet,
    escape: bool,
) -> String {
    let header = |text: &str| -> String {
        if escape {
            escape_html(text)
        } else {
            text.to_string()
        }
    };
    let title = title.filter(|t| !t.is_empty()).map(header);
    let subtitle = subtitle.filter(|s| !s.is_empty()).map(header);

    let page_title = title.as_deref().unwrap_or(DEFAULT_TITLE);

    let mut html = String::with_capacity(fragment.len() + style.css.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("    <title>{}</title>\n", page_title));
    html.push_str(&format!("    {}\n", style.to_style_element()));
    html.push_str("</head>\n<body>\n");

    if let Some(title) = &title {
        html.push_str(&format!("    <h1 class=\"wechat-title\">{}</h1>\n", title));
    }
    if let Some(subtitle) = &subtitle {
        html.push_str(&format!("    <p class=\"wechat-subtitle\">{}</p>\n", subtitle));
    }

    html.push_str(&format!("    {}\n", fragment));
    html.push_str("\n</body>\n</html>");
    html
}
