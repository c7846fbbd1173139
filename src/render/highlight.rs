//! Syntax highlighting with inline styles.

use std::sync::OnceLock;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Theme used for every highlighted block.
pub const THEME: &str = "base16-ocean.dark";

static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();
static THEMES: OnceLock<ThemeSet> = OnceLock::new();

/// Highlight `code` written in `lang`.
///
/// The result carries its colors in `style` attributes, so it needs no
/// stylesheet. Returns `None` when the language is not known, in which case
/// the caller renders a plain code block.
pub fn highlight_code(code: &str, lang: &str) -> Option<String> {
    let syntaxes = SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines);
    let syntax = syntaxes
        .find_syntax_by_token(lang)
        .or_else(|| syntaxes.find_syntax_by_name(lang))?;
    let theme = THEMES.get_or_init(ThemeSet::load_defaults).themes.get(THEME)?;

    match highlighted_html_for_string(code, syntaxes, syntax, theme) {
        Ok(html) => Some(format!("<div class=\"highlight\">{}</div>\n", html)),
        Err(e) => {
            log::warn!("highlighting {} code failed: {}", lang, e);
            None
        }
    }
}

/// Language token from a fence info string such as `rust,ignore` or
/// `python title="x"`.
pub fn fence_language(info: &str) -> Option<&str> {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .filter(|token| !token.is_empty())
}
