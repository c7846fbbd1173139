//! Article style registry.
//!
//! Eight hand-authored stylesheets ship with the crate. Each is an independent
//! block of CSS kept under `styles/` and embedded at compile time; there is no
//! shared base between them.

use serde::Serialize;

/// Identifier of the fallback style.
pub const DEFAULT_STYLE: &str = "default";

/// A named, immutable stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleSheet {
    /// Style id (e.g., "tech")
    pub id: &'static str,
    /// One-line description for listings
    pub description: &'static str,
    /// Literal CSS text, without the surrounding `<style>` element
    #[serde(skip)]
    pub css: &'static str,
}

static REGISTRY: [StyleSheet; 8] = [
    StyleSheet {
        id: "default",
        description: "Clean and professional, suits most articles",
        css: include_str!("../styles/default.css"),
    },
    StyleSheet {
        id: "tech",
        description: "Modern dark theme with cyan accents, for technical writing",
        css: include_str!("../styles/tech.css"),
    },
    StyleSheet {
        id: "finance",
        description: "Steady gold theme, for finance and business content",
        css: include_str!("../styles/finance.css"),
    },
    StyleSheet {
        id: "influencer",
        description: "Lively pink theme, for lifestyle posts",
        css: include_str!("../styles/influencer.css"),
    },
    StyleSheet {
        id: "minimal",
        description: "Black, white and grey, for long-form reading",
        css: include_str!("../styles/minimal.css"),
    },
    StyleSheet {
        id: "colorful",
        description: "Rainbow palette, for creative content",
        css: include_str!("../styles/colorful.css"),
    },
    StyleSheet {
        id: "dark",
        description: "Low-glare dark theme, for night reading",
        css: include_str!("../styles/dark.css"),
    },
    StyleSheet {
        id: "elegant",
        description: "Classic deep blue theme, for literary content",
        css: include_str!("../styles/elegant.css"),
    },
];

/// Look up a style by id, falling back to [`DEFAULT_STYLE`] for unknown ids.
///
/// # Example
///
/// ```
/// use md2wechat::styles::get_style;
///
/// assert_eq!(get_style("tech").id, "tech");
/// assert_eq!(get_style("no-such-style").id, "default");
/// ```
pub fn get_style(id: &str) -> &'static StyleSheet {
    match find_style(id) {
        Some(style) => style,
        None => {
            log::warn!("unknown style '{}', using '{}'", id, DEFAULT_STYLE);
            &REGISTRY[0]
        }
    }
}

/// Look up a style by id without falling back.
pub fn find_style(id: &str) -> Option<&'static StyleSheet> {
    REGISTRY.iter().find(|style| style.id == id)
}

/// All registered styles, default first.
pub fn all_styles() -> &'static [StyleSheet] {
    &REGISTRY
}

/// Ids of all registered styles, default first.
pub fn available_styles() -> Vec<&'static str> {
    REGISTRY.iter().map(|style| style.id).collect()
}

/// Description of a style, or `None` for unknown ids.
pub fn description(id: &str) -> Option<&'static str> {
    find_style(id).map(|style| style.description)
}

impl StyleSheet {
    /// The CSS wrapped in a `<style>` element, ready for a document head.
    pub fn to_style_element(&self) -> String {
        format!("<style>\n{}</style>", self.css)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_styles_present() {
        assert_eq!(
            available_styles(),
            vec!["default", "tech", "finance", "influencer", "minimal", "colorful", "dark", "elegant"]
        );
    }

    #[test]
    fn test_styles_non_empty_and_distinct() {
        for style in all_styles() {
            assert!(!style.css.trim().is_empty(), "{} is empty", style.id);
            assert_eq!(get_style(style.id).css, style.css);
        }
        for (i, a) in all_styles().iter().enumerate() {
            for b in &all_styles()[i + 1..] {
                assert_ne!(a.css, b.css, "{} and {} share CSS", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_unknown_falls_back_to_default() {
        let default = get_style(DEFAULT_STYLE);
        assert_eq!(get_style("").css, default.css);
        assert_eq!(get_style("Tech").css, default.css);
        assert_eq!(get_style("neon").id, "default");
    }

    #[test]
    fn test_accent_tokens() {
        assert!(get_style("tech").css.contains("#00d4ff"));
        assert!(get_style("finance").css.contains("#d4af37"));
        assert!(get_style("influencer").css.contains("#e91e63"));
    }

    #[test]
    fn test_description() {
        assert!(description("dark").is_some());
        assert_eq!(description("neon"), None);
    }

    #[test]
    fn test_style_element() {
        let element = get_style("minimal").to_style_element();
        assert!(element.starts_with("<style>\n"));
        assert!(element.ends_with("</style>"));
        assert!(element.contains(get_style("minimal").css));
    }
}
