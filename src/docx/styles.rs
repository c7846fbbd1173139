//! Paragraph style names from `word/styles.xml`.

use crate::error::{Error, Result};
use crate::model::NORMAL_STYLE;
use std::collections::HashMap;

/// Built-in styles that Word stores under a lower-case name but shows under
/// a capitalized one.
const BUILTIN_LOWERCASE: &[&str] = &[
    "caption", "footer", "header", "title", "subtitle", "heading 1", "heading 2", "heading 3",
    "heading 4", "heading 5", "heading 6", "heading 7", "heading 8", "heading 9",
];

/// Map from paragraph style id to the style's UI name.
#[derive(Debug, Clone, Default)]
pub struct StyleNames {
    /// UI names by style ID
    names: HashMap<String, String>,
    /// Default paragraph style ID
    default_paragraph: Option<String>,
}

impl StyleNames {
    /// Parse paragraph styles from XML content.
    pub fn parse(xml: &str) -> Result<Self> {
        if xml.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut map = StyleNames::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        // (style id, is paragraph style, is default)
        let mut current: Option<(String, bool, bool)> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) if e.name().as_ref() == b"w:style" => {
                    let mut id = String::new();
                    let mut is_paragraph = false;
                    let mut is_default = false;
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value);
                        match attr.key.as_ref() {
                            b"w:styleId" => id = value.to_string(),
                            b"w:type" => is_paragraph = value == "paragraph",
                            b"w:default" => is_default = value == "1" || value == "true",
                            _ => {}
                        }
                    }
                    current = Some((id, is_paragraph, is_default));
                }
                Ok(quick_xml::events::Event::Empty(ref e)) if e.name().as_ref() == b"w:name" => {
                    if let Some((ref id, true, is_default)) = current {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"w:val" {
                                let name = String::from_utf8_lossy(&attr.value);
                                map.names.insert(id.clone(), ui_name(&name));
                            }
                        }
                        if is_default {
                            map.default_paragraph = Some(id.clone());
                        }
                    }
                }
                Ok(quick_xml::events::Event::End(ref e)) if e.name().as_ref() == b"w:style" => {
                    current = None;
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(map)
    }

    /// UI name for a paragraph's style id.
    ///
    /// Paragraphs without a style, or naming a style that is not defined,
    /// resolve to the default paragraph style.
    pub fn resolve(&self, style_id: Option<&str>) -> String {
        style_id
            .and_then(|id| self.names.get(id))
            .or_else(|| {
                self.default_paragraph
                    .as_ref()
                    .and_then(|id| self.names.get(id))
            })
            .cloned()
            .unwrap_or_else(|| NORMAL_STYLE.to_string())
    }

    /// Number of named paragraph styles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no paragraph styles were found.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Convert a stored style name to the name Word shows.
fn ui_name(name: &str) -> String {
    if !BUILTIN_LOWERCASE.contains(&name) {
        return name.to_string();
    }
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
