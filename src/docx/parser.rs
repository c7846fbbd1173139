//! Body paragraph extraction from `word/document.xml`.

use quick_xml::events::{BytesStart, Event};

use super::package::{DocxPackage, DOCUMENT_PART, STYLES_PART};
use super::styles::StyleNames;
use crate::error::{Error, Result};
use crate::model::{Paragraph, TextRun};

/// Reader for the paragraphs of a Word document.
#[derive(Debug)]
pub struct DocxReader {
    package: DocxPackage,
    styles: StyleNames,
}

impl DocxReader {
    /// Open a document from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let package = DocxPackage::from_bytes(data)?;
        Self::from_package(package)
    }

    fn from_package(package: DocxPackage) -> Result<Self> {
        let styles = if package.has_part(STYLES_PART) {
            StyleNames::parse(&package.read_xml(STYLES_PART)?)?
        } else {
            log::debug!("no {} in package, all paragraphs are Normal", STYLES_PART);
            StyleNames::default()
        };
        Ok(Self { package, styles })
    }

    /// Paragraphs that are direct children of the document body, in order.
    ///
    /// Paragraphs nested in tables, text boxes or content controls are not
    /// included.
    pub fn paragraphs(&self) -> Result<Vec<Paragraph>> {
        let xml = self.package.read_xml(DOCUMENT_PART)?;
        parse_body_paragraphs(&xml, &self.styles)
    }
}

/// Parse body-level paragraphs from document XML.
pub fn parse_body_paragraphs(xml: &str, styles: &StyleNames) -> Result<Vec<Paragraph>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    // Keep whitespace inside w:t
    reader.config_mut().trim_text(false);

    let mut paragraphs = Vec::new();
    let mut buf = Vec::new();

    // Depth below w:body; 0 means "directly in the body".
    let mut body_depth: Option<usize> = None;
    let mut para: Option<ParagraphState> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                match (name.as_ref(), body_depth) {
                    (b"w:body", None) => body_depth = Some(0),
                    (b"w:p", Some(0)) => para = Some(ParagraphState::default()),
                    _ => {
                        if let Some(ref mut p) = para {
                            p.start(e);
                        }
                    }
                }
                if let Some(depth) = body_depth.as_mut() {
                    if name.as_ref() != b"w:body" {
                        *depth += 1;
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                if let Some(ref mut p) = para {
                    p.empty(e);
                } else if body_depth == Some(0) && e.name().as_ref() == b"w:p" {
                    paragraphs.push(Paragraph::with_style(styles.resolve(None)));
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(ref mut p) = para {
                    if p.in_text {
                        let text = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                        p.push_text(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                if name.as_ref() == b"w:body" {
                    body_depth = None;
                    continue;
                }
                if let Some(depth) = body_depth.as_mut() {
                    *depth = depth.saturating_sub(1);
                }
                match (name.as_ref(), body_depth) {
                    (b"w:p", Some(0)) => {
                        if let Some(p) = para.take() {
                            paragraphs.push(p.finish(styles));
                        }
                    }
                    _ => {
                        if let Some(ref mut p) = para {
                            p.end(name.as_ref());
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Accumulates one paragraph while its events stream by.
#[derive(Default)]
struct ParagraphState {
    style_id: Option<String>,
    runs: Vec<TextRun>,
    run: Option<TextRun>,
    in_ppr: bool,
    in_rpr: bool,
    in_text: bool,
}

impl ParagraphState {
    fn start(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            b"w:pPr" if self.run.is_none() => self.in_ppr = true,
            b"w:r" => self.run = Some(TextRun::default()),
            b"w:rPr" if self.run.is_some() => self.in_rpr = true,
            b"w:t" if self.run.is_some() => self.in_text = true,
            b"w:b" | b"w:i" => self.empty(e),
            _ => {}
        }
    }

    fn empty(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            b"w:pStyle" if self.in_ppr => {
                self.style_id = attr_value(e, b"w:val");
            }
            b"w:b" if self.in_rpr => {
                if let Some(ref mut run) = self.run {
                    run.bold = toggle_value(e);
                }
            }
            b"w:i" if self.in_rpr => {
                if let Some(ref mut run) = self.run {
                    run.italic = toggle_value(e);
                }
            }
            b"w:tab" | b"w:ptab" => self.push_text("\t"),
            b"w:br" | b"w:cr" => self.push_text("\n"),
            b"w:noBreakHyphen" => self.push_text("-"),
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"w:pPr" => self.in_ppr = false,
            b"w:rPr" => self.in_rpr = false,
            b"w:t" => self.in_text = false,
            b"w:r" => {
                if let Some(run) = self.run.take() {
                    self.runs.push(run);
                }
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(ref mut run) = self.run {
            run.text.push_str(text);
        }
    }

    fn finish(self, styles: &StyleNames) -> Paragraph {
        let mut para = Paragraph::with_style(styles.resolve(self.style_id.as_deref()));
        for run in self.runs {
            para.push_run(run);
        }
        para
    }
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Value of an on/off property such as `<w:b/>` or `<w:b w:val="0"/>`.
fn toggle_value(e: &BytesStart) -> bool {
    match attr_value(e, b"w:val") {
        Some(v) => !matches!(v.as_str(), "0" | "false" | "off"),
        None => true,
    }
}
