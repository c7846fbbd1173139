//! ZIP package access for Word documents.

use crate::detect::is_zip_file;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::io::{Cursor, Read};

/// Main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Style definitions part.
pub const STYLES_PART: &str = "word/styles.xml";

/// A `.docx` package held in memory.
pub struct DocxPackage {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl DocxPackage {
    /// Open a package from raw bytes.
    ///
    /// Data that is not a ZIP archive is rejected before the archive reader
    /// sees it, so a renamed text file reports a clear error.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if !is_zip_file(&data) {
            return Err(Error::InvalidData(
                "not a Word document (missing ZIP signature)".to_string(),
            ));
        }
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read an XML part as text, honouring UTF-8 and UTF-16 byte order marks.
    pub fn read_xml(&self, part: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(part)
            .map_err(|_| Error::MissingComponent(part.to_string()))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        decode_xml_bytes(&bytes)
    }

    /// Check if a part exists in the package.
    pub fn has_part(&self, part: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == part);
        found
    }
}

impl std::fmt::Debug for DocxPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = self.archive.borrow().len();
        f.debug_struct("DocxPackage").field("parts", &parts).finish()
    }
}

/// Decode XML bytes in UTF-8 or UTF-16 (LE/BE, BOM-marked).
///
/// quick-xml re-reads the declaration, so a decoded UTF-16 part has its
/// `encoding` pseudo-attribute rewritten to UTF-8.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec())
            .map_err(|e| Error::Encoding(e.to_string())),
        [0xFF, 0xFE, rest @ ..] => {
            decode_utf16(rest, u16::from_le_bytes).map(|s| declare_utf8(&s))
        }
        [0xFE, 0xFF, rest @ ..] => {
            decode_utf16(rest, u16::from_be_bytes).map(|s| declare_utf8(&s))
        }
        _ => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Encoding(e.to_string()))
}

fn declare_utf8(content: &str) -> String {
    let Some(rest) = content.strip_prefix("<?xml") else {
        return content.to_string();
    };
    let Some(end) = rest.find("?>") else {
        return content.to_string();
    };
    let (decl, body) = rest.split_at(end);
    let decl = ["\"UTF-16\"", "'UTF-16'", "\"utf-16\"", "'utf-16'"]
        .iter()
        .fold(decl.to_string(), |d, from| d.replace(from, "\"UTF-8\""));
    format!("<?xml{}{}", decl, body)
}
