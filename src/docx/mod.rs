//! Word (.docx) reading.
//!
//! Only what the Markdown adapter needs is extracted: body-level paragraphs,
//! their style names and the bold/italic flags of each run.

mod package;
mod parser;
mod styles;

pub use package::{decode_xml_bytes, DocxPackage, DOCUMENT_PART, STYLES_PART};
pub use parser::{parse_body_paragraphs, DocxReader};
pub use styles::StyleNames;
