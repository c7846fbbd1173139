//! End-to-end conversion tests across input formats.

use md2wechat::render::fragment::{BLOCKQUOTE_STYLE, IMG_STYLE, PRE_STYLE, TABLE_STYLE};
use md2wechat::{convert_file, get_style, ConvertOptions, Converter, Format, SourceDocument};
use pretty_assertions::assert_eq;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const TECH_ARTICLE: &str = "# Release\n\n\
| Name | Value |\n|------|-------|\n| a | 1 |\n\n\
```\nlet x = 1;\n```\n\n\
> Worth quoting.\n\n\
![diagram](diagram.png)\n";

/// Build a minimal Word document from paragraph XML.
fn create_docx(body: &str) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#,
    )
    .unwrap();

    zip.start_file("word/styles.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/></w:style>
</w:styles>"#,
    )
    .unwrap();

    zip.start_file("word/document.xml", options).unwrap();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );
    zip.write_all(document.as_bytes()).unwrap();

    zip.finish().unwrap();
    buffer
}

fn write(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn markdown_round_trip() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "post.md", b"# Title\n\nBody text.");

    let report = convert_file(&input, None, &ConvertOptions::default()).unwrap();
    let html = std::fs::read_to_string(&report.output).unwrap();

    assert_eq!(html.matches("<h1").count(), 1);
    assert_eq!(html.matches("<p>").count(), 1);
    assert!(html.contains("<h1 id=\"title\">Title</h1>"));
    assert!(html.contains(get_style("default").css));
    assert!(html.contains("<title>微信公众号文章</title>"));
    assert!(html.ends_with("</body>\n</html>"));
}

#[test]
fn tech_article_gets_inline_styles() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "release.md", TECH_ARTICLE.as_bytes());
    let output = dir.path().join("out.html");

    let options = ConvertOptions::new().with_style("tech").with_title("Release");
    let report = convert_file(&input, Some(output.as_path()), &options).unwrap();
    assert_eq!(report.output, output);

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("#00d4ff"));
    assert!(html.contains(&format!("<table style=\"{}\">", TABLE_STYLE)));
    assert!(html.contains(&format!("<pre style=\"{}\">", PRE_STYLE)));
    assert!(html.contains(&format!("<blockquote style=\"{}\">", BLOCKQUOTE_STYLE)));
    assert!(html.contains(&format!("style=\"{}\"", IMG_STYLE)));
    assert!(html.contains("<h1 class=\"wechat-title\">Release</h1>"));
    assert!(html.contains("<title>Release</title>"));
}

#[test]
fn text_source_headings_and_lists() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "notes.txt", "  # Notes  \n\n* first\n* second\n".as_bytes());

    let report = convert_file(&input, None, &ConvertOptions::default()).unwrap();
    assert_eq!(report.format, Format::Text);
    let html = report.document.html;
    assert!(html.contains("<h1 id=\"notes\">Notes</h1>"));
    assert!(html.contains("<li>first</li>"));
    assert!(html.contains("<li>second</li>"));
}

#[test]
fn html_source_is_restyled() {
    let converter = Converter::new(ConvertOptions::new().with_style("dark"));
    let source = SourceDocument::from_text(
        "<html><body><h2>News</h2><p>Hello <b>there</b></p></body></html>",
        Format::Html,
    );
    let markdown = converter.to_markdown(&source).unwrap();
    assert_eq!(markdown, "## News\n\nHello there");

    let doc = converter.convert_source(&source).unwrap();
    assert_eq!(doc.style, "dark");
    assert!(doc.html.contains("<h2 id=\"news\">News</h2>"));
}

#[cfg(feature = "docx")]
#[test]
fn docx_headings_and_emphasis() {
    let dir = tempdir().unwrap();
    let body = r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Quarterly report</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t xml:space="preserve">Revenue grew </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>strongly</w:t></w:r><w:r><w:t xml:space="preserve"> and costs were </w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>flat</w:t></w:r><w:r><w:t>.</w:t></w:r></w:p>
<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Outlook</w:t></w:r></w:p>"#;
    let input = write(dir.path(), "report.docx", &create_docx(body));

    let source = SourceDocument::read(&input).unwrap();
    let markdown = Converter::default().to_markdown(&source).unwrap();
    assert_eq!(
        markdown,
        "# Quarterly report\n\nRevenue grew **strongly** and costs were *flat*.\n\n## Outlook"
    );

    let report = convert_file(&input, None, &ConvertOptions::new().with_style("finance")).unwrap();
    let html = report.document.html;
    assert!(html.contains("<h1 id=\"quarterly-report\">Quarterly report</h1>"));
    assert!(html.contains("<strong>strongly</strong>"));
    assert!(html.contains("<em>flat</em>"));
    assert!(html.contains("<h2 id=\"outlook\">Outlook</h2>"));
}

#[cfg(feature = "docx")]
#[test]
fn renamed_text_file_is_not_a_docx() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "fake.docx", b"just text");
    let err = Converter::default().try_convert_file(&input, None).unwrap_err();
    assert!(err.to_string().contains("ZIP signature"));
    assert!(convert_file(&input, None, &ConvertOptions::default()).is_none());
}

#[cfg(feature = "rtf")]
#[test]
fn rtf_source_text_survives() {
    let dir = tempdir().unwrap();
    let rtf = br"{\rtf1\ansi\deff0{\fonttbl{\f0 Times;}}\pard First line.\par Second \b bold\b0  line.\par}";
    let input = write(dir.path(), "letter.rtf", rtf);

    let report = convert_file(&input, None, &ConvertOptions::default()).unwrap();
    let html = report.document.html;
    assert!(html.contains("First line."));
    assert!(html.contains("Second bold line."));
    assert!(!html.contains("Times"));
    assert!(!html.contains("\\par"));
}

#[test]
fn unknown_format_yields_none() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "slides.pptx", b"PK");

    assert!(convert_file(&input, None, &ConvertOptions::default()).is_none());
    assert!(!dir.path().join("slides.html").exists());
}

#[test]
fn every_style_renders() {
    for id in md2wechat::available_styles() {
        let options = ConvertOptions::new().with_style(id);
        let doc = md2wechat::markdown_to_wechat("Body", &options);
        assert_eq!(doc.style, id);
        assert!(doc.html.contains(get_style(id).css));
    }
}
