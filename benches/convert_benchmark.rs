//! Benchmarks for the conversion pipeline.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use md2wechat::{ConvertOptions, Converter, Format, SourceDocument};
use std::io::Cursor;

/// Creates a Markdown article with the given number of sections.
fn create_test_markdown(section_count: usize) -> String {
    let mut markdown = String::from("# Benchmark article\n\n[TOC]\n\n");
    for i in 0..section_count {
        markdown.push_str(&format!(
            "## Section {}\n\nParagraph with **bold**, *italic* and `code` for section {}.\n\n\
             | Key | Value |\n|-----|-------|\n| id | {} |\n\n\
             > A quote.\n\n```rust\nfn section_{}() -> usize {{ {} }}\n```\n\n",
            i, i, i, i, i
        ));
    }
    markdown
}

/// Creates a synthetic DOCX document with the given number of paragraphs.
fn create_test_docx(paragraph_count: usize) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>"#,
    );

    for i in 0..paragraph_count {
        content.push_str(&format!(
            r#"
    <w:p>
      <w:r><w:t xml:space="preserve">This is paragraph {} with </w:t></w:r>
      <w:r><w:rPr><w:b/></w:rPr><w:t>bold</w:t></w:r>
      <w:r><w:t xml:space="preserve"> content for benchmarking purposes.</w:t></w:r>
    </w:p>"#,
            i
        ));
    }

    content.push_str(
        r#"
  </w:body>
</w:document>"#,
    );

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(content.as_bytes()).unwrap();

    zip.finish().unwrap();
    buffer
}

/// Benchmark Markdown rendering at various sizes, per style.
fn bench_markdown_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown_pipeline");

    for section_count in [10, 100, 500].iter() {
        let markdown = create_test_markdown(*section_count);
        group.throughput(Throughput::Bytes(markdown.len() as u64));

        for style in ["default", "tech"] {
            let converter = Converter::new(ConvertOptions::new().with_style(style));
            group.bench_with_input(
                BenchmarkId::new(style, section_count),
                &markdown,
                |b, markdown| {
                    b.iter(|| converter.render(black_box(markdown)));
                },
            );
        }
    }

    group.finish();
}

/// Benchmark DOCX conversion at various sizes.
fn bench_docx_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("docx_pipeline");
    let converter = Converter::default();

    for para_count in [10, 100, 1000].iter() {
        let source = SourceDocument::new(create_test_docx(*para_count), Format::Docx);
        group.throughput(Throughput::Bytes(source.content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("paragraphs", para_count),
            &source,
            |b, source| {
                b.iter(|| {
                    let _ = converter.convert_source(black_box(source));
                });
            },
        );
    }

    group.finish();
}

/// Benchmark inline style injection alone.
fn bench_inline_styles(c: &mut Criterion) {
    let html = md2wechat::render::markdown_to_html(&create_test_markdown(100));

    c.bench_function("inline_styles", |b| {
        b.iter(|| md2wechat::render::inline_styles(black_box(&html)));
    });
}

criterion_group!(
    benches,
    bench_markdown_pipeline,
    bench_docx_pipeline,
    bench_inline_styles,
);
criterion_main!(benches);
