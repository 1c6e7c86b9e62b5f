//! Benchmarks for column detection and export.
//!
//! Run with: cargo bench
//!
//! Pages are synthetic: two columns of Courier text with a heading above
//! them, built either directly as page content or as a PDF through lopdf.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};

use textorizer::geometry::Rect;
use textorizer::parser::{Glyph, TextSpan};
use textorizer::{column_boxes, DetectOptions, Document, ExportOptions, PageContent};

const CHAR_WIDTH: f32 = 6.0;
const FONT_SIZE: f32 = 10.0;

fn span(x: f32, top: f32, text: &str) -> TextSpan {
    let glyphs = text
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let x0 = x + i as f32 * CHAR_WIDTH;
            Glyph {
                ch,
                bbox: Rect::new(x0, top, x0 + CHAR_WIDTH, top + FONT_SIZE),
            }
        })
        .collect();
    TextSpan::from_glyphs(glyphs, FONT_SIZE, "Courier".to_string(), true)
        .unwrap_or_else(|| panic!("blank span {:?}", text))
}

/// Page content with `lines` lines per column.
fn synthetic_page(lines: usize) -> PageContent {
    let mut spans = vec![span(72.0, 40.0, "A heading spanning the page")];
    for i in 0..lines {
        let top = 80.0 + i as f32 * 12.0;
        spans.push(span(72.0, top, &format!("Left column text line {}", i)));
        spans.push(span(320.0, top, &format!("Right column text line {}", i)));
    }
    PageContent {
        page_rect: Rect::new(0.0, 0.0, 612.0, 792.0),
        spans,
        paths: vec![Rect::new(300.0, 80.0, 301.0, 700.0)],
        images: Vec::new(),
    }
}

fn build_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut kids: Vec<Object> = Vec::new();
    for _ in 0..page_count {
        let mut operations = Vec::new();
        for i in 0..50i64 {
            for (x, label) in [(72i64, "Left"), (320, "Right")] {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
                operations.push(Operation::new("Td", vec![x.into(), (700 - 12 * i).into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(format!("{} column text line {}", label, i))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

/// Benchmark column detection on prepared page content.
fn bench_column_boxes(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_boxes");
    let options = DetectOptions::default();

    for lines in [10, 50, 200] {
        let page = synthetic_page(lines);
        group.bench_function(format!("{}_lines", lines), |b| {
            b.iter(|| column_boxes(black_box(&page), &options));
        });
    }

    group.finish();
}

/// Benchmark loading, interpreting and detecting whole documents.
fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");

    for page_count in [1, 10] {
        let data = build_pdf(page_count);

        group.bench_function(format!("detect_{}_pages", page_count), |b| {
            b.iter(|| {
                let mut doc = Document::from_bytes("bench.pdf", black_box(&data)).unwrap();
                for page in 0..doc.page_count() {
                    doc.regions(page).unwrap();
                }
            });
        });

        group.bench_function(format!("export_{}_pages", page_count), |b| {
            b.iter(|| {
                let mut doc = Document::from_bytes("bench.pdf", black_box(&data)).unwrap();
                doc.document_text(&ExportOptions::default()).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_column_boxes, bench_document);
criterion_main!(benches);
