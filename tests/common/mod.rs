//! In-memory PDF fixtures for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// A line of Courier 10pt text with its baseline origin in PDF coordinates.
#[derive(Clone)]
pub struct TextLine {
    pub x: i64,
    pub y: i64,
    pub text: String,
}

pub fn line(x: i64, y: i64, text: impl Into<String>) -> TextLine {
    TextLine {
        x,
        y,
        text: text.into(),
    }
}

/// Build a PDF of Letter pages holding the given lines.
pub fn build_pdf(pages: &[Vec<TextLine>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for l in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
            operations.push(Operation::new("Td", vec![l.x.into(), l.y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(l.text.as_str())],
            ));
            operations.push(Operation::new("ET", vec![]));
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
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

/// Baseline of line `i` of a column starting at y = 700, 12pt leading.
pub fn baseline(i: usize) -> i64 {
    700 - 12 * i as i64
}

/// Twenty lines in each of two columns, at x = 72 and x = 320.
pub fn two_column_page() -> Vec<TextLine> {
    let mut lines = Vec::new();
    for i in 0..20 {
        lines.push(line(72, baseline(i), format!("Left column line {:02}", i)));
    }
    for i in 0..20 {
        lines.push(line(320, baseline(i), format!("Right column line {:02}", i)));
    }
    lines
}

/// A running header above a single column of ten lines.
pub fn header_page() -> Vec<TextLine> {
    let mut lines = vec![line(72, 760, "Journal of Examples")];
    for i in 0..10 {
        lines.push(line(72, baseline(i), format!("Body text line {:02}", i)));
    }
    lines
}
