//! Integration tests for editing regions and region set files.

mod common;

use common::{build_pdf, line, two_column_page};
use textorizer::{DetectOptions, Document, Error, IRect, RegionSet};

fn open(pages: usize) -> Document {
    let data = build_pdf(&vec![two_column_page(); pages]);
    Document::from_bytes("columns.pdf", &data).unwrap()
}

#[test]
fn test_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("columns.regions.json");

    let mut doc = open(3);
    doc.set_detect_options(DetectOptions::new().with_bottom_margin(36).with_ignore_images(true));
    {
        let regions = doc.regions_mut(0).unwrap();
        regions.move_by(0, 5, -3).unwrap();
        regions.resize_by(1, -40, 10).unwrap();
        regions.add(IRect::new(10, 700, 600, 780)).unwrap();
        regions.reorder(2, -2).unwrap();
    }
    doc.mark_page_empty(2).unwrap();
    let saved: Vec<_> = doc.regions(0).unwrap().rects();
    doc.save_regions(&path).unwrap();

    let mut restored = open(3);
    restored.load_regions(&path).unwrap();
    assert_eq!(restored.regions(0).unwrap().rects(), saved);
    assert!(restored.has_regions(2));
    assert!(restored.regions(2).unwrap().is_empty());
    // Page 1 was never visited and is detected on demand
    assert!(!restored.has_regions(1));
    assert!(restored.cached_regions(1).is_none());
    assert_eq!(restored.regions(1).unwrap().len(), 2);
    assert_eq!(restored.detect_options().bottom, 36);
    assert!(restored.detect_options().ignore_images);
}

#[test]
fn test_load_rejects_other_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.regions.json");

    let other_data = build_pdf(&[vec![line(72, 700, "A different document")]]);
    let mut other = Document::from_bytes("other.pdf", &other_data).unwrap();
    other.regions(0).unwrap();
    other.save_regions(&path).unwrap();

    let mut doc = open(1);
    doc.regions_mut(0).unwrap().delete(0).unwrap();
    let before = doc.regions(0).unwrap().rects();

    assert!(matches!(
        doc.load_regions(&path),
        Err(Error::ChecksumMismatch { .. })
    ));
    assert_eq!(doc.regions(0).unwrap().rects(), before);
}

#[test]
fn test_load_rejects_page_count_mismatch() {
    let mut doc = open(2);
    let mut set = doc.region_set();
    set.pdf.pages = 5;
    assert!(matches!(
        doc.apply_region_set(set),
        Err(Error::PageCountMismatch {
            expected: 2,
            found: 5
        })
    ));
}

#[test]
fn test_load_rejects_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = open(1);
    doc.regions(0).unwrap();
    let good = doc.region_set();
    let before = doc.regions(0).unwrap().rects();

    let cases = [
        "{ this is not json".to_string(),
        r#"{"version": {"major": 3, "minor": 0, "patch": 0}}"#.to_string(),
        good.to_json(textorizer::JsonFormat::Pretty)
            .unwrap()
            .replace("\"order\": 1", "\"order\": 0"),
        good.to_json(textorizer::JsonFormat::Pretty)
            .unwrap()
            .replacen("\"w\": ", "\"w\": 9000", 1),
    ];

    for (i, json) in cases.iter().enumerate() {
        let path = dir.path().join(format!("bad{}.json", i));
        std::fs::write(&path, json).unwrap();
        assert!(doc.load_regions(&path).is_err(), "case {} was accepted", i);
        assert_eq!(doc.regions(0).unwrap().rects(), before);
    }
}

#[test]
fn test_unsupported_version_message() {
    let err = RegionSet::from_json(r#"{"version": {"major": 1, "minor": 2, "patch": 7}}"#)
        .unwrap_err();
    assert_eq!(err.to_string(), "Unsupported regions file version 1.2.7");
}

#[test]
fn test_edits_stay_inside_page() {
    let mut doc = open(1);
    let regions = doc.regions_mut(0).unwrap();
    let bounds = regions.bounds();

    for (dx, dy) in [(-1000, 0), (1000, 0), (0, -1000), (0, 1000), (37, -12)] {
        for index in 0..regions.len() {
            let rect = regions.move_by(index, dx, dy).unwrap();
            assert!(bounds.contains(&rect));
        }
    }
    for (dw, dh) in [(1000, 1000), (-1000, -1000), (3, -7)] {
        for index in 0..regions.len() {
            let rect = regions.resize_by(index, dw, dh).unwrap();
            assert!(bounds.contains(&rect));
            assert!(rect.width() >= 1 && rect.height() >= 1);
        }
    }
}

#[test]
fn test_delete_and_find() {
    let mut doc = open(1);
    assert_eq!(doc.find_region(0, 100, 100).unwrap(), Some(0));
    assert_eq!(doc.find_region(0, 400, 100).unwrap(), Some(1));
    assert_eq!(doc.find_region(0, 100, 700).unwrap(), None);

    let regions = doc.regions_mut(0).unwrap();
    let second = regions.get(1).unwrap().rect;
    regions.delete(0).unwrap();
    assert_eq!(regions.rects(), vec![second]);
    assert_eq!(doc.find_region(0, 400, 100).unwrap(), Some(0));
}
