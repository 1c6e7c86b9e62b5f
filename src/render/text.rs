//! Plain text export of regions.

use unicode_normalization::UnicodeNormalization;

use crate::geometry::IRect;
use crate::parser::{group_spans_into_lines, PageContent};

use super::ExportOptions;

/// Text inside one region: its lines top to bottom, each ending in a newline.
///
/// A glyph belongs to the region when its centre lies inside the rectangle.
pub fn region_text(content: &PageContent, region: &IRect, options: &ExportOptions) -> String {
    let clip = region.to_rect();
    let spans = content
        .spans
        .iter()
        .filter_map(|span| span.clipped(&clip))
        .collect();

    let mut text = String::new();
    for line in group_spans_into_lines(spans, None) {
        text.push_str(&line.text());
        text.push('\n');
    }
    finish(text, options)
}

/// Text of a page: each region in order, followed by a newline.
pub fn page_text(content: &PageContent, regions: &[IRect], options: &ExportOptions) -> String {
    regions
        .iter()
        .map(|region| region_text(content, region, options) + "\n")
        .collect()
}

/// Join page texts with the configured separator.
pub fn join_pages<I>(pages: I, options: &ExportOptions) -> String
where
    I: IntoIterator<Item = String>,
{
    pages
        .into_iter()
        .collect::<Vec<_>>()
        .join(&options.page_separator)
}

fn finish(text: String, options: &ExportOptions) -> String {
    let text = if options.concat_paragraphs {
        concat_paragraphs(&text)
    } else {
        text
    };
    if options.normalize {
        text.nfkc().collect()
    } else {
        text
    }
}

/// Treat a line ending in a space as a soft break and join it with the next.
pub fn concat_paragraphs(text: &str) -> String {
    text.replace(" \n", " ")
}
