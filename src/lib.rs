//! # textorizer
//!
//! Text extraction from multi-column PDF documents.
//!
//! Pages are split into rectangular regions, one per text column, by a
//! column detection heuristic. Regions can be corrected, reordered and saved
//! to a JSON file; export walks the regions of each page in order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use textorizer::{Document, ExportOptions};
//!
//! fn main() -> textorizer::Result<()> {
//!     let mut doc = Document::open("paper.pdf")?;
//!
//!     // Regions are detected the first time a page is looked at
//!     let regions = doc.regions(0)?;
//!     println!("page 1 has {} columns", regions.len());
//!
//!     // Put the second column first
//!     doc.regions_mut(0)?.reorder(1, -1)?;
//!     doc.save_regions("paper.regions.json")?;
//!
//!     let text = doc.document_text(&ExportOptions::default())?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

pub mod detect;
pub mod error;
pub mod geometry;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{looks_like_pdf, sniff_header, PdfHeader};
pub use error::{Error, Result};
pub use geometry::{IRect, Matrix, Rect};
pub use model::{Document, PageRegions, PdfInfo, Region, RegionSet, SchemaVersion};
pub use parser::{column_boxes, DetectOptions, PageContent};
pub use render::{ExportOptions, JsonFormat, PageSelection};

use std::path::Path;

/// Open a PDF file.
///
/// # Example
///
/// ```no_run
/// let doc = textorizer::open("paper.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn open<P: AsRef<Path>>(path: P) -> Result<Document> {
    Document::open(path)
}

/// Detect the regions of the selected pages of a PDF.
///
/// # Example
///
/// ```no_run
/// use textorizer::{detect_regions, DetectOptions, PageSelection};
///
/// let options = DetectOptions::new().with_top_margin(40);
/// let set = detect_regions("paper.pdf", options, &PageSelection::All).unwrap();
/// set.save("paper.regions.json").unwrap();
/// ```
pub fn detect_regions<P: AsRef<Path>>(
    path: P,
    options: DetectOptions,
    pages: &PageSelection,
) -> Result<RegionSet> {
    let mut doc = Document::open(path)?;
    doc.set_detect_options(options);
    for page in pages.indices(doc.page_count()) {
        doc.regions(page)?;
    }
    Ok(doc.region_set())
}

/// Extract the text of a PDF, using a regions file when given.
///
/// Pages without saved regions are detected with default settings, or with
/// the margins recorded in the regions file.
///
/// # Example
///
/// ```no_run
/// use textorizer::{extract_text, ExportOptions};
///
/// let text = extract_text("paper.pdf", Some("paper.regions.json"), &ExportOptions::default())
///     .unwrap();
/// ```
pub fn extract_text<P, R>(path: P, regions: Option<R>, options: &ExportOptions) -> Result<String>
where
    P: AsRef<Path>,
    R: AsRef<Path>,
{
    let mut doc = Document::open(path)?;
    if let Some(regions) = regions {
        doc.load_regions(regions)?;
    }
    doc.document_text(options)
}
