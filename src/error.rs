//! Error types for textorizer.

use std::io;
use thiserror::Error;

/// Result type alias for textorizer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, editing or exporting.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a version we do not understand.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// Region index is out of range for a page.
    #[error("Region {index} is out of range (page {page} has {count} regions)")]
    RegionOutOfRange {
        page: usize,
        index: usize,
        count: usize,
    },

    /// A region collapsed to zero area after clamping.
    #[error("Region has no area inside the page")]
    EmptyRegion,

    /// The regions file is syntactically valid JSON but violates the schema.
    #[error("Invalid regions file: {0}")]
    InvalidRegions(String),

    /// The regions file was written by an incompatible schema version.
    #[error("Unsupported regions file version {0}.{1}.{2}")]
    UnsupportedRegionsVersion(u32, u32, u32),

    /// The regions file belongs to a different PDF.
    #[error("PDF file checksum mismatch ({expected} vs {found})")]
    ChecksumMismatch { expected: String, found: String },

    /// The regions file was written for a PDF with another page count.
    #[error("PDF page count mismatch ({expected} vs {found})")]
    PageCountMismatch { expected: usize, found: usize },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error while rendering or encoding a page preview.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Render(err.to_string())
    }
}
