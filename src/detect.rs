//! PDF header sniffing.
//!
//! Readers commonly accept a `%PDF-x.y` header anywhere in the first
//! kilobyte, so we do too; anything else is rejected before lopdf sees it.

use crate::error::{Error, Result};

/// Information read from the PDF header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// Version from the header, e.g. "1.7".
    pub version: String,
    /// Byte offset of the `%PDF-` marker.
    pub offset: usize,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Locate and validate the PDF header in `data`.
pub fn sniff_header(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    let offset = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let version_bytes = data
        .get(offset + PDF_MAGIC.len()..offset + PDF_MAGIC.len() + 3)
        .ok_or(Error::UnknownFormat)?;

    match version_bytes {
        [major @ b'1'..=b'2', b'.', minor] if minor.is_ascii_digit() => Ok(PdfHeader {
            version: format!("{}.{}", *major as char, *minor as char),
            offset,
        }),
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version_bytes).to_string(),
        )),
    }
}

/// Whether `data` starts like a PDF file.
pub fn looks_like_pdf(data: &[u8]) -> bool {
    sniff_header(data).is_ok()
}
