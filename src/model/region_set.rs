//! Region set files.
//!
//! A region set stores the accepted regions of every visited page together
//! with the identity of the PDF they belong to and the detection margins in
//! effect. Files are validated completely before anything is handed out, so
//! a rejected file never changes the regions of an open document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::IRect;
use crate::parser::DetectOptions;
use crate::render::{to_json, JsonFormat};

/// Version of the region set schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SchemaVersion {
    /// Version written by this library.
    pub const CURRENT: SchemaVersion = SchemaVersion {
        major: 1,
        minor: 0,
        patch: 0,
    };

    /// Whether files of this version can be read.
    pub fn is_supported(&self) -> bool {
        self.major == Self::CURRENT.major && self.minor <= Self::CURRENT.minor
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Identity of the PDF a region set was made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfInfo {
    /// File name, informational only
    #[serde(default)]
    pub name: String,
    /// SHA-256 of the file contents in lowercase hex
    pub checksum: String,
    /// Number of pages
    pub pages: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RegionEntry {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    order: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct RegionsFile {
    version: SchemaVersion,
    pdf: PdfInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    margins: Option<DetectOptions>,
    pages: BTreeMap<usize, Vec<RegionEntry>>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: SchemaVersion,
}

/// Ordered regions of several pages of one PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSet {
    pub pdf: PdfInfo,
    /// Detection settings to restore, if recorded
    pub margins: Option<DetectOptions>,
    /// Regions per 0-based page index, in extraction order
    pub pages: BTreeMap<usize, Vec<IRect>>,
}

impl RegionSet {
    /// Create an empty region set for a PDF.
    pub fn new(pdf: PdfInfo) -> Self {
        Self {
            pdf,
            margins: None,
            pages: BTreeMap::new(),
        }
    }

    /// Encode as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let pages = self
            .pages
            .iter()
            .map(|(&page, rects)| {
                let entries = rects
                    .iter()
                    .enumerate()
                    .map(|(order, r)| RegionEntry {
                        x: r.x0,
                        y: r.y0,
                        w: r.width(),
                        h: r.height(),
                        order,
                    })
                    .collect();
                (page, entries)
            })
            .collect();

        let file = RegionsFile {
            version: SchemaVersion::CURRENT,
            pdf: self.pdf.clone(),
            margins: self.margins,
            pages,
        };
        to_json(&file, format)
    }

    /// Decode and validate JSON.
    ///
    /// The version is checked before the rest of the document is looked at.
    pub fn from_json(json: &str) -> Result<Self> {
        let probe: VersionProbe = serde_json::from_str(json)?;
        let version = probe.version;
        if !version.is_supported() {
            return Err(Error::UnsupportedRegionsVersion(
                version.major,
                version.minor,
                version.patch,
            ));
        }

        let file: RegionsFile = serde_json::from_str(json)?;

        let mut pages = BTreeMap::new();
        for (page, mut entries) in file.pages {
            entries.sort_by_key(|e| e.order);
            if let Some((expected, entry)) = entries
                .iter()
                .enumerate()
                .find(|(i, e)| e.order != *i)
            {
                return Err(Error::InvalidRegions(format!(
                    "page {}: region order {} found where {} was expected",
                    page, entry.order, expected
                )));
            }

            let rects = entries
                .iter()
                .map(|e| entry_rect(page, e))
                .collect::<Result<Vec<_>>>()?;
            pages.insert(page, rects);
        }

        Ok(Self {
            pdf: file.pdf,
            margins: file.margins,
            pages,
        })
    }

    /// Write the region set as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json(JsonFormat::Pretty)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read and validate a region set file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that this set belongs to a document and fits its pages.
    ///
    /// `page_bounds` returns the region bounds of a page.
    pub fn validate_for<F>(&self, checksum: &str, page_count: usize, page_bounds: F) -> Result<()>
    where
        F: Fn(usize) -> IRect,
    {
        if self.pdf.checksum != checksum {
            return Err(Error::ChecksumMismatch {
                expected: checksum.to_string(),
                found: self.pdf.checksum.clone(),
            });
        }
        if self.pdf.pages != page_count {
            return Err(Error::PageCountMismatch {
                expected: page_count,
                found: self.pdf.pages,
            });
        }

        for (&page, rects) in &self.pages {
            if page >= page_count {
                return Err(Error::InvalidRegions(format!(
                    "page {} does not exist (document has {} pages)",
                    page, page_count
                )));
            }
            let bounds = page_bounds(page);
            if let Some((index, rect)) = rects
                .iter()
                .enumerate()
                .find(|(_, r)| !bounds.contains(r))
            {
                return Err(Error::InvalidRegions(format!(
                    "page {}: region {} ({}, {}, {}x{}) lies outside the page",
                    page,
                    index,
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height()
                )));
            }
        }
        Ok(())
    }

    /// Total number of regions over all pages.
    pub fn region_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }
}

fn entry_rect(page: usize, entry: &RegionEntry) -> Result<IRect> {
    if entry.w <= 0 || entry.h <= 0 {
        return Err(Error::InvalidRegions(format!(
            "page {}: region {} has no area",
            page, entry.order
        )));
    }
    match (entry.x.checked_add(entry.w), entry.y.checked_add(entry.h)) {
        (Some(x1), Some(y1)) => Ok(IRect::new(entry.x, entry.y, x1, y1)),
        _ => Err(Error::InvalidRegions(format!(
            "page {}: region {} is too large",
            page, entry.order
        ))),
    }
}
