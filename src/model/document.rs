//! The open document and its region layout.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;
use sha2::{Digest, Sha256};

use crate::detect::sniff_header;
use crate::error::{Error, Result};
use crate::geometry::{IRect, Rect};
use crate::parser::{
    column_boxes, interpret_page, DetectOptions, LopdfBackend, PageContent, PageId, PdfBackend,
};
use crate::render::{self, ExportOptions};

use super::{PageRegions, PdfInfo, RegionSet};

/// A loaded PDF together with the regions chosen for its pages.
///
/// Pages that were never looked at have no regions yet; they are detected
/// on first access with the current [`DetectOptions`].
pub struct Document {
    path: Option<PathBuf>,
    name: String,
    checksum: String,
    version: String,
    backend: Box<dyn PdfBackend>,
    pages: Vec<PageId>,
    page_rects: Vec<Rect>,
    regions: BTreeMap<usize, PageRegions>,
    contents: HashMap<usize, PageContent>,
    detect_options: DetectOptions,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("checksum", &self.checksum)
            .field("pages", &self.pages.len())
            .field("regions", &self.regions)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut doc = Self::from_bytes(name, &data)?;
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Load a PDF from memory.
    pub fn from_bytes(name: impl Into<String>, data: &[u8]) -> Result<Self> {
        let header = sniff_header(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        let mut doc = Self::from_backend(name, checksum(data), Box::new(backend))?;
        doc.version = header.version;
        Ok(doc)
    }

    /// Wrap an already loaded backend.
    pub fn from_backend(
        name: impl Into<String>,
        checksum: impl Into<String>,
        backend: Box<dyn PdfBackend>,
    ) -> Result<Self> {
        let pages = backend.pages();
        let page_rects = pages
            .iter()
            .map(|&id| {
                backend
                    .page_box(id)
                    .map(|b| Rect::new(0.0, 0.0, b.width(), b.height()))
            })
            .collect::<Result<Vec<_>>>()?;

        let name = name.into();
        log::debug!("Loaded {} with {} pages", name, pages.len());

        Ok(Self {
            path: None,
            name,
            checksum: checksum.into(),
            version: String::new(),
            backend,
            pages,
            page_rects,
            regions: BTreeMap::new(),
            contents: HashMap::new(),
            detect_options: DetectOptions::default(),
        })
    }

    /// File name of the PDF.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path the document was opened from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// SHA-256 of the file contents.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// PDF version from the file header.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pdf_info(&self) -> PdfInfo {
        PdfInfo {
            name: self.name.clone(),
            checksum: self.checksum.clone(),
            pages: self.page_count(),
        }
    }

    fn check_page(&self, page: usize) -> Result<()> {
        if page < self.pages.len() {
            Ok(())
        } else {
            Err(Error::PageOutOfRange(page, self.pages.len()))
        }
    }

    /// Page rectangle in page space, anchored at (0, 0).
    pub fn page_rect(&self, page: usize) -> Result<Rect> {
        self.check_page(page)?;
        Ok(self.page_rects[page])
    }

    /// Rectangle regions of a page are confined to.
    pub fn region_bounds(&self, page: usize) -> Result<IRect> {
        let rect = self.page_rect(page)?;
        Ok(bounds_of(&rect))
    }

    pub fn detect_options(&self) -> &DetectOptions {
        &self.detect_options
    }

    /// Change the detection settings. Already detected pages keep their
    /// regions until they are detected again.
    pub fn set_detect_options(&mut self, options: DetectOptions) {
        self.detect_options = options;
    }

    /// Positioned content of a page, interpreted once and cached.
    pub fn page_content(&mut self, page: usize) -> Result<&PageContent> {
        self.check_page(page)?;
        if !self.contents.contains_key(&page) {
            let content = interpret_page(self.backend.as_ref(), self.pages[page])?;
            self.contents.insert(page, content);
        }
        self.contents
            .get(&page)
            .ok_or(Error::PageOutOfRange(page, self.pages.len()))
    }

    fn detect(&mut self, page: usize) -> Result<PageRegions> {
        let bounds = self.region_bounds(page)?;
        let options = self.detect_options;
        let boxes = column_boxes(self.page_content(page)?, &options);
        log::debug!("Page {}: detected {} regions", page, boxes.len());
        Ok(PageRegions::from_rects(page, bounds, boxes))
    }

    fn ensure_regions(&mut self, page: usize) -> Result<()> {
        self.check_page(page)?;
        if !self.regions.contains_key(&page) {
            let regions = self.detect(page)?;
            self.regions.insert(page, regions);
        }
        Ok(())
    }

    /// Regions of a page, detecting them on first access.
    pub fn regions(&mut self, page: usize) -> Result<&PageRegions> {
        self.regions_mut(page).map(|r| &*r)
    }

    /// Mutable regions of a page, detecting them on first access.
    pub fn regions_mut(&mut self, page: usize) -> Result<&mut PageRegions> {
        self.ensure_regions(page)?;
        self.regions
            .get_mut(&page)
            .ok_or(Error::PageOutOfRange(page, self.pages.len()))
    }

    /// Whether a page has regions, detected or loaded, without detecting.
    pub fn has_regions(&self, page: usize) -> bool {
        self.regions.contains_key(&page)
    }

    /// Regions of a page if it has any yet.
    pub fn cached_regions(&self, page: usize) -> Option<&PageRegions> {
        self.regions.get(&page)
    }

    /// Replace the regions of a page with freshly detected ones.
    pub fn redetect(&mut self, page: usize) -> Result<&PageRegions> {
        self.clear_regions(page)?;
        self.regions(page)
    }

    /// Forget the regions of a page; they are detected again when needed.
    pub fn clear_regions(&mut self, page: usize) -> Result<()> {
        self.check_page(page)?;
        self.regions.remove(&page);
        Ok(())
    }

    /// Forget the regions of all pages.
    pub fn clear_all_regions(&mut self) {
        self.regions.clear();
    }

    /// Give a page an empty region list, which also stops detection.
    pub fn mark_page_empty(&mut self, page: usize) -> Result<()> {
        let bounds = self.region_bounds(page)?;
        self.regions.insert(page, PageRegions::new(page, bounds));
        Ok(())
    }

    /// Give every page an empty region list.
    pub fn mark_all_pages_empty(&mut self) {
        for page in 0..self.pages.len() {
            let bounds = bounds_of(&self.page_rects[page]);
            self.regions.insert(page, PageRegions::new(page, bounds));
        }
    }

    /// Index of the region containing a point, if any.
    pub fn find_region(&mut self, page: usize, x: i32, y: i32) -> Result<Option<usize>> {
        Ok(self.regions(page)?.find(x, y))
    }

    /// Greyscale preview of a page at `scale` pixels per point.
    pub fn render_page(&mut self, page: usize, scale: f32) -> Result<GrayImage> {
        render::render_preview(self.page_content(page)?, scale)
    }

    /// Text of one region.
    pub fn region_text(
        &mut self,
        page: usize,
        index: usize,
        options: &ExportOptions,
    ) -> Result<String> {
        let regions = self.regions(page)?;
        let rect = regions
            .get(index)
            .map(|r| r.rect)
            .ok_or(Error::RegionOutOfRange {
                page,
                index,
                count: regions.len(),
            })?;
        Ok(render::region_text(self.page_content(page)?, &rect, options))
    }

    /// Text of a page, region by region.
    pub fn page_text(&mut self, page: usize, options: &ExportOptions) -> Result<String> {
        let rects = self.regions(page)?.rects();
        Ok(render::page_text(self.page_content(page)?, &rects, options))
    }

    /// Text of all selected pages.
    pub fn document_text(&mut self, options: &ExportOptions) -> Result<String> {
        self.document_text_with_progress(options, |_, _| {})
    }

    /// Text of all selected pages, reporting `(done, total)` after each page.
    pub fn document_text_with_progress<F>(
        &mut self,
        options: &ExportOptions,
        mut progress: F,
    ) -> Result<String>
    where
        F: FnMut(usize, usize),
    {
        let selected = options.page_selection.indices(self.page_count());
        let total = selected.len();
        let mut texts = Vec::with_capacity(total);
        for (done, page) in selected.into_iter().enumerate() {
            texts.push(self.page_text(page, options)?);
            progress(done + 1, total);
        }
        Ok(render::join_pages(texts, options))
    }

    /// Snapshot of all pages that have regions, plus the detection margins.
    pub fn region_set(&self) -> RegionSet {
        let mut set = RegionSet::new(self.pdf_info());
        set.margins = Some(self.detect_options);
        set.pages = self
            .regions
            .iter()
            .map(|(&page, regions)| (page, regions.rects()))
            .collect();
        set
    }

    /// Save the regions of all visited pages.
    pub fn save_regions<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.region_set().save(path)
    }

    /// Load a regions file, replacing all current regions.
    ///
    /// Nothing changes when the file is rejected.
    pub fn load_regions<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let set = RegionSet::load(path)?;
        self.apply_region_set(set)
    }

    /// Replace all regions with those of `set` after validating it.
    pub fn apply_region_set(&mut self, set: RegionSet) -> Result<()> {
        let page_rects = &self.page_rects;
        set.validate_for(&self.checksum, self.pages.len(), |page| {
            bounds_of(&page_rects[page])
        })?;

        let mut regions = BTreeMap::new();
        for (page, rects) in set.pages {
            let bounds = bounds_of(&self.page_rects[page]);
            regions.insert(page, PageRegions::from_rects(page, bounds, rects));
        }

        self.regions = regions;
        if let Some(margins) = set.margins {
            self.detect_options = margins;
        }
        Ok(())
    }
}

/// Integer bounds for regions of a page of this size.
fn bounds_of(rect: &Rect) -> IRect {
    IRect::new(0, 0, rect.width().floor() as i32, rect.height().floor() as i32)
}

/// SHA-256 of `data` as lowercase hex.
pub fn checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{decode_text_simple, ContentOp, FontMetrics, PdfValue, XObject};

    /// Two Letter pages; the first holds two columns of text.
    struct TwoColumnBackend;

    fn show(x: i64, y: i64, text: &str) -> Vec<ContentOp> {
        vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new(
                "Tf",
                vec![PdfValue::Name(b"F1".to_vec()), PdfValue::Integer(10)],
            ),
            ContentOp::new("Td", vec![PdfValue::Integer(x), PdfValue::Integer(y)]),
            ContentOp::new("Tj", vec![PdfValue::Str(text.as_bytes().to_vec())]),
            ContentOp::new("ET", vec![]),
        ]
    }

    impl PdfBackend for TwoColumnBackend {
        fn pages(&self) -> Vec<PageId> {
            vec![(1, 0), (2, 0)]
        }

        fn page_box(&self, _page: PageId) -> Result<Rect> {
            Ok(Rect::new(0.0, 0.0, 612.0, 792.0))
        }

        fn page_fonts(&self, _page: PageId) -> Result<BTreeMap<Vec<u8>, FontMetrics>> {
            let mut fonts = BTreeMap::new();
            fonts.insert(
                b"F1".to_vec(),
                FontMetrics {
                    base_font: "Courier".to_string(),
                    ..Default::default()
                },
            );
            Ok(fonts)
        }

        fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
            Ok(vec![page.0 as u8])
        }

        fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
            if data != [1] {
                return Ok(Vec::new());
            }
            let mut ops = Vec::new();
            for (i, y) in [700, 688, 676].into_iter().enumerate() {
                ops.extend(show(72, y, &format!("left line {}", i)));
                ops.extend(show(320, y, &format!("right line {}", i)));
            }
            Ok(ops)
        }

        fn decode_text(&self, _page: PageId, _font: &[u8], bytes: &[u8]) -> String {
            decode_text_simple(bytes)
        }

        fn xobject(&self, _page: PageId, _name: &[u8]) -> XObject {
            XObject::Other
        }
    }

    fn document() -> Document {
        Document::from_backend("test.pdf", "c0ffee", Box::new(TwoColumnBackend)).unwrap()
    }

    #[test]
    fn test_lazy_detection() {
        let mut doc = document();
        assert_eq!(doc.page_count(), 2);
        assert!(!doc.has_regions(0));

        let regions = doc.regions(0).unwrap();
        assert_eq!(regions.len(), 2);
        assert!(regions.get(0).unwrap().x() < regions.get(1).unwrap().x());
        assert!(doc.has_regions(0));
        assert!(doc.regions(1).unwrap().is_empty());
    }

    #[test]
    fn test_page_text_left_then_right() {
        let mut doc = document();
        let text = doc.page_text(0, &ExportOptions::default()).unwrap();
        assert_eq!(
            text,
            "left line 0\nleft line 1\nleft line 2\n\nright line 0\nright line 1\nright line 2\n\n"
        );
    }

    #[test]
    fn test_export_follows_reordering() {
        let mut doc = document();
        doc.regions_mut(0).unwrap().reorder(1, -1).unwrap();
        let text = doc.page_text(0, &ExportOptions::default()).unwrap();
        assert!(text.starts_with("right line 0"));
        assert_eq!(
            doc.region_text(0, 1, &ExportOptions::default()).unwrap(),
            "left line 0\nleft line 1\nleft line 2\n"
        );
        assert!(matches!(
            doc.region_text(0, 5, &ExportOptions::default()),
            Err(Error::RegionOutOfRange { index: 5, count: 2, .. })
        ));
    }

    #[test]
    fn test_document_text_separates_pages() {
        let mut doc = document();
        let mut calls = Vec::new();
        let text = doc
            .document_text_with_progress(&ExportOptions::default(), |done, total| {
                calls.push((done, total))
            })
            .unwrap();
        assert!(text.ends_with("\n\x0c\n"));
        assert_eq!(calls, vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn test_mark_empty_and_clear() {
        let mut doc = document();
        doc.mark_page_empty(0).unwrap();
        assert!(doc.regions(0).unwrap().is_empty());
        assert_eq!(doc.page_text(0, &ExportOptions::default()).unwrap(), "");

        doc.clear_regions(0).unwrap();
        assert!(!doc.has_regions(0));
        assert_eq!(doc.regions(0).unwrap().len(), 2);

        doc.mark_all_pages_empty();
        assert!(doc.has_regions(1));
        assert!(doc.regions(0).unwrap().is_empty());

        doc.clear_all_regions();
        assert!(!doc.has_regions(0) && !doc.has_regions(1));
    }

    #[test]
    fn test_redetect_discards_edits() {
        let mut doc = document();
        doc.regions_mut(0).unwrap().delete(0).unwrap();
        assert_eq!(doc.regions(0).unwrap().len(), 1);
        assert_eq!(doc.redetect(0).unwrap().len(), 2);
    }

    #[test]
    fn test_page_out_of_range() {
        let mut doc = document();
        assert!(matches!(doc.regions(2), Err(Error::PageOutOfRange(2, 2))));
        assert!(doc.mark_page_empty(9).is_err());
        assert!(doc.page_rect(2).is_err());
    }

    #[test]
    fn test_region_set_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.regions.json");

        let mut doc = document();
        doc.set_detect_options(DetectOptions::new().with_top_margin(30));
        doc.regions_mut(0)
            .unwrap()
            .add(IRect::new(10, 10, 50, 50))
            .unwrap();
        doc.mark_page_empty(1).unwrap();
        let before = doc.region_set();
        doc.save_regions(&path).unwrap();

        let mut other = document();
        other.load_regions(&path).unwrap();
        assert_eq!(other.region_set(), before);
        assert_eq!(other.detect_options().top, 30);
        assert_eq!(other.regions(0).unwrap().len(), 3);
    }

    #[test]
    fn test_rejected_region_set_leaves_regions() {
        let mut doc = document();
        doc.regions_mut(0).unwrap().delete(0).unwrap();
        let before = doc.region_set();

        let mut foreign = before.clone();
        foreign.pdf.checksum = "deadbeef".to_string();
        foreign.pages.clear();
        assert!(matches!(
            doc.apply_region_set(foreign),
            Err(Error::ChecksumMismatch { .. })
        ));

        let mut outside = before.clone();
        outside
            .pages
            .insert(1, vec![IRect::new(0, 0, 613, 10)]);
        assert!(doc.apply_region_set(outside).is_err());

        assert_eq!(doc.region_set(), before);
    }

    #[test]
    fn test_checksum_hex() {
        assert_eq!(
            checksum(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_render_page() {
        let mut doc = document();
        let img = doc.render_page(0, 0.5).unwrap();
        assert_eq!(img.dimensions(), (306, 396));
    }
}
