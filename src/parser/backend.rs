//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for the handful of PDF operations the
//! content interpreter needs, isolating lopdf from layout and detection.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::geometry::{Matrix, Rect};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Font metrics needed to place glyphs.
#[derive(Debug, Clone, Default)]
pub struct FontMetrics {
    /// Base font name (e.g., "Helvetica-Bold").
    pub base_font: String,
    /// First character code covered by `widths`.
    pub first_char: u32,
    /// Glyph widths in 1/1000 text space units.
    pub widths: Vec<f32>,
    /// Width used for codes outside `widths`.
    pub missing_width: f32,
    /// Composite (Type0) fonts use multi-byte codes.
    pub composite: bool,
}

impl FontMetrics {
    /// Width of a single-byte code, if the font declares one.
    pub fn width_of(&self, code: u8) -> Option<f32> {
        let declared = (code as u32)
            .checked_sub(self.first_char)
            .and_then(|idx| self.widths.get(idx as usize))
            .copied()
            .filter(|w| *w > 0.0);
        declared.or((self.missing_width > 0.0).then_some(self.missing_width))
    }
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value of an integer or real operand.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// Numeric operand at `idx`, if present.
    pub fn number(&self, idx: usize) -> Option<f32> {
        self.operands.get(idx).and_then(PdfValue::as_number)
    }
}

/// What a named XObject resource refers to.
#[derive(Debug, Clone)]
pub enum XObject {
    /// An image, painted into the unit square of the current CTM.
    Image,
    /// A form with its own content and matrix.
    Form { matrix: Matrix, content: Vec<u8> },
    /// Anything we do not interpret.
    Other,
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// All pages in document order.
    fn pages(&self) -> Vec<PageId>;

    /// Visible page box in PDF user space (CropBox, else MediaBox).
    fn page_box(&self, page: PageId) -> Result<Rect>;

    /// Fonts available on a page, keyed by resource name.
    fn page_fonts(&self, page: PageId) -> Result<BTreeMap<Vec<u8>, FontMetrics>>;

    /// The raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence using the font's encoding on the given page.
    /// Falls back to simple decoding if the font or encoding is unavailable.
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String;

    /// Resolve a named XObject from the page resources.
    fn xobject(&self, page: PageId, name: &[u8]) -> XObject;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// LopdfBackend concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

/// Limit for walking /Parent chains, guards against reference cycles.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(Error::from)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }

    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match self.resolve(obj) {
            Object::Dictionary(d) => Some(d),
            Object::Stream(s) => Some(&s.dict),
            _ => None,
        }
    }

    /// Look up a page attribute, following /Parent for inheritable keys.
    fn inherited<'a>(&'a self, page: ObjectId, key: &[u8]) -> Option<&'a Object> {
        let mut dict = self.doc.get_dictionary(page).ok()?;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(value) = dict.get(key) {
                return Some(self.resolve(value));
            }
            let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
            dict = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn rect_from(&self, obj: &Object) -> Option<Rect> {
        let array = self.resolve(obj).as_array().ok()?;
        if array.len() < 4 {
            return None;
        }
        let mut nums = [0.0f32; 4];
        for (slot, item) in nums.iter_mut().zip(array.iter()) {
            *slot = number(self.resolve(item))?;
        }
        Some(Rect::new(
            nums[0].min(nums[2]),
            nums[1].min(nums[3]),
            nums[0].max(nums[2]),
            nums[1].max(nums[3]),
        ))
    }

    fn page_xobjects(&self, page: ObjectId) -> Option<&Dictionary> {
        let resources = self.resolve_dict(self.inherited(page, b"Resources")?)?;
        self.resolve_dict(resources.get(b"XObject").ok()?)
    }

    fn font_metrics(&self, font: &Dictionary) -> FontMetrics {
        let base_font = font
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let composite = font
            .get(b"Subtype")
            .ok()
            .and_then(|o| o.as_name().ok())
            .is_some_and(|n| n == b"Type0");

        let first_char = font
            .get(b"FirstChar")
            .ok()
            .and_then(|o| self.resolve(o).as_i64().ok())
            .unwrap_or(0)
            .max(0) as u32;

        let widths = font
            .get(b"Widths")
            .ok()
            .and_then(|o| self.resolve(o).as_array().ok())
            .map(|arr| {
                arr.iter()
                    .map(|w| number(self.resolve(w)).unwrap_or(0.0))
                    .collect()
            })
            .unwrap_or_default();

        let missing_width = font
            .get(b"FontDescriptor")
            .ok()
            .and_then(|o| self.resolve_dict(o))
            .and_then(|d| d.get(b"MissingWidth").ok())
            .and_then(|o| number(self.resolve(o)))
            .unwrap_or(0.0);

        FontMetrics {
            base_font,
            first_char,
            widths,
            missing_width,
            composite,
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> Vec<PageId> {
        self.doc.get_pages().into_values().collect()
    }

    fn page_box(&self, page: PageId) -> Result<Rect> {
        let media = self
            .inherited(page, b"MediaBox")
            .and_then(|o| self.rect_from(o))
            // Default to Letter size
            .unwrap_or(Rect::new(0.0, 0.0, 612.0, 792.0));

        let visible = self
            .inherited(page, b"CropBox")
            .and_then(|o| self.rect_from(o))
            .map(|crop| {
                Rect::new(
                    crop.x0.max(media.x0),
                    crop.y0.max(media.y0),
                    crop.x1.min(media.x1),
                    crop.y1.min(media.y1),
                )
            })
            .filter(|r| !r.is_empty())
            .unwrap_or(media);

        Ok(visible)
    }

    fn page_fonts(&self, page: PageId) -> Result<BTreeMap<Vec<u8>, FontMetrics>> {
        let lopdf_fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(lopdf_fonts
            .iter()
            .map(|(name, dict)| (name.clone(), self.font_metrics(dict)))
            .collect())
    }

    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(c) => c,
            // A page without /Contents is blank
            Err(_) => return Ok(Vec::new()),
        };

        let streams: Vec<&Object> = match self.resolve(contents) {
            Object::Array(arr) => arr.iter().map(|o| self.resolve(o)).collect(),
            other => vec![other],
        };

        let mut content = Vec::new();
        for obj in streams {
            match obj {
                Object::Stream(s) => match s.decompressed_content() {
                    Ok(data) => content.extend_from_slice(&data),
                    // Uncompressed streams report an error but carry raw bytes
                    Err(_) => content.extend_from_slice(&s.content),
                },
                _ => return Err(Error::PdfParse("Invalid content stream".to_string())),
            }
            content.push(b'\n');
        }
        Ok(content)
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content =
            lopdf::content::Content::decode(data).map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Ok(lopdf_fonts) = self.doc.get_page_fonts(page) {
            if let Some(font_dict) = lopdf_fonts.get(font_name) {
                if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }

    fn xobject(&self, page: PageId, name: &[u8]) -> XObject {
        let Some(entry) = self.page_xobjects(page).and_then(|d| d.get(name).ok()) else {
            return XObject::Other;
        };
        let Object::Stream(stream) = self.resolve(entry) else {
            return XObject::Other;
        };

        match stream.dict.get(b"Subtype").ok().and_then(|o| o.as_name().ok()) {
            Some(b"Image") => XObject::Image,
            Some(b"Form") => {
                let matrix = stream
                    .dict
                    .get(b"Matrix")
                    .ok()
                    .and_then(|o| self.resolve(o).as_array().ok())
                    .and_then(|arr| matrix_from(arr.iter().map(|o| number(self.resolve(o)))))
                    .unwrap_or_default();
                let content = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                XObject::Form { matrix, content }
            }
            _ => XObject::Other,
        }
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn matrix_from(mut values: impl Iterator<Item = Option<f32>>) -> Option<Matrix> {
    let mut m = [0.0f32; 6];
    for slot in m.iter_mut() {
        *slot = values.next()??;
    }
    Some(Matrix::new(m[0], m[1], m[2], m[3], m[4], m[5]))
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_pdf_value_numbers() {
        assert_eq!(PdfValue::Integer(42).as_number(), Some(42.0));
        assert_eq!(PdfValue::Real(2.5).as_number(), Some(2.5));
        assert_eq!(PdfValue::Other.as_number(), None);
    }

    #[test]
    fn test_font_metrics_width_lookup() {
        let metrics = FontMetrics {
            first_char: 65,
            widths: vec![600.0, 0.0, 550.0],
            missing_width: 250.0,
            ..Default::default()
        };
        assert_eq!(metrics.width_of(65), Some(600.0));
        // Zero width falls back to MissingWidth
        assert_eq!(metrics.width_of(66), Some(250.0));
        assert_eq!(metrics.width_of(67), Some(550.0));
        assert_eq!(metrics.width_of(32), Some(250.0));

        let bare = FontMetrics::default();
        assert_eq!(bare.width_of(65), None);
    }

    #[test]
    fn test_matrix_from_values() {
        let m = matrix_from([1.0, 0.0, 0.0, 1.0, 5.0, 6.0].into_iter().map(Some)).unwrap();
        assert_eq!(m.apply(0.0, 0.0), (5.0, 6.0));
        assert!(matrix_from([1.0, 0.0].into_iter().map(Some)).is_none());
    }
}
