//! Content stream interpretation.
//!
//! Walks a page's content operators and records what column detection and
//! text export need: glyph boxes grouped into spans, bounding boxes of painted
//! vector paths, and image placements. Everything is reported in page space.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::geometry::{Matrix, Rect};

use super::backend::{ContentOp, FontMetrics, PageId, PdfBackend, PdfValue, XObject};

/// Guards against self-referencing form XObjects.
const MAX_FORM_DEPTH: usize = 8;

/// TJ adjustments beyond this (in 1/1000 em) are treated as word breaks.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Ascender and descender as a fraction of the font size.
const ASCENT: f32 = 0.8;
const DESCENT: f32 = 0.2;

/// A single placed character.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub bbox: Rect,
}

/// A run of text shown by one text operator.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// Decoded text, one char per glyph.
    pub text: String,
    /// Union of the glyph boxes.
    pub bbox: Rect,
    /// Effective font size in page units.
    pub font_size: f32,
    /// Base font name.
    pub font_name: String,
    /// Whether the writing direction is left-to-right horizontal.
    pub horizontal: bool,
    /// Placed glyphs in showing order.
    pub glyphs: Vec<Glyph>,
}

impl TextSpan {
    /// Build a span from glyphs, returning `None` for whitespace-only runs.
    pub fn from_glyphs(
        glyphs: Vec<Glyph>,
        font_size: f32,
        font_name: String,
        horizontal: bool,
    ) -> Option<Self> {
        let text: String = glyphs.iter().map(|g| g.ch).collect();
        if text.trim().is_empty() {
            return None;
        }
        let bbox = glyphs
            .iter()
            .fold(Rect::default(), |acc, g| acc.union(&g.bbox));
        Some(Self {
            text,
            bbox,
            font_size,
            font_name,
            horizontal,
            glyphs,
        })
    }

    /// Keep only the glyphs whose centre lies inside `clip`.
    pub fn clipped(&self, clip: &Rect) -> Option<TextSpan> {
        let glyphs: Vec<Glyph> = self
            .glyphs
            .iter()
            .filter(|g| {
                let (cx, cy) = g.bbox.center();
                clip.contains_point(cx, cy)
            })
            .cloned()
            .collect();
        if glyphs.len() == self.glyphs.len() {
            return Some(self.clone());
        }
        TextSpan::from_glyphs(
            glyphs,
            self.font_size,
            self.font_name.clone(),
            self.horizontal,
        )
    }

    /// Baseline estimate derived from the box.
    pub fn baseline(&self) -> f32 {
        self.bbox.y1 - self.font_size * DESCENT
    }
}

/// Everything extracted from one page.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Page rectangle in page space, always anchored at (0, 0).
    pub page_rect: Rect,
    pub spans: Vec<TextSpan>,
    /// Bounding boxes of painted vector paths.
    pub paths: Vec<Rect>,
    /// Image placements.
    pub images: Vec<Rect>,
}

impl PageContent {
    pub fn width(&self) -> f32 {
        self.page_rect.width()
    }

    pub fn height(&self) -> f32 {
        self.page_rect.height()
    }
}

#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: Matrix,
    font: Vec<u8>,
    font_size: f32,
    char_spacing: f32,
    word_spacing: f32,
    h_scale: f32,
    leading: f32,
    rise: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            font: Vec::new(),
            font_size: 12.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scale: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

/// Interprets the content streams of a single page.
pub struct ContentInterpreter<'a> {
    backend: &'a dyn PdfBackend,
    page: PageId,
    fonts: BTreeMap<Vec<u8>, FontMetrics>,
    /// Maps PDF user space to page space.
    to_page: Matrix,
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    tm: Matrix,
    tlm: Matrix,
    path: Vec<(f32, f32)>,
    out: PageContent,
}

impl<'a> ContentInterpreter<'a> {
    pub fn new(backend: &'a dyn PdfBackend, page: PageId) -> Result<Self> {
        let page_box = backend.page_box(page)?;
        let fonts = backend.page_fonts(page).unwrap_or_else(|e| {
            log::warn!("Failed to read fonts of page {:?}: {}", page, e);
            BTreeMap::new()
        });
        let to_page = Matrix::new(1.0, 0.0, 0.0, -1.0, -page_box.x0, page_box.y1);

        Ok(Self {
            backend,
            page,
            fonts,
            to_page,
            state: GraphicsState::default(),
            stack: Vec::new(),
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            path: Vec::new(),
            out: PageContent {
                page_rect: Rect::new(0.0, 0.0, page_box.width(), page_box.height()),
                ..Default::default()
            },
        })
    }

    /// Run the page content and return the collected elements.
    pub fn run(mut self) -> Result<PageContent> {
        let raw = self.backend.page_content(self.page)?;
        let ops = self.backend.decode_content(&raw)?;
        self.execute(&ops, 0);
        log::debug!(
            "Page {:?}: {} spans, {} paths, {} images",
            self.page,
            self.out.spans.len(),
            self.out.paths.len(),
            self.out.images.len()
        );
        Ok(self.out)
    }

    fn execute(&mut self, ops: &[ContentOp], depth: usize) {
        for op in ops {
            self.step(op, depth);
        }
    }

    fn step(&mut self, op: &ContentOp, depth: usize) {
        match op.operator.as_str() {
            // Graphics state
            "q" => self.stack.push(self.state.clone()),
            "Q" => {
                if let Some(state) = self.stack.pop() {
                    self.state = state;
                }
            }
            "cm" => {
                if let Some(m) = matrix_operands(op) {
                    self.state.ctm = m.then(&self.state.ctm);
                }
            }

            // Text objects and state
            "BT" => {
                self.tm = Matrix::IDENTITY;
                self.tlm = Matrix::IDENTITY;
            }
            "ET" => {}
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.state.font = name.clone();
                }
                self.state.font_size = op.number(1).unwrap_or(12.0);
            }
            "Tc" => self.state.char_spacing = op.number(0).unwrap_or(0.0),
            "Tw" => self.state.word_spacing = op.number(0).unwrap_or(0.0),
            "Tz" => self.state.h_scale = op.number(0).unwrap_or(100.0) / 100.0,
            "TL" => self.state.leading = op.number(0).unwrap_or(0.0),
            "Ts" => self.state.rise = op.number(0).unwrap_or(0.0),

            // Text positioning
            "Td" => {
                let tx = op.number(0).unwrap_or(0.0);
                let ty = op.number(1).unwrap_or(0.0);
                self.next_line(tx, ty);
            }
            "TD" => {
                let tx = op.number(0).unwrap_or(0.0);
                let ty = op.number(1).unwrap_or(0.0);
                self.state.leading = -ty;
                self.next_line(tx, ty);
            }
            "Tm" => {
                if let Some(m) = matrix_operands(op) {
                    self.tm = m;
                    self.tlm = m;
                }
            }
            "T*" => self.next_line(0.0, -self.state.leading),

            // Text showing
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let glyphs = self.show_string(bytes);
                    self.push_span(glyphs);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let glyphs = self.show_array(items);
                    self.push_span(glyphs);
                }
            }
            "'" => {
                self.next_line(0.0, -self.state.leading);
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let glyphs = self.show_string(bytes);
                    self.push_span(glyphs);
                }
            }
            "\"" => {
                self.state.word_spacing = op.number(0).unwrap_or(0.0);
                self.state.char_spacing = op.number(1).unwrap_or(0.0);
                self.next_line(0.0, -self.state.leading);
                if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                    let glyphs = self.show_string(bytes);
                    self.push_span(glyphs);
                }
            }

            // Path construction
            "m" | "l" => {
                if let (Some(x), Some(y)) = (op.number(0), op.number(1)) {
                    self.add_path_point(x, y);
                }
            }
            "c" | "v" | "y" => {
                let nums: Vec<f32> = op.operands.iter().filter_map(PdfValue::as_number).collect();
                for pair in nums.chunks_exact(2) {
                    self.add_path_point(pair[0], pair[1]);
                }
            }
            "re" => {
                let nums: Vec<f32> = op.operands.iter().filter_map(PdfValue::as_number).collect();
                if let [x, y, w, h] = nums[..] {
                    self.add_path_point(x, y);
                    self.add_path_point(x + w, y);
                    self.add_path_point(x, y + h);
                    self.add_path_point(x + w, y + h);
                }
            }
            "h" => {}

            // Path painting
            "S" | "s" | "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" => self.paint_path(),
            "n" => self.path.clear(),

            // External objects
            "Do" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.do_xobject(name, depth);
                }
            }
            "BI" => self.place_unit_square(),

            _ => {}
        }
    }

    fn next_line(&mut self, tx: f32, ty: f32) {
        self.tlm = Matrix::translation(tx, ty).then(&self.tlm);
        self.tm = self.tlm;
    }

    fn add_path_point(&mut self, x: f32, y: f32) {
        let device = self.state.ctm.then(&self.to_page);
        self.path.push(device.apply(x, y));
    }

    fn paint_path(&mut self) {
        if let Some(rect) = Rect::from_points(&self.path) {
            self.out.paths.push(rect);
        }
        self.path.clear();
    }

    fn place_unit_square(&mut self) {
        let device = self.state.ctm.then(&self.to_page);
        let rect = device.transform_rect(&Rect::new(0.0, 0.0, 1.0, 1.0));
        self.out.images.push(rect);
    }

    fn do_xobject(&mut self, name: &[u8], depth: usize) {
        match self.backend.xobject(self.page, name) {
            XObject::Image => self.place_unit_square(),
            XObject::Form { matrix, content } => {
                if depth >= MAX_FORM_DEPTH {
                    log::warn!("Form XObject nesting too deep on page {:?}", self.page);
                    return;
                }
                let ops = match self.backend.decode_content(&content) {
                    Ok(ops) => ops,
                    Err(e) => {
                        log::warn!("Skipping unreadable form XObject: {}", e);
                        return;
                    }
                };
                self.stack.push(self.state.clone());
                self.state.ctm = matrix.then(&self.state.ctm);
                self.execute(&ops, depth + 1);
                if let Some(state) = self.stack.pop() {
                    self.state = state;
                }
            }
            XObject::Other => {}
        }
    }

    /// Place the glyphs of one string and advance the text matrix.
    fn show_string(&mut self, bytes: &[u8]) -> Vec<Glyph> {
        let metrics = self.fonts.get(&self.state.font);
        let composite = metrics.is_some_and(|m| m.composite);
        let fs = self.state.font_size;
        let th = self.state.h_scale;

        let codes: Vec<&[u8]> = if composite {
            bytes.chunks(2).collect()
        } else {
            bytes.chunks(1).collect()
        };
        let text = self.backend.decode_text(self.page, &self.state.font, bytes);
        let chars: Vec<char> = text.chars().collect();
        let fallback_width = fallback_glyph_width(metrics);

        let mut boxes = Vec::with_capacity(codes.len());
        for code in &codes {
            let w0 = match (metrics, code) {
                (Some(m), [byte]) if !m.composite => m.width_of(*byte).unwrap_or(fallback_width),
                _ => fallback_width,
            } / 1000.0;
            let is_space = matches!(code, [b' ']);

            let glyph_width = w0 * fs * th;
            let text_rect = Rect::new(
                0.0,
                self.state.rise - DESCENT * fs,
                glyph_width,
                self.state.rise + ASCENT * fs,
            );
            let device = self.tm.then(&self.state.ctm).then(&self.to_page);
            boxes.push(device.transform_rect(&text_rect));

            let mut advance = w0 * fs + self.state.char_spacing;
            if is_space {
                advance += self.state.word_spacing;
            }
            self.tm = Matrix::translation(advance * th, 0.0).then(&self.tm);
        }

        assign_chars(&chars, &boxes)
    }

    fn show_array(&mut self, items: &[PdfValue]) -> Vec<Glyph> {
        let mut glyphs: Vec<Glyph> = Vec::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => glyphs.extend(self.show_string(bytes)),
                other => {
                    let Some(adjust) = other.as_number() else {
                        continue;
                    };
                    let before = self.current_origin();
                    let shift = -adjust / 1000.0 * self.state.font_size * self.state.h_scale;
                    self.tm = Matrix::translation(shift, 0.0).then(&self.tm);

                    // Large negative kerning usually stands in for a space
                    let needs_space = -adjust > TJ_SPACE_THRESHOLD
                        && glyphs
                            .last()
                            .is_some_and(|g| !g.ch.is_whitespace() && !is_spaceless_script_char(g.ch));
                    if needs_space {
                        let after = self.current_origin();
                        let last = glyphs.last().map(|g| g.bbox).unwrap_or_default();
                        let bbox = Rect::new(
                            before.0.min(after.0),
                            last.y0,
                            before.0.max(after.0),
                            last.y1,
                        );
                        glyphs.push(Glyph { ch: ' ', bbox });
                    }
                }
            }
        }
        glyphs
    }

    fn current_origin(&self) -> (f32, f32) {
        self.tm
            .then(&self.state.ctm)
            .then(&self.to_page)
            .apply(0.0, self.state.rise)
    }

    fn push_span(&mut self, glyphs: Vec<Glyph>) {
        let rendering = self.tm.then(&self.state.ctm);
        let horizontal = rendering.a > 0.0 && rendering.b.abs() <= rendering.a.abs() * 1e-3;
        let font_size = self.state.font_size * rendering.y_scale();
        let font_name = self
            .fonts
            .get(&self.state.font)
            .map(|m| m.base_font.clone())
            .unwrap_or_else(|| String::from_utf8_lossy(&self.state.font).to_string());

        if let Some(span) = TextSpan::from_glyphs(glyphs, font_size, font_name, horizontal) {
            self.out.spans.push(span);
        }
    }
}

/// Extract positioned content from one page.
pub fn interpret_page(backend: &dyn PdfBackend, page: PageId) -> Result<PageContent> {
    ContentInterpreter::new(backend, page)?.run()
}

fn matrix_operands(op: &ContentOp) -> Option<Matrix> {
    let n: Vec<f32> = op.operands.iter().filter_map(PdfValue::as_number).collect();
    match n[..] {
        [a, b, c, d, e, f] => Some(Matrix::new(a, b, c, d, e, f)),
        _ => None,
    }
}

fn fallback_glyph_width(metrics: Option<&FontMetrics>) -> f32 {
    match metrics {
        Some(m) if m.base_font.contains("Courier") => 600.0,
        _ => 500.0,
    }
}

/// Pair decoded characters with glyph boxes.
///
/// When decoding changed the number of characters (ligatures, multi-byte
/// codes), characters are spread evenly over the combined box.
fn assign_chars(chars: &[char], boxes: &[Rect]) -> Vec<Glyph> {
    if chars.len() == boxes.len() {
        return chars
            .iter()
            .zip(boxes)
            .map(|(&ch, &bbox)| Glyph { ch, bbox })
            .collect();
    }
    if chars.is_empty() {
        return Vec::new();
    }

    let total = boxes.iter().fold(Rect::default(), |acc, b| acc.union(b));
    let step = total.width() / chars.len() as f32;
    chars
        .iter()
        .enumerate()
        .map(|(i, &ch)| Glyph {
            ch,
            bbox: Rect::new(
                total.x0 + step * i as f32,
                total.y0,
                total.x0 + step * (i + 1) as f32,
                total.y1,
            ),
        })
        .collect()
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana and Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::backend::decode_text_simple;

    /// Backend serving a fixed operator list for a single Letter page.
    struct ScriptedBackend {
        ops: Vec<ContentOp>,
        fonts: BTreeMap<Vec<u8>, FontMetrics>,
    }

    impl ScriptedBackend {
        fn new(ops: Vec<ContentOp>) -> Self {
            let mut fonts = BTreeMap::new();
            fonts.insert(
                b"F1".to_vec(),
                FontMetrics {
                    base_font: "Courier".to_string(),
                    ..Default::default()
                },
            );
            Self { ops, fonts }
        }
    }

    impl PdfBackend for ScriptedBackend {
        fn pages(&self) -> Vec<PageId> {
            vec![(1, 0)]
        }

        fn page_box(&self, _page: PageId) -> Result<Rect> {
            Ok(Rect::new(0.0, 0.0, 612.0, 792.0))
        }

        fn page_fonts(&self, _page: PageId) -> Result<BTreeMap<Vec<u8>, FontMetrics>> {
            Ok(self.fonts.clone())
        }

        fn page_content(&self, _page: PageId) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        fn decode_content(&self, _data: &[u8]) -> Result<Vec<ContentOp>> {
            Ok(self.ops.clone())
        }

        fn decode_text(&self, _page: PageId, _font: &[u8], bytes: &[u8]) -> String {
            decode_text_simple(bytes)
        }

        fn xobject(&self, _page: PageId, name: &[u8]) -> XObject {
            if name == b"Im1" {
                XObject::Image
            } else {
                XObject::Other
            }
        }
    }

    fn name(n: &str) -> PdfValue {
        PdfValue::Name(n.as_bytes().to_vec())
    }

    fn string(s: &str) -> PdfValue {
        PdfValue::Str(s.as_bytes().to_vec())
    }

    fn int(i: i64) -> PdfValue {
        PdfValue::Integer(i)
    }

    fn run(ops: Vec<ContentOp>) -> PageContent {
        let backend = ScriptedBackend::new(ops);
        interpret_page(&backend, (1, 0)).unwrap()
    }

    #[test]
    fn test_span_position_in_page_space() {
        let content = run(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), int(10)]),
            ContentOp::new("Td", vec![int(100), int(700)]),
            ContentOp::new("Tj", vec![string("Hello")]),
            ContentOp::new("ET", vec![]),
        ]);

        assert_eq!(content.spans.len(), 1);
        let span = &content.spans[0];
        assert_eq!(span.text, "Hello");
        assert!(span.horizontal);
        // Courier: 0.6 em per glyph
        assert!((span.bbox.x0 - 100.0).abs() < 0.01);
        assert!((span.bbox.x1 - 130.0).abs() < 0.01);
        // Baseline at 792 - 700 = 92, ascent 8, descent 2
        assert!((span.bbox.y0 - 84.0).abs() < 0.01);
        assert!((span.bbox.y1 - 94.0).abs() < 0.01);
        assert_eq!(span.glyphs.len(), 5);
    }

    #[test]
    fn test_leading_and_next_line() {
        let content = run(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), int(10)]),
            ContentOp::new("TL", vec![int(14)]),
            ContentOp::new("Td", vec![int(50), int(700)]),
            ContentOp::new("Tj", vec![string("one")]),
            ContentOp::new("T*", vec![]),
            ContentOp::new("Tj", vec![string("two")]),
            ContentOp::new("ET", vec![]),
        ]);

        assert_eq!(content.spans.len(), 2);
        let dy = content.spans[1].bbox.y0 - content.spans[0].bbox.y0;
        assert!((dy - 14.0).abs() < 0.01);
        assert!((content.spans[1].bbox.x0 - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_tj_kerning_inserts_space() {
        let content = run(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), int(10)]),
            ContentOp::new("Td", vec![int(72), int(600)]),
            ContentOp::new(
                "TJ",
                vec![PdfValue::Array(vec![
                    string("Word"),
                    int(-500),
                    string("Next"),
                    int(-20),
                    string("er"),
                ])],
            ),
            ContentOp::new("ET", vec![]),
        ]);

        assert_eq!(content.spans.len(), 1);
        assert_eq!(content.spans[0].text, "Word Nexter");
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        let content = run(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), int(10)]),
            ContentOp::new("Tj", vec![string("   ")]),
            ContentOp::new("ET", vec![]),
        ]);
        assert!(content.spans.is_empty());
    }

    #[test]
    fn test_paths_and_images() {
        let content = run(vec![
            ContentOp::new("q", vec![]),
            ContentOp::new("re", vec![int(10), int(20), int(100), int(50)]),
            ContentOp::new("f", vec![]),
            ContentOp::new(
                "cm",
                vec![int(200), int(0), int(0), int(100), int(300), int(400)],
            ),
            ContentOp::new("Do", vec![name("Im1")]),
            ContentOp::new("Q", vec![]),
            ContentOp::new("re", vec![int(0), int(0), int(5), int(5)]),
            ContentOp::new("n", vec![]),
        ]);

        assert_eq!(content.paths, vec![Rect::new(10.0, 722.0, 110.0, 772.0)]);
        assert_eq!(content.images, vec![Rect::new(300.0, 292.0, 500.0, 392.0)]);
    }

    #[test]
    fn test_rotated_text_is_not_horizontal() {
        let content = run(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), int(10)]),
            ContentOp::new(
                "Tm",
                vec![int(0), int(1), int(-1), int(0), int(50), int(50)],
            ),
            ContentOp::new("Tj", vec![string("Up")]),
            ContentOp::new("ET", vec![]),
        ]);
        assert_eq!(content.spans.len(), 1);
        assert!(!content.spans[0].horizontal);
    }

    #[test]
    fn test_clipped_span_keeps_inner_glyphs() {
        let content = run(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), int(10)]),
            ContentOp::new("Td", vec![int(100), int(700)]),
            ContentOp::new("Tj", vec![string("LeftRight")]),
            ContentOp::new("ET", vec![]),
        ]);
        let span = &content.spans[0];
        // Each glyph is 6 wide; "Left" covers 100..124
        let clip = Rect::new(0.0, 0.0, 124.0, 792.0);
        assert_eq!(span.clipped(&clip).unwrap().text, "Left");
        let clip = Rect::new(124.0, 0.0, 612.0, 792.0);
        assert_eq!(span.clipped(&clip).unwrap().text, "Right");
        assert!(span.clipped(&Rect::new(0.0, 0.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn test_assign_chars_spreads_mismatched_counts() {
        let boxes = vec![Rect::new(0.0, 0.0, 10.0, 10.0)];
        let glyphs = assign_chars(&['f', 'i'], &boxes);
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].bbox.x1, 5.0);
        assert_eq!(glyphs[1].bbox.x0, 5.0);
    }
}
