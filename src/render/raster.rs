//! Greyscale page previews.
//!
//! There is no real rasterizer behind this: the preview shows where content
//! sits, which is all that is needed to judge region boundaries.

use std::path::Path;

use image::{GrayImage, Luma};

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::parser::PageContent;

const PAPER: Luma<u8> = Luma([255]);
const IMAGE_FILL: Luma<u8> = Luma([225]);
const PATH_FILL: Luma<u8> = Luma([190]);
const GLYPH_FILL: Luma<u8> = Luma([40]);

/// Largest preview edge in pixels.
pub const MAX_PREVIEW_EDGE: u32 = 8192;

/// Render a preview of a page at `scale` pixels per page unit.
pub fn render_preview(content: &PageContent, scale: f32) -> Result<GrayImage> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(Error::Render(format!("invalid scale {}", scale)));
    }
    let width = (content.width() * scale).ceil();
    let height = (content.height() * scale).ceil();
    if width < 1.0 || height < 1.0 || width > MAX_PREVIEW_EDGE as f32 || height > MAX_PREVIEW_EDGE as f32
    {
        return Err(Error::Render(format!(
            "preview size {}x{} out of range",
            width, height
        )));
    }

    let mut img = GrayImage::from_pixel(width as u32, height as u32, PAPER);

    for rect in &content.images {
        fill(&mut img, rect, scale, IMAGE_FILL);
    }
    for rect in &content.paths {
        fill(&mut img, rect, scale, PATH_FILL);
    }
    for span in &content.spans {
        for glyph in span.glyphs.iter().filter(|g| !g.ch.is_whitespace()) {
            // x-height bar, so lines stay apart at small scales
            let bar = Rect::new(
                glyph.bbox.x0 + glyph.bbox.width() * 0.1,
                glyph.bbox.y0 + glyph.bbox.height() * 0.35,
                glyph.bbox.x1 - glyph.bbox.width() * 0.1,
                glyph.bbox.y1 - glyph.bbox.height() * 0.2,
            );
            fill(&mut img, &bar, scale, GLYPH_FILL);
        }
    }

    Ok(img)
}

/// Write a preview as PNG.
pub fn save_png(img: &GrayImage, path: impl AsRef<Path>) -> Result<()> {
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

fn fill(img: &mut GrayImage, rect: &Rect, scale: f32, value: Luma<u8>) {
    let (w, h) = img.dimensions();
    let x0 = (rect.x0 * scale).floor().max(0.0) as u32;
    let y0 = (rect.y0 * scale).floor().max(0.0) as u32;
    let x1 = ((rect.x1 * scale).ceil().max(0.0) as u32).min(w);
    let y1 = ((rect.y1 * scale).ceil().max(0.0) as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, value);
        }
    }
}
