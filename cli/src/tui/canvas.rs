//! Page canvas drawn with half-block characters.
//!
//! Every terminal cell shows two preview pixels stacked: the upper one as
//! the foreground of `▀`, the lower one as the background. Terminal cells
//! are about twice as tall as wide, so pixels come out roughly square.

use image::GrayImage;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use textorizer::IRect;

use super::theme;

const UPPER_HALF: &str = "▀";

/// Placement of a page preview on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen cells covered by the preview.
    pub area: Rect,
    /// Preview pixels per page point.
    pub scale: f32,
    /// Preview size in pixels.
    pub pixels: (u32, u32),
}

impl Viewport {
    /// Largest scale at which a page fits into `area`.
    pub fn fit_scale(area: Rect, page_width: f32, page_height: f32) -> Option<f32> {
        if area.is_empty() || page_width <= 0.0 || page_height <= 0.0 {
            return None;
        }
        let sx = area.width as f32 / page_width;
        let sy = (area.height as f32 * 2.0) / page_height;
        Some(sx.min(sy))
    }

    /// Center a preview of `pixels` inside `area`, cropping what does not fit.
    pub fn new(area: Rect, scale: f32, pixels: (u32, u32)) -> Self {
        let cols = pixels.0.min(area.width as u32) as u16;
        let rows = pixels.1.div_ceil(2).min(area.height as u32) as u16;
        let x = area.x + (area.width - cols) / 2;
        let y = area.y + (area.height - rows) / 2;
        Self {
            area: Rect::new(x, y, cols, rows),
            scale,
            pixels,
        }
    }

    /// Page point under a screen cell, or `None` off the page.
    pub fn screen_to_page(&self, column: u16, row: u16) -> Option<(i32, i32)> {
        if !self.area.contains(Position::new(column, row)) {
            return None;
        }
        let px = (column - self.area.x) as u32;
        let py = (row - self.area.y) as u32 * 2;
        if px >= self.pixels.0 || py >= self.pixels.1 {
            return None;
        }
        Some(self.pixel_center_to_page(px, py))
    }

    /// Like [`screen_to_page`](Self::screen_to_page), snapping cells off the
    /// page to its nearest edge.
    pub fn clamp_to_page(&self, column: u16, row: u16) -> (i32, i32) {
        let max_col = self.area.x + self.area.width.saturating_sub(1);
        let max_row = self.area.y + self.area.height.saturating_sub(1);
        let px = (column.clamp(self.area.x, max_col) - self.area.x) as u32;
        let py = (row.clamp(self.area.y, max_row) - self.area.y) as u32 * 2;
        self.pixel_center_to_page(
            px.min(self.pixels.0.saturating_sub(1)),
            py.min(self.pixels.1.saturating_sub(1)),
        )
    }

    fn pixel_center_to_page(&self, px: u32, py: u32) -> (i32, i32) {
        // A cell covers pixel rows py and py + 1, its centre is py + 1
        let x = (px as f32 + 0.5) / self.scale;
        let y = (py as f32 + 1.0) / self.scale;
        (x.floor() as i32, y.floor() as i32)
    }

    /// Pixel box of a page rectangle, edges inclusive.
    pub fn to_pixels(&self, rect: &IRect) -> (u32, u32, u32, u32) {
        let px = |v: i32| (v.max(0) as f32 * self.scale).floor() as u32;
        let (x0, y0) = (px(rect.x0), px(rect.y0));
        let x1 = px(rect.x1).saturating_sub(1).max(x0);
        let y1 = px(rect.y1).saturating_sub(1).max(y0);
        (x0, y0, x1, y1)
    }

    /// Screen cell showing a preview pixel.
    fn pixel_to_screen(&self, px: u32, py: u32) -> Option<Position> {
        let column = self.area.x as u32 + px;
        let row = self.area.y as u32 + py / 2;
        let pos = Position::new(u16::try_from(column).ok()?, u16::try_from(row).ok()?);
        self.area.contains(pos).then_some(pos)
    }
}

/// Widget drawing a page preview with its regions.
pub struct PageCanvas<'a> {
    image: &'a GrayImage,
    viewport: Viewport,
    regions: &'a [IRect],
    selected: Option<usize>,
    drawing: Option<IRect>,
}

impl<'a> PageCanvas<'a> {
    pub fn new(image: &'a GrayImage, viewport: Viewport, regions: &'a [IRect]) -> Self {
        Self {
            image,
            viewport,
            regions,
            selected: None,
            drawing: None,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    /// Rubber band of a region being drawn.
    pub fn drawing(mut self, rect: Option<IRect>) -> Self {
        self.drawing = rect;
        self
    }

    /// Outline color at a pixel, topmost outline first.
    fn outline_at(&self, px: u32, py: u32) -> Option<Color> {
        let on_edge = |rect: &IRect| {
            let (x0, y0, x1, y1) = self.viewport.to_pixels(rect);
            let inside_x = (x0..=x1).contains(&px);
            let inside_y = (y0..=y1).contains(&py);
            ((px == x0 || px == x1) && inside_y) || ((py == y0 || py == y1) && inside_x)
        };

        if self.drawing.as_ref().is_some_and(on_edge) {
            return Some(theme::DRAWING);
        }
        if let Some(rect) = self.selected.and_then(|i| self.regions.get(i)) {
            if on_edge(rect) {
                return Some(theme::SELECTED);
            }
        }
        self.regions
            .iter()
            .any(on_edge)
            .then_some(theme::REGION)
    }

    fn color_at(&self, px: u32, py: u32) -> Color {
        if let Some(color) = self.outline_at(px, py) {
            return color;
        }
        match self.image.get_pixel_checked(px, py) {
            Some(pixel) => theme::gray(pixel[0]),
            None => theme::BG_BASE,
        }
    }
}

impl Widget for PageCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.viewport.area.intersection(area);
        for row in view.top()..view.bottom() {
            for column in view.left()..view.right() {
                let px = (column - self.viewport.area.x) as u32;
                let py = (row - self.viewport.area.y) as u32 * 2;
                let upper = self.color_at(px, py);
                let lower = self.color_at(px, py + 1);
                if let Some(cell) = buf.cell_mut((column, row)) {
                    cell.set_symbol(UPPER_HALF).set_fg(upper).set_bg(lower);
                }
            }
        }

        // Order labels in the top left corner of each region
        for (index, rect) in self.regions.iter().enumerate() {
            let (x0, y0, _, _) = self.viewport.to_pixels(rect);
            let Some(pos) = self.viewport.pixel_to_screen(x0, y0) else {
                continue;
            };
            let label = format!("{}", index + 1);
            if pos.x as usize + label.len() > view.right() as usize || !view.contains(pos) {
                continue;
            }
            let color = if self.selected == Some(index) {
                theme::SELECTED
            } else {
                theme::REGION
            };
            buf.set_string(pos.x, pos.y, label, Style::default().fg(theme::BG_BASE).bg(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn viewport() -> Viewport {
        // Letter page at half scale inside a 400x300 cell area
        Viewport::new(Rect::new(0, 0, 400, 300), 0.5, (306, 396))
    }

    #[test]
    fn test_fit_scale() {
        let area = Rect::new(0, 0, 100, 50);
        let scale = Viewport::fit_scale(area, 612.0, 792.0).unwrap();
        assert!((scale - 100.0 / 792.0).abs() < 1e-6);
        assert_eq!(Viewport::fit_scale(Rect::new(0, 0, 0, 10), 612.0, 792.0), None);
        assert_eq!(Viewport::fit_scale(area, 0.0, 792.0), None);
    }

    #[test]
    fn test_viewport_is_centered() {
        let vp = viewport();
        assert_eq!(vp.area, Rect::new(47, 51, 306, 198));
    }

    #[test]
    fn test_viewport_crops_to_area() {
        let vp = Viewport::new(Rect::new(2, 3, 10, 4), 1.0, (20, 20));
        assert_eq!(vp.area, Rect::new(2, 3, 10, 4));
    }

    #[test]
    fn test_screen_to_page() {
        let vp = viewport();
        assert_eq!(vp.screen_to_page(47, 51), Some((1, 2)));
        assert_eq!(vp.screen_to_page(48, 52), Some((3, 6)));
        assert_eq!(vp.screen_to_page(46, 51), None);
        assert_eq!(vp.screen_to_page(47, 50), None);
        assert_eq!(vp.screen_to_page(353, 51), None);
    }

    #[test]
    fn test_clamp_to_page() {
        let vp = viewport();
        assert_eq!(vp.clamp_to_page(0, 0), (1, 2));
        let (x, y) = vp.clamp_to_page(399, 299);
        assert!((610..=612).contains(&x));
        assert!((790..=792).contains(&y));
    }

    #[test]
    fn test_to_pixels() {
        let vp = viewport();
        assert_eq!(vp.to_pixels(&IRect::new(10, 20, 110, 220)), (5, 10, 54, 109));
        // Degenerate boxes keep a single pixel
        assert_eq!(vp.to_pixels(&IRect::new(10, 20, 11, 21)), (5, 10, 5, 10));
    }

    #[test]
    fn test_canvas_draws_preview_and_outlines() {
        let mut image = GrayImage::from_pixel(20, 20, Luma([255]));
        image.put_pixel(15, 15, Luma([40]));
        let vp = Viewport::new(Rect::new(0, 0, 20, 10), 1.0, (20, 20));
        let regions = [IRect::new(2, 2, 8, 8)];

        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        PageCanvas::new(&image, vp, &regions)
            .selected(Some(0))
            .render(area, &mut buf);

        // Paper
        let cell = &buf[(18, 0)];
        assert_eq!(cell.symbol(), UPPER_HALF);
        assert_eq!(cell.fg, theme::gray(255));
        // Dark pixel at (15, 15) is the lower half of row 7
        assert_eq!(buf[(15, 7)].bg, theme::gray(40));
        assert_eq!(buf[(15, 7)].fg, theme::gray(255));
        // Top edge of the selected region sits in row 1
        assert_eq!(buf[(5, 1)].fg, theme::SELECTED);
        // Order label at the region's first pixel
        assert_eq!(buf[(2, 1)].symbol(), "1");
    }

    #[test]
    fn test_drawing_band_over_regions() {
        let image = GrayImage::from_pixel(10, 10, Luma([255]));
        let vp = Viewport::new(Rect::new(0, 0, 10, 5), 1.0, (10, 10));
        let regions = [IRect::new(0, 0, 10, 10)];
        let canvas = PageCanvas::new(&image, vp, &regions).drawing(Some(IRect::new(0, 0, 4, 4)));
        assert_eq!(canvas.outline_at(0, 0), Some(theme::DRAWING));
        assert_eq!(canvas.outline_at(9, 9), Some(theme::REGION));
        assert_eq!(canvas.outline_at(5, 5), None);
    }
}
