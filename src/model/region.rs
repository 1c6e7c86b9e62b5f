//! Regions and the ordered region list of a page.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::IRect;

/// A rectangle on a page whose text is extracted as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub rect: IRect,
}

impl Region {
    pub fn new(rect: IRect) -> Self {
        Self { rect }
    }

    pub fn x(&self) -> i32 {
        self.rect.x0
    }

    pub fn y(&self) -> i32 {
        self.rect.y0
    }

    pub fn width(&self) -> i32 {
        self.rect.width()
    }

    pub fn height(&self) -> i32 {
        self.rect.height()
    }
}

impl From<IRect> for Region {
    fn from(rect: IRect) -> Self {
        Self::new(rect)
    }
}

/// The regions of one page in extraction order.
///
/// The order index of a region is its position in the list, so indices are
/// always `0..len()`. Every region lies inside `bounds` and has a positive
/// area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRegions {
    page: usize,
    bounds: IRect,
    regions: Vec<Region>,
}

impl PageRegions {
    /// Create an empty region list for a page.
    pub fn new(page: usize, bounds: IRect) -> Self {
        Self {
            page,
            bounds,
            regions: Vec::new(),
        }
    }

    /// Create a region list from rectangles, clamping each one and skipping
    /// those left without area.
    pub fn from_rects(page: usize, bounds: IRect, rects: impl IntoIterator<Item = IRect>) -> Self {
        let mut regions = Self::new(page, bounds);
        for rect in rects {
            if regions.add(rect).is_err() {
                log::debug!("Dropping empty region {:?} on page {}", rect, page);
            }
        }
        regions
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// The rectangle all regions must stay inside.
    pub fn bounds(&self) -> IRect {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Rectangles in order.
    pub fn rects(&self) -> Vec<IRect> {
        self.regions.iter().map(|r| r.rect).collect()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.regions.len() {
            Ok(())
        } else {
            Err(Error::RegionOutOfRange {
                page: self.page,
                index,
                count: self.regions.len(),
            })
        }
    }

    fn clamp(&self, rect: IRect) -> Result<IRect> {
        let clamped = rect.clamp_to(&self.bounds);
        if clamped.is_empty() {
            Err(Error::EmptyRegion)
        } else {
            Ok(clamped)
        }
    }

    /// Append a region at the end of the order and return its index.
    pub fn add(&mut self, rect: IRect) -> Result<usize> {
        let rect = self.clamp(rect)?;
        self.regions.push(Region::new(rect));
        Ok(self.regions.len() - 1)
    }

    /// Remove the region at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Region> {
        self.check_index(index)?;
        Ok(self.regions.remove(index))
    }

    /// Remove all regions.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Replace the rectangle of a region.
    pub fn set_rect(&mut self, index: usize, rect: IRect) -> Result<IRect> {
        self.check_index(index)?;
        let rect = self.clamp(rect)?;
        self.regions[index].rect = rect;
        Ok(rect)
    }

    /// Translate a region, keeping its size and stopping at the page edges.
    pub fn move_by(&mut self, index: usize, dx: i32, dy: i32) -> Result<IRect> {
        self.check_index(index)?;
        let rect = self.regions[index].rect;
        let b = self.bounds;

        let dx = dx.max(b.x0 - rect.x0).min(b.x1 - rect.x1);
        let dy = dy.max(b.y0 - rect.y0).min(b.y1 - rect.y1);

        let moved = rect.translate(dx, dy);
        self.regions[index].rect = moved;
        Ok(moved)
    }

    /// Move the right and bottom edges of a region.
    ///
    /// The region keeps at least 1x1 and never grows past the page.
    pub fn resize_by(&mut self, index: usize, dw: i32, dh: i32) -> Result<IRect> {
        self.check_index(index)?;
        let rect = self.regions[index].rect;
        let b = self.bounds;

        let x1 = rect.x1.saturating_add(dw).min(b.x1).max(rect.x0 + 1);
        let y1 = rect.y1.saturating_add(dh).min(b.y1).max(rect.y0 + 1);

        let resized = IRect::new(rect.x0, rect.y0, x1, y1);
        self.regions[index].rect = resized;
        Ok(resized)
    }

    /// Move a region `direction` places later (positive) or earlier
    /// (negative) in the order, stopping at either end. Returns its new index.
    pub fn reorder(&mut self, index: usize, direction: isize) -> Result<usize> {
        self.check_index(index)?;
        let mut index = index;
        for _ in 0..direction.unsigned_abs() {
            if direction < 0 {
                if index == 0 {
                    break;
                }
                self.regions.swap(index, index - 1);
                index -= 1;
            } else {
                if index + 1 >= self.regions.len() {
                    break;
                }
                self.regions.swap(index, index + 1);
                index += 1;
            }
        }
        Ok(index)
    }

    /// Index of the first region containing the point.
    pub fn find(&self, x: i32, y: i32) -> Option<usize> {
        self.regions
            .iter()
            .position(|r| r.rect.contains_point(x, y))
    }
}
