//! Rectangles and affine transforms in page space.
//!
//! Page space has its origin at the top-left corner of the visible page box,
//! with y growing downward and one unit per PDF point.

use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

/// A floating point rectangle (x0, y0) - (x1, y1).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest rectangle containing all given points.
    pub fn from_points(points: &[(f32, f32)]) -> Option<Self> {
        let (&(fx, fy), rest) = points.split_first()?;
        let mut rect = Rect::new(fx, fy, fx, fy);
        for &(x, y) in rest {
            rect.x0 = rect.x0.min(x);
            rect.y0 = rect.y0.min(y);
            rect.x1 = rect.x1.max(x);
            rect.y1 = rect.y1.max(y);
        }
        Some(rect)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Union with another rectangle; an empty side yields the other one.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Whether the point lies inside, upper edges exclusive.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Round outward to the smallest integer rectangle that contains this one.
    pub fn round_out(&self) -> IRect {
        IRect::new(
            self.x0.floor() as i32,
            self.y0.floor() as i32,
            self.x1.ceil() as i32,
            self.y1.ceil() as i32,
        )
    }
}

/// An integer rectangle (x0, y0) - (x1, y1), the unit of regions and
/// column detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl IRect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle from an origin and a size.
    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    pub fn intersect(&self, other: &IRect) -> IRect {
        IRect::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        )
    }

    pub fn intersects(&self, other: &IRect) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Union with another rectangle; an empty side yields the other one.
    pub fn union(&self, other: &IRect) -> IRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        IRect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Whether `other` is non-empty and lies completely inside `self`.
    pub fn contains(&self, other: &IRect) -> bool {
        !other.is_empty()
            && !self.is_empty()
            && other.x0 >= self.x0
            && other.y0 >= self.y0
            && other.x1 <= self.x1
            && other.y1 <= self.y1
    }

    /// Whether the point lies inside, upper edges exclusive.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Clamp every coordinate into `bounds`, normalizing swapped corners.
    pub fn clamp_to(&self, bounds: &IRect) -> IRect {
        let (x0, x1) = (self.x0.min(self.x1), self.x0.max(self.x1));
        let (y0, y1) = (self.y0.min(self.y1), self.y0.max(self.y1));
        IRect::new(
            x0.clamp(bounds.x0, bounds.x1),
            y0.clamp(bounds.y0, bounds.y1),
            x1.clamp(bounds.x0, bounds.x1),
            y1.clamp(bounds.y0, bounds.y1),
        )
    }

    pub fn translate(&self, dx: i32, dy: i32) -> IRect {
        IRect::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.x0 as f32,
            self.y0 as f32,
            self.x1 as f32,
            self.y1 as f32,
        )
    }
}

impl BitAnd for IRect {
    type Output = IRect;

    fn bitand(self, rhs: IRect) -> IRect {
        self.intersect(&rhs)
    }
}

impl BitOr for IRect {
    type Output = IRect;

    fn bitor(self, rhs: IRect) -> IRect {
        self.union(&rhs)
    }
}

/// A 2D affine transform `[a b c d e f]` as used by PDF content streams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// `self` applied first, then `other`.
    pub fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    /// Length of the transformed unit x vector.
    pub fn x_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Length of the transformed unit y vector.
    pub fn y_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }

    /// Bounding box of a transformed rectangle.
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            self.apply(rect.x0, rect.y0),
            self.apply(rect.x1, rect.y0),
            self.apply(rect.x0, rect.y1),
            self.apply(rect.x1, rect.y1),
        ];
        Rect::from_points(&corners).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irect_empty_and_union() {
        let empty = IRect::new(10, 10, 10, 20);
        let rect = IRect::new(0, 0, 5, 5);
        assert!(empty.is_empty());
        assert_eq!(empty | rect, rect);
        assert_eq!(rect | empty, rect);
        assert_eq!(
            rect | IRect::new(3, 3, 8, 9),
            IRect::new(0, 0, 8, 9)
        );
    }

    #[test]
    fn test_irect_intersection() {
        let a = IRect::new(0, 0, 10, 10);
        let b = IRect::new(5, 5, 15, 15);
        assert_eq!(a & b, IRect::new(5, 5, 10, 10));
        assert!(a.intersects(&b));
        // Touching edges do not intersect
        assert!(!a.intersects(&IRect::new(10, 0, 20, 10)));
    }

    #[test]
    fn test_irect_contains() {
        let outer = IRect::new(0, 0, 100, 100);
        assert!(outer.contains(&IRect::new(10, 10, 100, 100)));
        assert!(!outer.contains(&IRect::new(10, 10, 101, 100)));
        assert!(!outer.contains(&IRect::new(10, 10, 10, 10)));
        assert!(outer.contains_point(0, 0));
        assert!(!outer.contains_point(100, 50));
    }

    #[test]
    fn test_irect_clamp_normalizes() {
        let bounds = IRect::new(0, 0, 50, 50);
        let clamped = IRect::new(60, 40, -5, 10).clamp_to(&bounds);
        assert_eq!(clamped, IRect::new(0, 10, 50, 40));
    }

    #[test]
    fn test_rect_round_out() {
        let r = Rect::new(1.2, 2.7, 10.1, 20.0);
        assert_eq!(r.round_out(), IRect::new(1, 2, 11, 20));
    }

    #[test]
    fn test_matrix_compose() {
        let scale = Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        let shift = Matrix::translation(10.0, 5.0);
        // scale first, then shift
        let m = scale.then(&shift);
        assert_eq!(m.apply(1.0, 1.0), (12.0, 7.0));
        // shift first, then scale
        let m = shift.then(&scale);
        assert_eq!(m.apply(1.0, 1.0), (22.0, 12.0));
    }

    #[test]
    fn test_matrix_transform_rect() {
        let flip = Matrix::new(1.0, 0.0, 0.0, -1.0, 0.0, 100.0);
        let r = flip.transform_rect(&Rect::new(0.0, 10.0, 20.0, 30.0));
        assert_eq!(r, Rect::new(0.0, 70.0, 20.0, 90.0));
    }
}
