#![forbid(unsafe_code)]

//! Geometry primitives in logical units.
//!
//! Extents are `f64` so proportional distribution never has to round. The
//! types are plain `Copy` values; none of them validates its contents, which
//! is left to the consumers that care (the layout crate rejects negative and
//! non-finite extents at its own boundaries).

/// A position in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both extents are finite and non-negative.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// True when `self` is at least as large as `other` on both axes.
    ///
    /// NaN on either side never fits.
    #[inline]
    pub fn fits(&self, other: Size) -> bool {
        self.width >= other.width && self.height >= other.height
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from an origin and a size.
    #[inline]
    #[must_use]
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when `other` lies entirely within `self`, allowing `epsilon`
    /// slack on every edge.
    pub fn contains_rect(&self, other: &Rect, epsilon: f64) -> bool {
        other.x + epsilon >= self.x
            && other.y + epsilon >= self.y
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }
}

impl From<Size> for Rect {
    fn from(size: Size) -> Self {
        Self::from_parts(Point::ZERO, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 5.0, 20.0, 8.0);
        assert_eq!(r.right(), 30.0);
        assert_eq!(r.bottom(), 13.0);
        assert_eq!(r.origin(), Point::new(10.0, 5.0));
        assert_eq!(r.size(), Size::new(20.0, 8.0));
    }

    #[test]
    fn contains_rect_with_tolerance() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains_rect(&Rect::new(2.0, 2.0, 8.0, 8.0), 0.0));
        assert!(!outer.contains_rect(&Rect::new(2.0, 2.0, 8.5, 8.0), 0.0));
        assert!(outer.contains_rect(&Rect::new(2.0, 2.0, 8.0 + 1e-12, 8.0), 1e-9));
    }

    #[test]
    fn size_validity() {
        assert!(Size::new(0.0, 3.0).is_valid());
        assert!(!Size::new(-1.0, 3.0).is_valid());
        assert!(!Size::new(f64::INFINITY, 3.0).is_valid());
        assert!(!Size::new(1.0, f64::NAN).is_valid());
    }

    #[test]
    fn fits_rejects_nan() {
        assert!(Size::new(10.0, 10.0).fits(Size::new(10.0, 9.0)));
        assert!(!Size::new(10.0, 10.0).fits(Size::new(10.5, 9.0)));
        assert!(!Size::new(f64::NAN, 10.0).fits(Size::ZERO));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rect_serializes_as_object() {
        let json = serde_json::to_string(&Rect::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"width":3.0,"height":4.0}"#);
    }
}
