#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are in pixels on the virtualized surface (origin at the
//! top-left of row 0). Coordinates are `i64` so that `row * row_height`
//! stays representable for rows derived from 63-bit byte offsets; edge
//! arithmetic saturates instead of wrapping.

/// A 2D size. Both dimensions are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    pub width: i64,
    pub height: i64,
}

impl Extent {
    /// Zero extent.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a new extent. Negative dimensions are raised to zero.
    #[inline]
    pub const fn new(width: i64, height: i64) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Check if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    /// The origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`, saturating at the `i64` bounds.
    #[inline]
    pub const fn offset(&self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// An axis-aligned rectangle for element bounds, damage and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i64,
    /// Top edge (inclusive).
    pub y: i64,
    /// Width in pixels.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
}

impl Rect {
    /// Create a new rectangle. Negative dimensions are raised to zero.
    #[inline]
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Create a rectangle from a position and an extent.
    #[inline]
    pub const fn from_parts(position: Position, extent: Extent) -> Self {
        Self::new(position.x, position.y, extent.width, extent.height)
    }

    /// Create a rectangle at the origin with the given extent.
    #[inline]
    pub const fn from_extent(extent: Extent) -> Self {
        Self::new(0, 0, extent.width, extent.height)
    }

    #[inline]
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    #[inline]
    pub const fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// Left edge (inclusive). Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> i64 {
        self.x
    }

    /// Top edge (inclusive). Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> i64 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Horizontal extent of this rectangle.
    #[inline]
    pub const fn horizontal_span(&self) -> HorizontalSpan {
        HorizontalSpan::new(self.x, self.width)
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    pub const fn offset(&self, dx: i64, dy: i64) -> Rect {
        Rect {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            width: self.width,
            height: self.height,
        }
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// The smallest rectangle that contains both.
    ///
    /// Empty operands do not contribute, so `empty.union(r) == r`.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }
}

/// A 1D interval `[x, x + width)` on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HorizontalSpan {
    pub x: i64,
    pub width: i64,
}

impl HorizontalSpan {
    #[inline]
    pub const fn new(x: i64, width: i64) -> Self {
        Self {
            x,
            width: if width < 0 { 0 } else { width },
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0
    }

    #[inline]
    pub const fn contains(&self, x: i64) -> bool {
        x >= self.x && x < self.right()
    }

    /// Covering hull of two spans.
    pub fn union(&self, other: &HorizontalSpan) -> HorizontalSpan {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let right = self.right().max(other.right());
        HorizontalSpan::new(x, right.saturating_sub(x))
    }

    /// Lift this span to a rectangle covering `[y, y + height)`.
    #[inline]
    pub const fn to_rect(&self, y: i64, height: i64) -> Rect {
        Rect::new(self.x, y, self.width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::{Extent, HorizontalSpan, Position, Rect};

    #[test]
    fn rect_straddling_origin_contains() {
        let rect = Rect::new(-3, -2, 6, 4);
        assert!(rect.contains(-3, -2));
        assert!(rect.contains(0, 0));
        assert!(rect.contains(2, 1));
        assert!(!rect.contains(3, 0));
        assert!(!rect.contains(0, 2));
        assert!(!rect.contains(-4, -1));
    }

    #[test]
    fn rect_contains_negative_origin() {
        let rect = Rect::new(-10, -4, 5, 5);
        assert!(rect.contains(-10, -4));
        assert!(rect.contains(-6, 0));
        assert!(!rect.contains(-5, 0));
    }

    #[test]
    fn rect_intersection_in_negative_quadrant() {
        let a = Rect::new(-8, -8, 10, 10);
        let b = Rect::new(-2, -5, 6, 3);
        assert_eq!(a.intersection(&b), Rect::new(-2, -5, 4, 3));
        assert_eq!(b.intersection(&a), Rect::new(-2, -5, 4, 3));
    }

    #[test]
    fn rect_intersection_disjoint_negative_is_none() {
        let a = Rect::new(-10, -10, 3, 3);
        let b = Rect::new(-6, -10, 3, 3);
        assert_eq!(a.intersection_opt(&b), None);
        assert_eq!(a.intersection(&b), Rect::default());
    }

    #[test]
    fn rect_intersection_at_saturated_edge() {
        let a = Rect::new(i64::MAX - 10, 0, 100, 5);
        let b = Rect::new(i64::MAX - 4, 2, 50, 50);
        assert_eq!(a.intersection(&b), Rect::new(i64::MAX - 4, 2, 4, 3));
    }

    #[test]
    fn rect_intersection_adjacent_no_overlap() {
        let a = Rect::new(-5, 0, 5, 5);
        let b = Rect::new(0, 0, 5, 5);
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn rect_union_spans_both_signs() {
        let a = Rect::new(-20, -1, 5, 2);
        let b = Rect::new(4, -30, 6, 10);
        assert_eq!(a.union(&b), Rect::new(-20, -30, 30, 31));
    }

    #[test]
    fn rect_union_width_saturates() {
        let a = Rect::new(i64::MIN, 0, 1, 1);
        let b = Rect::new(i64::MAX - 1, 0, 1, 1);
        assert_eq!(a.union(&b), Rect::new(i64::MIN, 0, i64::MAX, 1));
    }

    #[test]
    fn rect_union_ignores_empty() {
        let a = Rect::new(10, 10, 5, 5);
        assert_eq!(Rect::default().union(&a), a);
        assert_eq!(a.union(&Rect::new(0, 0, 0, 9)), a);
    }

    #[test]
    fn rect_right_bottom_saturating() {
        let r = Rect::new(i64::MAX - 5, i64::MAX - 3, 100, 100);
        assert_eq!(r.right(), i64::MAX);
        assert_eq!(r.bottom(), i64::MAX);
    }

    #[test]
    fn negative_dimensions_clamp_to_zero() {
        assert_eq!(Rect::new(1, 2, -3, -4), Rect::new(1, 2, 0, 0));
        assert_eq!(Extent::new(-1, 7), Extent::new(0, 7));
        assert!(Extent::new(-1, 7).is_empty());
        assert_eq!(HorizontalSpan::new(3, -1).width, 0);
    }

    #[test]
    fn rect_parts_round_trip() {
        let r = Rect::from_parts(Position::new(3, 4), Extent::new(5, 6));
        assert_eq!(r.position(), Position::new(3, 4));
        assert_eq!(r.extent(), Extent::new(5, 6));
        assert_eq!(Rect::from_extent(Extent::new(5, 6)), Rect::new(0, 0, 5, 6));
    }

    #[test]
    fn rect_offset_translates() {
        let r = Rect::new(1, 1, 2, 2).offset(10, -1);
        assert_eq!(r, Rect::new(11, 0, 2, 2));
        assert_eq!(Position::new(1, 2).offset(3, 4), Position::new(4, 6));
    }

    #[test]
    fn span_contains_and_union() {
        let a = HorizontalSpan::new(4, 4);
        assert!(a.contains(4));
        assert!(a.contains(7));
        assert!(!a.contains(8));
        let b = HorizontalSpan::new(10, 2);
        assert_eq!(a.union(&b), HorizontalSpan::new(4, 8));
        assert_eq!(a.to_rect(20, 3), Rect::new(4, 20, 4, 3));
        assert_eq!(Rect::new(4, 0, 4, 1).horizontal_span(), a);
    }
}
