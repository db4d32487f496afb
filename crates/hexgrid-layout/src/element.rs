#![forbid(unsafe_code)]

//! Placed glyph slots.

use hexgrid_core::geometry::{Extent, HorizontalSpan, Position, Rect};

/// One glyph slot of a row: a formatted byte or a formatted offset.
///
/// Positions are row-relative; the row's vertical translation is applied by
/// whoever places the row on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Element {
    position: Position,
    extent: Extent,
}

impl Element {
    /// Create an element. [`Extent`] already guarantees non-negative sizes.
    #[inline]
    pub const fn new(position: Position, extent: Extent) -> Self {
        Self { position, extent }
    }

    #[inline]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub const fn extent(&self) -> Extent {
        self.extent
    }

    #[inline]
    pub const fn x(&self) -> i64 {
        self.position.x
    }

    #[inline]
    pub const fn y(&self) -> i64 {
        self.position.y
    }

    #[inline]
    pub const fn width(&self) -> i64 {
        self.extent.width
    }

    #[inline]
    pub const fn height(&self) -> i64 {
        self.extent.height
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.position.x.saturating_add(self.extent.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.position.y.saturating_add(self.extent.height)
    }

    /// Boundary between the leading and trailing halves.
    #[inline]
    pub const fn midpoint_x(&self) -> i64 {
        self.right() - self.extent.width / 2
    }

    #[inline]
    pub const fn contains_x(&self, x: i64) -> bool {
        x >= self.position.x && x < self.right()
    }

    #[inline]
    pub const fn contains(&self, x: i64, y: i64) -> bool {
        self.contains_x(x) && y >= self.position.y && y < self.bottom()
    }

    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_parts(self.position, self.extent)
    }

    #[inline]
    pub const fn span(&self) -> HorizontalSpan {
        HorizontalSpan::new(self.position.x, self.extent.width)
    }
}
