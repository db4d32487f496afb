#![forbid(unsafe_code)]

//! Immutable row layouts.
//!
//! A [`RowTemplate`] describes where every glyph slot of one row sits. It
//! is independent of the row index: row `r` is the template translated
//! down by `r * row_height`. One template serves every row of its area
//! until the style or font changes.

use hexgrid_core::geometry::{Extent, HorizontalSpan, Rect};

use crate::area::AreaKind;
use crate::element::Element;

/// Precomputed layout for every row of one area.
///
/// # Invariants
///
/// 1. At least one element; exactly one for offset rows.
/// 2. Element `x` strictly increases with the index.
/// 3. Every element lies within `[0, extent.width)` horizontally and
///    spans the full row height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTemplate {
    area: AreaKind,
    elements: Vec<Element>,
    extent: Extent,
    caret_width: i64,
    pad_size: u32,
}

impl RowTemplate {
    pub(crate) fn from_parts(
        area: AreaKind,
        elements: Vec<Element>,
        extent: Extent,
        caret_width: i64,
        pad_size: u32,
    ) -> Self {
        debug_assert!(!elements.is_empty(), "row template needs an element");
        debug_assert!(
            elements.windows(2).all(|w| w[0].x() < w[1].x()),
            "elements must be ordered by x"
        );
        Self {
            area,
            elements,
            extent,
            caret_width: caret_width.max(0),
            pad_size,
        }
    }

    #[inline]
    pub fn area(&self) -> AreaKind {
        self.area
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Element at `index`, or `None` past the end.
    #[inline]
    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Overall row size.
    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    #[inline]
    pub fn row_height(&self) -> i64 {
        self.extent.height
    }

    /// Horizontal bounds of the row, `[0, width)`.
    #[inline]
    pub fn span(&self) -> HorizontalSpan {
        HorizontalSpan::new(0, self.extent.width)
    }

    #[inline]
    pub fn caret_width(&self) -> i64 {
        self.caret_width
    }

    /// Offset digits shown by offset rows; zero for byte rows.
    #[inline]
    pub fn pad_size(&self) -> u32 {
        self.pad_size
    }

    /// Bounds covering elements `first..=last` (order-insensitive).
    ///
    /// Empty if either index is out of range.
    pub fn element_bounds(&self, first: usize, last: usize) -> Rect {
        let (first, last) = (first.min(last), first.max(last));
        match (self.elements.get(first), self.elements.get(last)) {
            (Some(a), Some(b)) => Rect::new(a.x(), 0, b.right() - a.x(), self.extent.height),
            _ => Rect::default(),
        }
    }

    /// Caret slot in front of element `index`.
    ///
    /// `index == element_count()` is the slot after the last element.
    /// Empty beyond that, or when the caret has no width.
    pub fn caret_bounds(&self, index: usize) -> Rect {
        let height = self.extent.height;
        if let Some(element) = self.elements.get(index) {
            Rect::new(
                element.x() - self.caret_width,
                0,
                self.caret_width,
                height,
            )
        } else if index == self.elements.len() {
            let last = self.elements[self.elements.len() - 1];
            Rect::new(last.right(), 0, self.caret_width, height)
        } else {
            Rect::default()
        }
    }

    /// Elements `first..=last` together with the caret slots on both sides.
    pub fn damage_bounds(&self, first: usize, last: usize) -> Rect {
        let (first, last) = (first.min(last), first.max(last));
        self.element_bounds(first, last)
            .union(&self.caret_bounds(first))
            .union(&self.caret_bounds(last + 1))
    }
}
