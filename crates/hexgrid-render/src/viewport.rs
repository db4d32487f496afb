#![forbid(unsafe_code)]

//! Visible row window over the virtualized surface.
//!
//! Only rows intersecting the viewport are sliced and painted; everything
//! else exists purely as arithmetic. The render window may extend past
//! the visible rows by an overscan margin so short scrolls do not expose
//! unpainted rows.

use hexgrid_core::geometry::Rect;
use hexgrid_core::range::RowRange;

/// Default number of extra rows painted above and below the viewport.
pub const DEFAULT_OVERSCAN: i64 = 2;

/// Vertical window onto the grid surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Surface y of the viewport's top edge.
    pub scroll_y: i64,
    /// Viewport height in pixels.
    pub height: i64,
    /// Extra rows kept above and below the visible rows.
    pub overscan: i64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0,
            height: 0,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl Viewport {
    pub fn new(scroll_y: i64, height: i64) -> Self {
        Self {
            scroll_y: scroll_y.max(0),
            height: height.max(0),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_overscan(mut self, overscan: i64) -> Self {
        self.overscan = overscan.max(0);
        self
    }

    /// Viewport as a surface rectangle of the given width.
    pub fn rect(&self, width: i64) -> Rect {
        Rect::new(0, self.scroll_y, width, self.height)
    }

    /// Rows at least partially inside the viewport.
    pub fn visible_rows(&self, row_height: i64, row_count: i64) -> RowRange {
        visible_rows(&self.rect(1), row_height, row_count)
    }

    /// Visible rows widened by the overscan margin.
    pub fn render_rows(&self, row_height: i64, row_count: i64) -> RowRange {
        let visible = self.visible_rows(row_height, row_count);
        if !visible.is_valid() {
            return visible;
        }
        RowRange::new(
            visible.start().saturating_sub(self.overscan).max(0),
            visible
                .end()
                .saturating_add(self.overscan)
                .min(row_count - 1),
        )
    }

    /// Scroll the least distance that brings `row` fully into view.
    pub fn scroll_to_row(&mut self, row: i64, row_height: i64) {
        if row < 0 || row_height <= 0 {
            return;
        }
        let top = row.saturating_mul(row_height);
        let bottom = top.saturating_add(row_height);
        if top < self.scroll_y {
            self.scroll_y = top;
        } else if bottom > self.scroll_y.saturating_add(self.height) {
            self.scroll_y = (bottom - self.height).max(0);
        }
    }
}

/// Rows of height `row_height` intersecting `viewport`, clipped to
/// `[0, row_count)`.
///
/// Invalid when nothing is visible.
pub fn visible_rows(viewport: &Rect, row_height: i64, row_count: i64) -> RowRange {
    if viewport.is_empty() || row_height <= 0 || row_count <= 0 || viewport.bottom() <= 0 {
        return RowRange::INVALID;
    }
    let first = viewport.top().max(0) / row_height;
    if first >= row_count {
        return RowRange::INVALID;
    }
    let last = ((viewport.bottom() - 1) / row_height).min(row_count - 1);
    RowRange::new(first, last)
}
