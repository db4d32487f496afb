#![forbid(unsafe_code)]

//! Redraw regions for caret, selection and highlight changes.
//!
//! Damage is row-granular for byte ranges: every touched row of an area
//! is invalidated across the full area width. Caret damage is exact and
//! covers only the caret slot.
//!
//! # Range changes
//!
//! Given an old and a new inclusive range:
//!
//! | Change | Damaged bytes |
//! |---|---|
//! | none | nothing |
//! | end only | `[min(ends), max(ends)]`, plus the byte after the new end if it wraps to a new row |
//! | start only | `[min(starts), max(starts)]`, plus the previous byte if it sits on an earlier row |
//! | both | `[min(starts), max(ends)]` |
//!
//! An invalid range on one side damages the other side in full. Nothing
//! here fails; out-of-range input produces no rectangles.

use hexgrid_core::coords;
use hexgrid_core::geometry::Rect;
use hexgrid_core::range::ByteRange;
use hexgrid_layout::RowTemplate;
use smallvec::SmallVec;

/// A set of rectangles to repaint.
///
/// Empty rectangles are dropped on insertion, rectangles already covered
/// are skipped and a rectangle directly below the previous one with the
/// same horizontal span extends it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamageRegion {
    rects: SmallVec<[Rect; 4]>,
}

impl DamageRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        if self.rects.iter().any(|r| covers(r, &rect)) {
            return;
        }
        if let Some(last) = self.rects.last_mut() {
            if last.x == rect.x && last.width == rect.width {
                if last.bottom() == rect.y {
                    last.height = last.height.saturating_add(rect.height);
                    return;
                }
                if rect.bottom() == last.y {
                    last.y = rect.y;
                    last.height = last.height.saturating_add(rect.height);
                    return;
                }
            }
        }
        self.rects.push(rect);
    }

    #[inline]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Rect> {
        self.rects.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Smallest rectangle containing every damaged rectangle.
    pub fn bounding(&self) -> Rect {
        self.rects
            .iter()
            .fold(Rect::default(), |acc, r| acc.union(r))
    }

    /// Restrict the region to `viewport`, dropping what falls outside.
    #[must_use]
    pub fn clip(&self, viewport: &Rect) -> DamageRegion {
        let mut out = DamageRegion::new();
        for rect in &self.rects {
            if let Some(clipped) = rect.intersection_opt(viewport) {
                out.push(clipped);
            }
        }
        out
    }
}

impl Extend<Rect> for DamageRegion {
    fn extend<I: IntoIterator<Item = Rect>>(&mut self, iter: I) {
        for rect in iter {
            self.push(rect);
        }
    }
}

impl<'a> IntoIterator for &'a DamageRegion {
    type Item = &'a Rect;
    type IntoIter = std::slice::Iter<'a, Rect>;

    fn into_iter(self) -> Self::IntoIter {
        self.rects.iter()
    }
}

fn covers(outer: &Rect, inner: &Rect) -> bool {
    outer.x <= inner.x
        && outer.y <= inner.y
        && outer.right() >= inner.right()
        && outer.bottom() >= inner.bottom()
}

/// Placement of one area on the grid surface.
#[derive(Debug, Clone, Copy)]
pub struct AreaGeometry<'a> {
    template: &'a RowTemplate,
    origin_x: i64,
    elements_per_row: i64,
    source_len: Option<i64>,
}

impl<'a> AreaGeometry<'a> {
    /// `elements_per_row` is the number of bytes per row of the grid,
    /// also for the offset area.
    pub fn new(template: &'a RowTemplate, origin_x: i64, elements_per_row: i64) -> Self {
        Self {
            template,
            origin_x,
            elements_per_row,
            source_len: None,
        }
    }

    /// Bound caret placement by a source of `len` bytes.
    #[must_use]
    pub fn with_source_len(mut self, len: u64) -> Self {
        self.source_len = Some(len.min(i64::MAX as u64) as i64);
        self
    }

    #[inline]
    pub fn template(&self) -> &'a RowTemplate {
        self.template
    }

    #[inline]
    pub fn origin_x(&self) -> i64 {
        self.origin_x
    }

    #[inline]
    pub fn elements_per_row(&self) -> i64 {
        self.elements_per_row
    }

    /// Surface rectangle of row `row` across the whole area.
    pub fn row_rect(&self, row: i64) -> Rect {
        self.rows_rect(row, row)
    }

    /// Surface rectangle of rows `first..=last`.
    pub fn rows_rect(&self, first: i64, last: i64) -> Rect {
        if first < 0 || last < first {
            return Rect::default();
        }
        let row_height = self.template.row_height();
        let rows = (last - first).saturating_add(1);
        Rect::new(
            self.origin_x,
            first.saturating_mul(row_height),
            self.template.extent().width,
            rows.saturating_mul(row_height),
        )
    }

    /// Rows touched by the inclusive byte span `[lo, hi]`.
    pub fn byte_rows_rect(&self, lo: i64, hi: i64) -> Rect {
        let first = coords::byte_offset_to_row_index(lo.min(hi), self.elements_per_row);
        let last = coords::byte_offset_to_row_index(lo.max(hi), self.elements_per_row);
        if first == coords::INVALID || last == coords::INVALID {
            return Rect::default();
        }
        self.rows_rect(first, last)
    }

    /// Row and slot index of the caret in front of the byte at `offset`.
    ///
    /// With a source length set, a caret at `offset == len` on a row
    /// boundary sits in the trailing slot of the last row, and offsets past
    /// the end have no slot.
    pub fn caret_slot(&self, offset: i64) -> Option<(i64, usize)> {
        let n = self.elements_per_row;
        let row = coords::byte_offset_to_row_index(offset, n);
        let index = coords::byte_offset_to_index_in_row(offset, n);
        if row == coords::INVALID || index == coords::INVALID {
            return None;
        }
        if let Some(len) = self.source_len {
            if offset > len {
                return None;
            }
            if offset == len && offset > 0 && index == 0 {
                return Some((row - 1, n as usize));
            }
        }
        Some((row, index as usize))
    }

    /// Surface rectangle of the caret slot for `offset`.
    pub fn caret_rect(&self, offset: i64) -> Rect {
        let Some((row, index)) = self.caret_slot(offset) else {
            return Rect::default();
        };
        let slot = self.template.caret_bounds(index);
        if slot.is_empty() {
            return slot;
        }
        slot.offset(
            self.origin_x,
            row.saturating_mul(self.template.row_height()),
        )
    }
}

/// Bytes whose drawing differs between `old` and `new`, or `None`.
pub fn changed_byte_range(old: ByteRange, new: ByteRange, elements_per_row: i64) -> Option<ByteRange> {
    match (old.is_valid(), new.is_valid()) {
        (false, false) => None,
        (true, false) => Some(old),
        (false, true) => Some(new),
        (true, true) if old == new => None,
        (true, true) if old.start() == new.start() => {
            let lo = old.end().min(new.end());
            let mut hi = old.end().max(new.end());
            let row = |offset| coords::byte_offset_to_row_index(offset, elements_per_row);
            let after = new.end().saturating_add(1);
            if row(new.end()) != row(after) {
                hi = hi.max(after);
            }
            Some(ByteRange::new(lo, hi))
        }
        (true, true) if old.end() == new.end() => {
            let mut lo = old.start().min(new.start());
            let hi = old.start().max(new.start());
            let row = |offset| coords::byte_offset_to_row_index(offset, elements_per_row);
            if lo > 0 && row(lo) != row(lo - 1) {
                lo -= 1;
            }
            Some(ByteRange::new(lo, hi))
        }
        (true, true) => Some(ByteRange::new(
            old.start().min(new.start()),
            old.end().max(new.end()),
        )),
    }
}

/// Add the rows covered by `range` to `region`.
pub fn damage_byte_range(area: &AreaGeometry<'_>, range: ByteRange, region: &mut DamageRegion) {
    if range.is_valid() {
        region.push(area.byte_rows_rect(range.start(), range.end()));
    }
}

/// Add the damage of a range moving from `old` to `new`.
pub fn damage_range_change(
    area: &AreaGeometry<'_>,
    old: ByteRange,
    new: ByteRange,
    region: &mut DamageRegion,
) {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "damage_range_change",
        area = %area.template().area(),
        old = ?old,
        new = ?new
    )
    .entered();

    if let Some(changed) = changed_byte_range(old, new, area.elements_per_row()) {
        damage_byte_range(area, changed, region);
        #[cfg(feature = "tracing")]
        tracing::trace!(changed = ?changed, rects = region.len(), "range damage");
    }
}

/// Add the caret slots at `old` and `new` (once when equal).
pub fn damage_caret(area: &AreaGeometry<'_>, old: i64, new: i64, region: &mut DamageRegion) {
    region.push(area.caret_rect(old));
    if new != old {
        region.push(area.caret_rect(new));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexgrid_layout::factory::build_byte_row;
    use hexgrid_layout::{AreaKind, FontMetrics, Magnitude, RowStyle};

    const N: i64 = 16;

    fn template(caret: i64) -> RowTemplate {
        let style = RowStyle::compact().caret_width(Magnitude::Fixed(caret));
        build_byte_row(&style, AreaKind::Hex, N as usize, &FontMetrics::new(8, 10, 2, 0))
    }

    #[test]
    fn region_drops_empty_and_covered() {
        let mut region = DamageRegion::new();
        region.push(Rect::default());
        assert!(region.is_empty());
        region.push(Rect::new(0, 0, 10, 10));
        region.push(Rect::new(2, 2, 3, 3));
        assert_eq!(region.len(), 1);
    }

    #[test]
    fn region_coalesces_vertical_neighbours() {
        let mut region = DamageRegion::new();
        region.push(Rect::new(5, 12, 40, 12));
        region.push(Rect::new(5, 24, 40, 12));
        region.push(Rect::new(5, 0, 40, 12));
        assert_eq!(region.rects(), &[Rect::new(5, 0, 40, 36)]);

        region.push(Rect::new(60, 0, 10, 12));
        assert_eq!(region.len(), 2);
        assert_eq!(region.bounding(), Rect::new(5, 0, 65, 36));
    }

    #[test]
    fn region_clip() {
        let mut region = DamageRegion::new();
        region.extend([Rect::new(0, 0, 10, 10), Rect::new(0, 50, 10, 10)]);
        let clipped = region.clip(&Rect::new(0, 5, 100, 20));
        assert_eq!(clipped.rects(), &[Rect::new(0, 5, 10, 5)]);
        assert_eq!((&clipped).into_iter().count(), 1);
        region.clear();
        assert!(region.bounding().is_empty());
    }

    #[test]
    fn unchanged_range_has_no_damage() {
        let r = ByteRange::new(10, 10);
        assert_eq!(changed_byte_range(r, r, N), None);

        let t = template(2);
        let area = AreaGeometry::new(&t, 0, N);
        let mut region = DamageRegion::new();
        damage_range_change(&area, r, r, &mut region);
        assert!(region.is_empty());
    }

    #[test]
    fn end_moved_within_row_damages_that_row_only() {
        let old = ByteRange::new(10, 20);
        let new = ByteRange::new(10, 25);
        assert_eq!(changed_byte_range(old, new, N), Some(ByteRange::new(20, 25)));

        let t = template(2);
        let area = AreaGeometry::new(&t, 100, N);
        let mut region = DamageRegion::new();
        damage_range_change(&area, old, new, &mut region);
        let rh = t.row_height();
        assert_eq!(region.rects(), &[Rect::new(100, rh, t.extent().width, rh)]);
    }

    #[test]
    fn end_on_row_boundary_widens_forward() {
        let changed = changed_byte_range(ByteRange::new(10, 20), ByteRange::new(10, 31), N);
        assert_eq!(changed, Some(ByteRange::new(20, 32)));
    }

    #[test]
    fn end_shrinking_from_row_boundary_stays_in_range() {
        let changed = changed_byte_range(ByteRange::new(10, 31), ByteRange::new(10, 20), N);
        assert_eq!(changed, Some(ByteRange::new(20, 31)));
        let to_boundary = changed_byte_range(ByteRange::new(10, 40), ByteRange::new(10, 15), N);
        assert_eq!(to_boundary, Some(ByteRange::new(15, 40)));
    }

    #[test]
    fn start_on_row_boundary_widens_backward() {
        let changed = changed_byte_range(ByteRange::new(16, 40), ByteRange::new(18, 40), N);
        assert_eq!(changed, Some(ByteRange::new(15, 18)));
        let inner = changed_byte_range(ByteRange::new(5, 40), ByteRange::new(8, 40), N);
        assert_eq!(inner, Some(ByteRange::new(5, 8)));
        let at_zero = changed_byte_range(ByteRange::new(0, 40), ByteRange::new(3, 40), N);
        assert_eq!(at_zero, Some(ByteRange::new(0, 3)));
    }

    #[test]
    fn both_moved_covers_hull() {
        let changed = changed_byte_range(ByteRange::new(0, 5), ByteRange::new(30, 40), N);
        assert_eq!(changed, Some(ByteRange::new(0, 40)));
    }

    #[test]
    fn invalid_side_damages_the_other() {
        let r = ByteRange::new(3, 7);
        assert_eq!(changed_byte_range(ByteRange::INVALID, r, N), Some(r));
        assert_eq!(changed_byte_range(r, ByteRange::INVALID, N), Some(r));
        assert_eq!(changed_byte_range(ByteRange::INVALID, ByteRange::INVALID, N), None);
    }

    #[test]
    fn multi_row_damage_is_one_rect() {
        let t = template(0);
        let area = AreaGeometry::new(&t, 0, N);
        let mut region = DamageRegion::new();
        damage_byte_range(&area, ByteRange::new(5, 40), &mut region);
        let rh = t.row_height();
        assert_eq!(region.rects(), &[Rect::new(0, 0, t.extent().width, 3 * rh)]);
    }

    #[test]
    fn caret_damage() {
        let t = template(2);
        let area = AreaGeometry::new(&t, 50, N);
        let rh = t.row_height();

        let mut region = DamageRegion::new();
        damage_caret(&area, 17, 17, &mut region);
        let slot = t.caret_bounds(1);
        assert_eq!(region.rects(), &[slot.offset(50, rh)]);

        let mut region = DamageRegion::new();
        damage_caret(&area, 0, 33, &mut region);
        assert_eq!(region.len(), 2);
        assert_eq!(region.rects()[1], t.caret_bounds(1).offset(50, 2 * rh));

        let mut region = DamageRegion::new();
        damage_caret(&area, -1, -1, &mut region);
        assert!(region.is_empty());
    }

    #[test]
    fn caret_after_last_byte_uses_trailing_slot() {
        let t = template(2);
        let area = AreaGeometry::new(&t, 50, N).with_source_len(32);
        let rh = t.row_height();

        assert_eq!(area.caret_slot(32), Some((1, N as usize)));
        let trailing = t.caret_bounds(N as usize);
        assert!(!trailing.is_empty());
        assert_eq!(area.caret_rect(32), trailing.offset(50, rh));

        let mut region = DamageRegion::new();
        damage_caret(&area, 31, 32, &mut region);
        assert_eq!(region.len(), 2);
        assert!(region.iter().all(|r| r.y == rh && r.bottom() <= 2 * rh));

        // Mid-row end of source and offsets past it.
        let partial = AreaGeometry::new(&t, 0, N).with_source_len(20);
        assert_eq!(partial.caret_slot(20), Some((1, 4)));
        assert_eq!(partial.caret_slot(21), None);
        assert!(partial.caret_rect(21).is_empty());

        // Without a length the offset maps straight to its row.
        assert_eq!(AreaGeometry::new(&t, 0, N).caret_slot(32), Some((2, 0)));
        // An empty source keeps its caret at the start of row 0.
        let empty = AreaGeometry::new(&t, 0, N).with_source_len(0);
        assert_eq!(empty.caret_slot(0), Some((0, 0)));
    }

    #[test]
    fn zero_width_caret_has_no_damage() {
        let t = template(0);
        let area = AreaGeometry::new(&t, 0, N);
        let mut region = DamageRegion::new();
        damage_caret(&area, 3, 9, &mut region);
        assert!(region.is_empty());
    }

    #[test]
    fn negative_rows_produce_nothing() {
        let t = template(2);
        let area = AreaGeometry::new(&t, 0, N);
        assert!(area.row_rect(-1).is_empty());
        assert!(area.rows_rect(3, 2).is_empty());
        assert!(AreaGeometry::new(&t, 0, 0).byte_rows_rect(0, 4).is_empty());
    }
}
