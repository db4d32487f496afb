//! Property-based invariant tests for slicing, damage and grid hit tests.
//!
//! 1. A row never reaches past the source end and never exceeds the row size.
//! 2. Rows partition the source: sizes sum to its length.
//! 3. A range walk yields exactly the in-range bytes.
//! 4. Range damage covers every byte whose selection state changed, and is
//!    empty exactly when nothing changed.
//! 5. Clicking an element's leading half resolves back to its byte.
//! 6. Clipped damage stays inside the viewport.

use hexgrid_core::coords;
use hexgrid_core::geometry::Rect;
use hexgrid_core::range::ByteRange;
use hexgrid_layout::{AreaKind, AreaSet};
use hexgrid_render::{HexGrid, build_row_data, changed_byte_range, walk_rows};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn range_strategy(max: i64) -> impl Strategy<Value = ByteRange> {
    prop_oneof![
        1 => Just(ByteRange::INVALID),
        6 => (0..=max, 0..=max).prop_map(|(a, b)| ByteRange::new(a, b)),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Row slicing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rows_stay_inside_source(len in 0usize..=300, n in 1i64..=40, row in 0i64..=20) {
        let src = vec![0u8; len];
        let data = build_row_data(&src, row, n);
        prop_assert!(data.size() >= 0);
        prop_assert!(data.size() <= n);
        if !data.is_empty() {
            prop_assert!(data.offset() + data.size() - 1 <= len as i64 - 1);
            prop_assert_eq!(data.offset(), row * n);
        }
    }

    #[test]
    fn rows_partition_source(len in 0usize..=300, n in 1i64..=40) {
        let src = vec![0u8; len];
        let rows = coords::row_count(len as u64, n);
        let total: i64 = (0..rows).map(|r| build_row_data(&src, r, n).size()).sum();
        prop_assert_eq!(total, len as i64);
        prop_assert!(build_row_data(&src, rows, n).is_empty());
    }

    #[test]
    fn walk_yields_range_bytes(
        len in 1usize..=300,
        n in 1i64..=40,
        range in range_strategy(320),
    ) {
        let src: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let mut seen = Vec::new();
        for slice in walk_rows(&src, range, n) {
            let start = slice.first_index();
            let end = start + slice.visible_len() as usize;
            for i in start..end {
                seen.push(slice.data.offset() + i as i64);
            }
        }
        let expected: Vec<i64> = if range.is_valid() {
            (range.start()..=range.end().min(len as i64 - 1)).collect()
        } else {
            Vec::new()
        };
        prop_assert_eq!(seen, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Damage covers every change
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn damage_covers_changed_bytes(
        old in range_strategy(200),
        new in range_strategy(200),
        n in 1i64..=32,
    ) {
        let changed = changed_byte_range(old, new, n);
        // Invalid ranges are canonical, so equality covers the both-invalid case.
        prop_assert_eq!(changed.is_none(), old == new);
        if let Some(changed) = changed {
            for b in 0..=200 {
                if old.covers(b) != new.covers(b) {
                    prop_assert!(changed.covers(b), "byte {} not damaged by {:?}", b, changed);
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-6. Grid hit test and damage clipping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn element_click_round_trips(
        len in 1u64..=10_000,
        per_row in 1usize..=32,
        pick in any::<prop::sample::Index>(),
        text_area in any::<bool>(),
    ) {
        let mut grid = HexGrid::new(len);
        grid.set_bytes_per_row(per_row).unwrap();
        let t = grid.templates();
        let offset = pick.index(len as usize) as i64;
        let kind = if text_area { AreaKind::Text } else { AreaKind::Hex };
        let n = per_row as i64;
        let row = offset / n;
        let element = t.template(kind).elements()[(offset % n) as usize];
        let x = t.origin(kind) + element.x();
        let y = row * t.row_height();

        let hit = grid.hit_test(x, y).unwrap();
        prop_assert_eq!(hit.area, kind);
        prop_assert_eq!(hit.row, row);
        prop_assert_eq!(hit.byte_offset, offset);
        prop_assert!(hit.hit.is_leading_edge && hit.hit.was_inside);
    }

    #[test]
    fn clipped_damage_inside_viewport(
        old in range_strategy(2_000),
        new in range_strategy(2_000),
        scroll in 0i64..=1_000,
        height in 1i64..=400,
    ) {
        let grid = HexGrid::new(2_001);
        let region = grid.damage_selection(old, new, AreaSet::all());
        let viewport = Rect::new(0, scroll, grid.templates().extent().width, height);
        for rect in region.clip(&viewport).iter() {
            prop_assert!(!rect.is_empty());
            prop_assert!(rect.y >= viewport.y && rect.bottom() <= viewport.bottom());
            prop_assert!(rect.x >= viewport.x && rect.right() <= viewport.right());
        }
    }
}
