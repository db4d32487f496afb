//! End-to-end flows through the facade: configure, paint, click, drag,
//! repaint the damage.

use hexgrid::prelude::*;
use hexgrid::{CellContext, CellFlags, GridHit, Rgba};

#[derive(Default)]
struct Recording {
    fills: Vec<(Rect, Rgba)>,
    texts: Vec<(Rect, String)>,
}

impl DrawSurface for Recording {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.fills.push((rect, color));
    }

    fn draw_text(&mut self, bounds: Rect, text: &str, _color: Rgba) {
        self.texts.push((bounds, text.to_string()));
    }
}

/// Marks selected cells red and leaves everything else unfilled.
struct SelectionOnly;

const RED: Rgba = Rgba::rgb(255, 0, 0);

impl ColorProvider for SelectionOnly {
    fn color_for(&self, _cell: &CellContext) -> Rgba {
        Rgba::BLACK
    }

    fn cell_background(&self, cell: &CellContext) -> Option<Rgba> {
        cell.flags.contains(CellFlags::SELECTED).then_some(RED)
    }
}

fn click(grid: &HexGrid, area: AreaKind, offset: i64) -> GridHit {
    let t = grid.templates();
    let n = t.bytes_per_row();
    let element = t.template(area).elements()[(offset % n) as usize];
    let x = t.origin(area) + element.x();
    let y = (offset / n) * t.row_height();
    grid.hit_test(x, y).expect("click inside the grid")
}

#[test]
fn drag_selection_repaints_only_damaged_rows() {
    let source: Vec<u8> = (0..4_096u32).map(|i| (i % 251) as u8).collect();
    let grid = hexgrid::grid(&GridConfig::default(), source.len() as u64).unwrap();
    let t = grid.templates();

    let anchor = click(&grid, AreaKind::Hex, 40).byte_offset;
    let first = ByteRange::new(anchor, click(&grid, AreaKind::Hex, 45).byte_offset);
    let second = ByteRange::new(anchor, click(&grid, AreaKind::Text, 90).byte_offset);
    assert_eq!(first, ByteRange::new(40, 45));
    assert_eq!(second, ByteRange::new(40, 90));

    // Rows 2..=5 changed (bytes 45..=90, no wrap at 90).
    let damage = grid.damage_selection(first, second, AreaSet::BYTES);
    let rh = t.row_height();
    assert_eq!(damage.len(), 2);
    for rect in damage.iter() {
        assert_eq!(rect.y, 2 * rh);
        assert_eq!(rect.height, 4 * rh);
    }

    // Repaint the damaged rows; only bytes 40..=90 are filled.
    let bounds = damage.bounding();
    let rows = RowRange::new(bounds.top() / rh, (bounds.bottom() - 1) / rh);
    let mut surface = Recording::default();
    let request = PaintRequest::rows(rows)
        .with_areas(AreaSet::BYTES)
        .with_selection(second);
    let stats = Painter::new(&SelectionOnly).paint(&t, &source, &request, &mut surface);
    assert_eq!(stats.rows, 4);
    assert_eq!(stats.cells, 4 * 16 * 2);
    assert_eq!(surface.fills.len(), 2 * (90 - 40 + 1));
    assert!(surface.fills.iter().all(|(_, color)| *color == RED));
}

#[test]
fn viewport_paint_skips_rows_past_the_end() {
    let source = vec![b'x'; 100];
    let grid = HexGrid::new(source.len() as u64);
    let t = grid.templates();
    let viewport = Viewport::new(0, t.row_height() * 20).with_overscan(3);
    let rows = grid.visible_rows(&viewport);
    assert_eq!(rows, RowRange::new(0, 6));

    let mut surface = Recording::default();
    let stats = Painter::new(&hexgrid::DefaultColors::default()).paint(
        &t,
        &source,
        &PaintRequest::rows(rows),
        &mut surface,
    );
    assert_eq!(stats.rows, 7);
    assert_eq!(stats.cells, 2 * 100);
    let last_row_text: Vec<_> = surface
        .texts
        .iter()
        .filter(|(rect, _)| rect.y == 6 * t.row_height())
        .map(|(_, text)| text.as_str())
        .collect();
    // Offset cell plus four hex and four text cells.
    assert_eq!(last_row_text.len(), 9);
    assert_eq!(last_row_text[0], "00000060");
    assert_eq!(last_row_text[1], "78");
    assert_eq!(last_row_text[8], "x");
}

#[test]
fn restyle_keeps_hit_test_consistent() {
    let mut grid = HexGrid::new(1 << 20);
    let before = click(&grid, AreaKind::Hex, 1_000);
    grid.set_style(
        AreaKind::Hex,
        RowStyle::default()
            .bytes_per_group(4)
            .space_between_groups(Magnitude::relative(1.0)),
    )
    .unwrap();
    grid.set_font(FontMetrics::new(10, 16, 4, 2)).unwrap();
    let after = click(&grid, AreaKind::Hex, 1_000);
    assert_eq!(before.byte_offset, after.byte_offset);
    assert_eq!(before.row, after.row);

    let err = grid
        .set_style(AreaKind::Text, RowStyle::default().bytes_per_group(0))
        .map_err(Error::from)
        .unwrap_err();
    assert!(err.to_string().contains("bytes_per_group=0"));
}

#[test]
fn append_caret_after_full_last_row() {
    let source: Vec<u8> = (0..32).collect();
    let grid = HexGrid::new(source.len() as u64);
    let t = grid.templates();
    let hex = t.template(AreaKind::Hex);
    let last = hex.elements()[hex.element_count() - 1];

    // Trailing half of byte 31 inserts after the final byte.
    let x = t.origin(AreaKind::Hex) + last.right() - 1;
    let hit = grid.hit_test(x, t.row_height()).expect("inside the last row");
    assert!(!hit.hit.is_leading_edge);
    let caret = hit.insertion_offset();
    assert_eq!(caret, 32);

    let damage = grid.damage_caret(31, caret, AreaSet::HEX);
    assert_eq!(damage.len(), 2);
    let surface_height = t.extent().height;
    assert!(damage.iter().all(|r| r.y == t.row_height() && r.bottom() <= surface_height));

    let mut surface = Recording::default();
    let request = PaintRequest::rows(RowRange::single(1))
        .with_areas(AreaSet::HEX)
        .with_caret(caret);
    Painter::new(&SelectionOnly).paint(&t, &source, &request, &mut surface);
    let (rect, color) = surface.fills.last().copied().expect("caret drawn");
    assert_eq!(color, Rgba::BLACK);
    assert_eq!(Some(&rect), damage.rects().last());
}
