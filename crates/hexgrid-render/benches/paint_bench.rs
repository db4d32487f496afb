//! Benchmarks for painting a viewport and computing selection damage.
//!
//! A full viewport paint happens on every scroll; damage happens on every
//! pointer drag, so it must stay far below the paint cost.
//!
//! Run with: cargo bench -p hexgrid-render --bench paint_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hexgrid_core::geometry::Rect;
use hexgrid_core::range::ByteRange;
use hexgrid_layout::AreaSet;
use hexgrid_render::{
    DefaultColors, DrawSurface, HexGrid, PaintRequest, Painter, Rgba, Viewport,
};
use std::hint::black_box;

/// Surface that only counts calls.
#[derive(Default)]
struct CountingSurface {
    fills: usize,
    texts: usize,
}

impl DrawSurface for CountingSurface {
    fn fill_rect(&mut self, rect: Rect, _color: Rgba) {
        black_box(rect);
        self.fills += 1;
    }

    fn draw_text(&mut self, bounds: Rect, text: &str, _color: Rgba) {
        black_box((bounds, text));
        self.texts += 1;
    }
}

// =============================================================================
// Viewport paint
// =============================================================================

fn bench_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("paint/viewport");
    let source: Vec<u8> = (0..1_048_576u32).map(|i| i as u8).collect();
    let colors = DefaultColors::default();

    for per_row in [16usize, 32] {
        let mut grid = HexGrid::new(source.len() as u64);
        if grid.set_bytes_per_row(per_row).is_err() {
            continue;
        }
        let templates = grid.templates();
        let viewport = Viewport::new(templates.row_height() * 5_000, templates.row_height() * 50);
        let rows = grid.visible_rows(&viewport);
        group.throughput(Throughput::Elements(rows.len() as u64 * per_row as u64));
        let request = PaintRequest::rows(rows)
            .with_selection(ByteRange::new(80_000, 80_500))
            .with_caret(80_100);

        group.bench_with_input(BenchmarkId::new("rows", per_row), &request, |b, request| {
            b.iter(|| {
                let mut surface = CountingSurface::default();
                let stats = Painter::new(&colors).paint(&templates, &source, request, &mut surface);
                black_box((stats, surface.fills, surface.texts))
            })
        });
    }
    group.finish();
}

// =============================================================================
// Selection damage
// =============================================================================

fn bench_damage(c: &mut Criterion) {
    let mut group = c.benchmark_group("paint/damage");
    let grid = HexGrid::new(1 << 40);

    group.bench_function("drag_end", |b| {
        let mut end = 1_000i64;
        b.iter(|| {
            let old = ByteRange::new(500, end);
            end = (end + 7) % 100_000 + 1_000;
            let new = ByteRange::new(500, end);
            black_box(grid.damage_selection(old, new, AreaSet::all()))
        })
    });

    group.bench_function("caret_move", |b| {
        b.iter(|| black_box(grid.damage_caret(black_box(1_234_567), 1_234_583, AreaSet::BYTES)))
    });
    group.finish();
}

criterion_group!(benches, bench_paint, bench_damage);
criterion_main!(benches);
