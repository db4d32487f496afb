#![forbid(unsafe_code)]

//! The owning layer: three areas laid out side by side.
//!
//! [`HexGrid`] holds every input a layout depends on. Each setter
//! validates first and rejects bad input without touching the current
//! layout; on success it rebuilds the affected templates (through the
//! per-area [`TemplateCache`]) and swaps in a new [`GridTemplates`]
//! snapshot. Painters and hit tests read a snapshot, so a paint that
//! started before a change finishes against the layout it started with.
//!
//! Surface coordinates: `x` runs across the areas from the left edge of
//! the offset area, `y` from the top of row 0.

use std::sync::Arc;

use hexgrid_core::coords;
use hexgrid_core::geometry::{Extent, Rect};
use hexgrid_core::range::{ByteRange, RowRange};
use hexgrid_layout::{
    AreaKind, AreaSet, FontMetrics, HitInfo, RowShape, RowStyle, RowTemplate, StyleError,
    TemplateCache, hit_test_surface,
};

use crate::damage::{self, AreaGeometry, DamageRegion};
use crate::viewport::Viewport;

/// Bytes per row when nothing else is configured.
pub const DEFAULT_BYTES_PER_ROW: usize = 16;

#[inline]
const fn slot(kind: AreaKind) -> usize {
    match kind {
        AreaKind::Offset => 0,
        AreaKind::Hex => 1,
        AreaKind::Text => 2,
    }
}

/// A grid-level hit: which area, which row and which byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridHit {
    pub area: AreaKind,
    pub row: i64,
    pub hit: HitInfo,
    /// Byte under the point. In the offset area this is the row start.
    /// On a partially filled last row it may lie past the source end.
    pub byte_offset: i64,
}

impl GridHit {
    /// Caret offset implied by the hit.
    #[inline]
    pub const fn insertion_offset(&self) -> i64 {
        self.byte_offset + (self.hit.insertion_index() - self.hit.index) as i64
    }
}

/// Immutable layout snapshot of all three areas.
#[derive(Debug, Clone)]
pub struct GridTemplates {
    templates: [Arc<RowTemplate>; 3],
    origins: [i64; 3],
    bytes_per_row: i64,
    source_len: u64,
    width: i64,
}

impl GridTemplates {
    #[inline]
    pub fn template(&self, kind: AreaKind) -> &Arc<RowTemplate> {
        &self.templates[slot(kind)]
    }

    /// Left edge of `kind` on the surface.
    #[inline]
    pub fn origin(&self, kind: AreaKind) -> i64 {
        self.origins[slot(kind)]
    }

    pub fn area_geometry(&self, kind: AreaKind) -> AreaGeometry<'_> {
        AreaGeometry::new(self.template(kind), self.origin(kind), self.bytes_per_row)
            .with_source_len(self.source_len)
    }

    /// Surface rectangle of `row` within `kind`.
    pub fn area_row_rect(&self, kind: AreaKind, row: i64) -> Rect {
        self.area_geometry(kind).row_rect(row)
    }

    #[inline]
    pub fn bytes_per_row(&self) -> i64 {
        self.bytes_per_row
    }

    #[inline]
    pub fn source_len(&self) -> u64 {
        self.source_len
    }

    #[inline]
    pub fn row_height(&self) -> i64 {
        self.templates[0].row_height()
    }

    /// Number of rows; an empty source still shows one row.
    #[inline]
    pub fn row_count(&self) -> i64 {
        coords::row_count(self.source_len, self.bytes_per_row)
    }

    /// Size of the whole virtualized surface.
    pub fn extent(&self) -> Extent {
        Extent::new(
            self.width,
            self.row_count().saturating_mul(self.row_height()),
        )
    }

    /// Resolve a surface point to an area, row and byte.
    ///
    /// `None` for points above row 0, below the last row, or outside every
    /// area (including the spacing between areas).
    pub fn hit_test(&self, x: i64, y: i64) -> Option<GridHit> {
        for kind in AreaKind::ALL {
            let origin = self.origin(kind);
            let template = self.template(kind);
            if !template.span().contains(x - origin) {
                continue;
            }
            let surface = hit_test_surface(template, self.bytes_per_row, x - origin, y)?;
            if surface.row >= self.row_count() {
                return None;
            }
            let byte_offset = if kind.is_byte_area() {
                surface.byte_offset
            } else {
                coords::row_index_to_byte_offset(surface.row, self.bytes_per_row)
            };
            return Some(GridHit {
                area: kind,
                row: surface.row,
                hit: surface.hit,
                byte_offset,
            });
        }
        None
    }
}

/// Owner of the grid layout inputs and the current template snapshot.
#[derive(Debug)]
pub struct HexGrid {
    font: FontMetrics,
    styles: [RowStyle; 3],
    bytes_per_row: usize,
    source_len: u64,
    area_spacing: i64,
    caches: [TemplateCache; 3],
    current: Arc<GridTemplates>,
}

impl HexGrid {
    /// A grid with default font, styles and 16 bytes per row.
    pub fn new(source_len: u64) -> Self {
        let font = FontMetrics::default();
        let styles: [RowStyle; 3] = std::array::from_fn(|_| RowStyle::default());
        let mut caches: [TemplateCache; 3] = Default::default();
        let area_spacing = font.advance;
        let current = Arc::new(build_templates(
            &mut caches,
            &styles,
            &font,
            DEFAULT_BYTES_PER_ROW,
            source_len,
            area_spacing,
        ));
        Self {
            font,
            styles,
            bytes_per_row: DEFAULT_BYTES_PER_ROW,
            source_len,
            area_spacing,
            caches,
            current,
        }
    }

    /// A grid from explicit parts, validated together.
    pub fn with_parts(
        font: FontMetrics,
        styles: [RowStyle; 3],
        bytes_per_row: usize,
        area_spacing: i64,
        source_len: u64,
    ) -> Result<Self, Vec<StyleError>> {
        let mut errors = Vec::new();
        collect(&mut errors, font.validate());
        for style in &styles {
            collect(&mut errors, style.validate());
        }
        collect(&mut errors, check_bytes_per_row(bytes_per_row));
        collect(&mut errors, check_area_spacing(area_spacing));
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut caches: [TemplateCache; 3] = Default::default();
        let current = Arc::new(build_templates(
            &mut caches,
            &styles,
            &font,
            bytes_per_row,
            source_len,
            area_spacing,
        ));
        Ok(Self {
            font,
            styles,
            bytes_per_row,
            source_len,
            area_spacing,
            caches,
            current,
        })
    }

    /// Current layout snapshot.
    #[inline]
    pub fn templates(&self) -> Arc<GridTemplates> {
        Arc::clone(&self.current)
    }

    #[inline]
    pub fn font(&self) -> &FontMetrics {
        &self.font
    }

    #[inline]
    pub fn style(&self, kind: AreaKind) -> &RowStyle {
        &self.styles[slot(kind)]
    }

    #[inline]
    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    #[inline]
    pub fn source_len(&self) -> u64 {
        self.source_len
    }

    #[inline]
    pub fn area_spacing(&self) -> i64 {
        self.area_spacing
    }

    pub fn set_font(&mut self, font: FontMetrics) -> Result<(), Vec<StyleError>> {
        reject("font", font.validate())?;
        self.font = font;
        self.rebuild();
        Ok(())
    }

    pub fn set_style(&mut self, kind: AreaKind, style: RowStyle) -> Result<(), Vec<StyleError>> {
        reject(kind.label(), style.validate())?;
        self.styles[slot(kind)] = style;
        self.rebuild();
        Ok(())
    }

    pub fn set_bytes_per_row(&mut self, bytes_per_row: usize) -> Result<(), Vec<StyleError>> {
        reject("bytes_per_row", check_bytes_per_row(bytes_per_row))?;
        self.bytes_per_row = bytes_per_row;
        self.rebuild();
        Ok(())
    }

    pub fn set_area_spacing(&mut self, spacing: i64) -> Result<(), Vec<StyleError>> {
        reject("area_spacing", check_area_spacing(spacing))?;
        self.area_spacing = spacing;
        self.rebuild();
        Ok(())
    }

    /// The source length drives the row count and the offset pad width.
    pub fn set_source_len(&mut self, source_len: u64) {
        self.source_len = source_len;
        self.rebuild();
    }

    pub fn hit_test(&self, x: i64, y: i64) -> Option<GridHit> {
        self.current.hit_test(x, y)
    }

    /// Rows to paint for `viewport`, including its overscan.
    pub fn visible_rows(&self, viewport: &Viewport) -> RowRange {
        viewport.render_rows(self.current.row_height(), self.current.row_count())
    }

    /// Damage for a caret moving from `old` to `new` in each of `areas`.
    pub fn damage_caret(&self, old: i64, new: i64, areas: AreaSet) -> DamageRegion {
        let mut region = DamageRegion::new();
        for kind in areas.kinds() {
            damage::damage_caret(&self.current.area_geometry(kind), old, new, &mut region);
        }
        region
    }

    /// Damage for a selection changing from `old` to `new` in each of `areas`.
    pub fn damage_selection(&self, old: ByteRange, new: ByteRange, areas: AreaSet) -> DamageRegion {
        let mut region = DamageRegion::new();
        for kind in areas.kinds() {
            damage::damage_range_change(&self.current.area_geometry(kind), old, new, &mut region);
        }
        region
    }

    /// Highlights damage exactly like selections.
    pub fn damage_highlight(&self, old: ByteRange, new: ByteRange, areas: AreaSet) -> DamageRegion {
        self.damage_selection(old, new, areas)
    }

    fn rebuild(&mut self) {
        let next = build_templates(
            &mut self.caches,
            &self.styles,
            &self.font,
            self.bytes_per_row,
            self.source_len,
            self.area_spacing,
        );
        #[cfg(feature = "tracing")]
        tracing::debug!(
            bytes_per_row = self.bytes_per_row,
            source_len = self.source_len,
            width = next.width,
            "grid templates swapped"
        );
        self.current = Arc::new(next);
    }
}

fn build_templates(
    caches: &mut [TemplateCache; 3],
    styles: &[RowStyle; 3],
    font: &FontMetrics,
    bytes_per_row: usize,
    source_len: u64,
    area_spacing: i64,
) -> GridTemplates {
    let templates: [Arc<RowTemplate>; 3] = std::array::from_fn(|i| {
        let kind = AreaKind::ALL[i];
        let shape = match kind {
            AreaKind::Offset => RowShape::Offset {
                last_valid_offset: source_len.saturating_sub(1),
            },
            area => RowShape::Bytes {
                area,
                elements_per_row: bytes_per_row,
            },
        };
        caches[i].get_or_build(&styles[i], shape, font)
    });

    let mut origins = [0i64; 3];
    let mut x = 0i64;
    for (i, template) in templates.iter().enumerate() {
        if i > 0 {
            x = x.saturating_add(area_spacing);
        }
        origins[i] = x;
        x = x.saturating_add(template.extent().width);
    }

    GridTemplates {
        templates,
        origins,
        bytes_per_row: bytes_per_row as i64,
        source_len,
        width: x,
    }
}

fn check_bytes_per_row(bytes_per_row: usize) -> Result<(), Vec<StyleError>> {
    if bytes_per_row == 0 {
        Err(vec![StyleError::new("bytes_per_row", "0", "must be >= 1")])
    } else {
        Ok(())
    }
}

fn check_area_spacing(spacing: i64) -> Result<(), Vec<StyleError>> {
    if spacing < 0 {
        Err(vec![StyleError::new(
            "area_spacing",
            spacing.to_string(),
            "must be >= 0",
        )])
    } else {
        Ok(())
    }
}

fn collect(errors: &mut Vec<StyleError>, result: Result<(), Vec<StyleError>>) {
    if let Err(mut more) = result {
        errors.append(&mut more);
    }
}

fn reject(what: &str, result: Result<(), Vec<StyleError>>) -> Result<(), Vec<StyleError>> {
    if let Err(errors) = &result {
        log_rejected(what, errors);
    }
    result
}

#[cfg(feature = "tracing")]
fn log_rejected(what: &str, errors: &[StyleError]) {
    for error in errors {
        tracing::warn!(what, %error, "configuration rejected");
    }
}

#[cfg(not(feature = "tracing"))]
fn log_rejected(_what: &str, _errors: &[StyleError]) {}
