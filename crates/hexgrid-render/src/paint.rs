#![forbid(unsafe_code)]

//! Row painting through collaborator traits.
//!
//! The grid does not draw pixels itself. A [`Painter`] walks the rows of a
//! [`PaintRequest`], slices their bytes, asks a [`ValueFormatter`] for each
//! cell's text and a [`ColorProvider`] for its colors, and issues
//! `fill_rect` / `draw_text` calls on a [`DrawSurface`]. Formatters and
//! color providers are borrowed trait objects so callers can swap them per
//! paint without touching the grid.
//!
//! Paint order per row: row backgrounds, then per cell background and
//! text. The caret slot is filled after every row.

use std::borrow::Cow;

use hexgrid_core::coords;
use hexgrid_core::geometry::Rect;
use hexgrid_core::range::{ByteRange, RowRange};
use hexgrid_layout::{AreaKind, AreaSet};

use crate::grid::GridTemplates;
use crate::row_data::{RowData, build_row_data, walk_rows};
use crate::source::ByteSource;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Text for one byte cell.
pub trait ValueFormatter {
    fn format(&self, value: u8) -> Cow<'static, str>;
}

/// Text for the offset cell of a row, `pad_size` digits wide.
pub trait OffsetFormatter {
    fn format(&self, offset: u64, pad_size: u32) -> String;
}

bitflags::bitflags! {
    /// Per-cell paint state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        const SELECTED    = 0b001;
        const HIGHLIGHTED = 0b010;
        /// The caret sits in front of this cell.
        const CARET       = 0b100;
    }
}

/// What a color provider knows about the cell being painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellContext {
    pub area: AreaKind,
    pub row: i64,
    /// Byte offset of the cell; the row start for offset cells.
    pub offset: i64,
    /// Byte value, `None` for offset cells.
    pub value: Option<u8>,
    pub flags: CellFlags,
}

/// Color policy supplied by the embedding application.
pub trait ColorProvider {
    /// Text color of a cell.
    fn color_for(&self, cell: &CellContext) -> Rgba;

    /// Background of a whole area row, `None` to leave it untouched.
    fn row_background(&self, _area: AreaKind, _row: i64) -> Option<Rgba> {
        None
    }

    /// Background of a single cell, `None` for no fill.
    fn cell_background(&self, _cell: &CellContext) -> Option<Rgba> {
        None
    }

    fn caret_color(&self) -> Rgba {
        Rgba::BLACK
    }
}

/// Drawing backend.
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn draw_text(&mut self, bounds: Rect, text: &str, color: Rgba);
}

/// Two hex digits per byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HexFormatter {
    pub lowercase: bool,
}

impl HexFormatter {
    pub const UPPER: Self = Self { lowercase: false };
    pub const LOWER: Self = Self { lowercase: true };
}

impl ValueFormatter for HexFormatter {
    fn format(&self, value: u8) -> Cow<'static, str> {
        if self.lowercase {
            Cow::Owned(format!("{value:02x}"))
        } else {
            Cow::Owned(format!("{value:02X}"))
        }
    }
}

/// Printable ASCII as itself, everything else as a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiFormatter {
    pub placeholder: char,
}

impl AsciiFormatter {
    pub const DOT: Self = Self { placeholder: '.' };
}

impl Default for AsciiFormatter {
    fn default() -> Self {
        Self::DOT
    }
}

impl ValueFormatter for AsciiFormatter {
    fn format(&self, value: u8) -> Cow<'static, str> {
        let ch = if (0x20..=0x7E).contains(&value) {
            char::from(value)
        } else {
            self.placeholder
        };
        Cow::Owned(ch.to_string())
    }
}

/// Zero-padded hex offsets with an optional suffix such as `:`.
///
/// A suffix adds one character; size the offset area for it with
/// `RowStyle::offset_format_overhead(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HexOffsetFormatter {
    pub lowercase: bool,
    pub suffix: Option<char>,
}

impl HexOffsetFormatter {
    pub const PLAIN: Self = Self {
        lowercase: false,
        suffix: None,
    };
}

impl OffsetFormatter for HexOffsetFormatter {
    fn format(&self, offset: u64, pad_size: u32) -> String {
        let width = pad_size as usize;
        let mut out = if self.lowercase {
            format!("{offset:0width$x}")
        } else {
            format!("{offset:0width$X}")
        };
        if let Some(suffix) = self.suffix {
            out.push(suffix);
        }
        out
    }
}

/// Fixed palette: plain text, tinted selection and highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultColors {
    pub foreground: Rgba,
    pub offset_foreground: Rgba,
    pub background: Option<Rgba>,
    pub selection: Rgba,
    pub highlight: Rgba,
    pub caret: Rgba,
}

impl Default for DefaultColors {
    fn default() -> Self {
        Self {
            foreground: Rgba::BLACK,
            offset_foreground: Rgba::rgb(0x60, 0x60, 0x60),
            background: Some(Rgba::WHITE),
            selection: Rgba::rgb(0xB5, 0xD5, 0xFF),
            highlight: Rgba::rgb(0xFF, 0xF0, 0x90),
            caret: Rgba::BLACK,
        }
    }
}

impl ColorProvider for DefaultColors {
    fn color_for(&self, cell: &CellContext) -> Rgba {
        match cell.area {
            AreaKind::Offset => self.offset_foreground,
            _ => self.foreground,
        }
    }

    fn row_background(&self, _area: AreaKind, _row: i64) -> Option<Rgba> {
        self.background
    }

    fn cell_background(&self, cell: &CellContext) -> Option<Rgba> {
        if cell.flags.contains(CellFlags::SELECTED) {
            Some(self.selection)
        } else if cell.flags.contains(CellFlags::HIGHLIGHTED) {
            Some(self.highlight)
        } else {
            None
        }
    }

    fn caret_color(&self) -> Rgba {
        self.caret
    }
}

/// What to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintRequest {
    /// Rows to paint, usually the viewport's render rows.
    pub rows: RowRange,
    pub selection: ByteRange,
    pub highlight: ByteRange,
    /// Caret offset, if a caret is shown.
    pub caret: Option<i64>,
    pub areas: AreaSet,
}

impl PaintRequest {
    /// Paint `rows` in every area with no selection, highlight or caret.
    pub fn rows(rows: RowRange) -> Self {
        Self {
            rows,
            selection: ByteRange::INVALID,
            highlight: ByteRange::INVALID,
            caret: None,
            areas: AreaSet::all(),
        }
    }

    #[must_use]
    pub fn with_selection(mut self, selection: ByteRange) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: ByteRange) -> Self {
        self.highlight = highlight;
        self
    }

    #[must_use]
    pub fn with_caret(mut self, caret: i64) -> Self {
        self.caret = Some(caret);
        self
    }

    #[must_use]
    pub fn with_areas(mut self, areas: AreaSet) -> Self {
        self.areas = areas;
        self
    }

    fn flags_for(&self, offset: i64) -> CellFlags {
        let mut flags = CellFlags::empty();
        flags.set(CellFlags::SELECTED, self.selection.covers(offset));
        flags.set(CellFlags::HIGHLIGHTED, self.highlight.covers(offset));
        flags.set(CellFlags::CARET, self.caret == Some(offset));
        flags
    }
}

/// Counters returned by [`Painter::paint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaintStats {
    pub rows: usize,
    pub cells: usize,
}

/// Paints rows of a grid snapshot onto a [`DrawSurface`].
pub struct Painter<'a> {
    hex: &'a dyn ValueFormatter,
    text: &'a dyn ValueFormatter,
    offsets: &'a dyn OffsetFormatter,
    colors: &'a dyn ColorProvider,
}

static DEFAULT_HEX: HexFormatter = HexFormatter::UPPER;
static DEFAULT_TEXT: AsciiFormatter = AsciiFormatter::DOT;
static DEFAULT_OFFSETS: HexOffsetFormatter = HexOffsetFormatter::PLAIN;

impl<'a> Painter<'a> {
    /// Painter with the stock hex, ASCII and offset formatters.
    pub fn new(colors: &'a dyn ColorProvider) -> Self {
        Self {
            hex: &DEFAULT_HEX,
            text: &DEFAULT_TEXT,
            offsets: &DEFAULT_OFFSETS,
            colors,
        }
    }

    #[must_use]
    pub fn with_hex_formatter(mut self, formatter: &'a dyn ValueFormatter) -> Self {
        self.hex = formatter;
        self
    }

    #[must_use]
    pub fn with_text_formatter(mut self, formatter: &'a dyn ValueFormatter) -> Self {
        self.text = formatter;
        self
    }

    #[must_use]
    pub fn with_offset_formatter(mut self, formatter: &'a dyn OffsetFormatter) -> Self {
        self.offsets = formatter;
        self
    }

    /// Paint `request` using the layout in `templates`.
    ///
    /// Rows past the end of the source are skipped. An empty source still
    /// paints row 0 with its offset cell. The caret is drawn last, on the
    /// row it resolves to, including the slot after the final byte.
    pub fn paint<S, D>(
        &self,
        templates: &GridTemplates,
        source: &S,
        request: &PaintRequest,
        surface: &mut D,
    ) -> PaintStats
    where
        S: ByteSource + ?Sized,
        D: DrawSurface + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("paint", rows = ?request.rows).entered();

        let mut stats = PaintStats::default();
        let rows = request.rows;
        let n = templates.bytes_per_row();
        if !rows.is_valid() || n < 1 {
            return stats;
        }
        let first = coords::row_index_to_byte_offset(rows.start(), n);
        let last = coords::row_index_to_byte_offset(rows.end(), n).saturating_add(n - 1);

        if source.is_empty() {
            if rows.covers(0) {
                let data = build_row_data(source, 0, n);
                self.paint_row(templates, &data, request, surface, &mut stats);
            }
        } else {
            for slice in walk_rows(source, ByteRange::new(first, last), n) {
                self.paint_row(templates, &slice.data, request, surface, &mut stats);
            }
        }

        if let Some(caret) = request.caret {
            for kind in request.areas.kinds() {
                let geometry = templates.area_geometry(kind).with_source_len(source.len());
                let Some((row, _)) = geometry.caret_slot(caret) else {
                    continue;
                };
                if !rows.covers(row) {
                    continue;
                }
                let slot = geometry.caret_rect(caret);
                if !slot.is_empty() {
                    surface.fill_rect(slot, self.colors.caret_color());
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(rows = stats.rows, cells = stats.cells, "painted");
        stats
    }

    fn paint_row<S, D>(
        &self,
        templates: &GridTemplates,
        data: &RowData<'_, S>,
        request: &PaintRequest,
        surface: &mut D,
        stats: &mut PaintStats,
    ) where
        S: ByteSource + ?Sized,
        D: DrawSurface + ?Sized,
    {
        let row = data.row();
        stats.rows += 1;

        for kind in request.areas.kinds() {
            let geometry = templates.area_geometry(kind);
            if let Some(color) = self.colors.row_background(kind, row) {
                surface.fill_rect(geometry.row_rect(row), color);
            }

            let template = geometry.template();
            let dy = row.saturating_mul(template.row_height());
            let dx = geometry.origin_x();

            if kind == AreaKind::Offset {
                let cell = CellContext {
                    area: kind,
                    row,
                    offset: data.offset(),
                    value: None,
                    flags: CellFlags::empty(),
                };
                let text = self
                    .offsets
                    .format(data.offset().max(0) as u64, template.pad_size());
                let bounds = template.elements()[0].bounds().offset(dx, dy);
                surface.draw_text(bounds, &text, self.colors.color_for(&cell));
                continue;
            }

            let formatter = if kind == AreaKind::Hex {
                self.hex
            } else {
                self.text
            };
            for (index, value) in data.bytes().enumerate() {
                let Some(element) = template.element(index) else {
                    break;
                };
                let offset = data.offset() + index as i64;
                let cell = CellContext {
                    area: kind,
                    row,
                    offset,
                    value: Some(value),
                    flags: request.flags_for(offset),
                };
                let bounds = element.bounds().offset(dx, dy);
                if let Some(color) = self.colors.cell_background(&cell) {
                    surface.fill_rect(bounds, color);
                }
                let text = formatter.format(value);
                surface.draw_text(bounds, &text, self.colors.color_for(&cell));
                stats.cells += 1;
            }
        }
    }
}
