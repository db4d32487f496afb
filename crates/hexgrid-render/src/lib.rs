#![forbid(unsafe_code)]

//! Rendering side of the hex grid: which bytes, which pixels, what to redraw.
//!
//! - [`source`] - the read-only [`ByteSource`] contract
//! - [`row_data`] - clipped per-row views and range walks
//! - [`damage`] - redraw rectangles for caret, selection and highlight changes
//! - [`viewport`] - the visible row window with overscan
//! - [`grid`] - [`HexGrid`], owner of the three area templates
//! - [`paint`] - formatter, color and surface traits plus the row [`Painter`]
//! - [`config`] - [`GridConfig`] from defaults and `HEXGRID_*` variables

pub mod config;
pub mod damage;
pub mod grid;
pub mod paint;
pub mod row_data;
pub mod source;
pub mod viewport;

pub use config::{GridConfig, GridConfigParse};
pub use damage::{AreaGeometry, DamageRegion, changed_byte_range};
pub use grid::{GridHit, GridTemplates, HexGrid};
pub use paint::{
    AsciiFormatter, CellContext, CellFlags, ColorProvider, DefaultColors, DrawSurface,
    HexFormatter, HexOffsetFormatter, OffsetFormatter, PaintRequest, PaintStats, Painter, Rgba,
    ValueFormatter,
};
pub use row_data::{RowData, RowSlice, RowWalk, build_row_data, walk_rows};
pub use source::ByteSource;
pub use viewport::Viewport;
