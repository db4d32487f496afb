#![forbid(unsafe_code)]

//! hexgrid public facade crate.
//!
//! Re-exports the layout, slicing, damage and paint types of the internal
//! crates and adds a top-level [`Error`] for configuration failures.
//!
//! ```
//! use hexgrid::prelude::*;
//!
//! let bytes: Vec<u8> = (0..=255).collect();
//! let grid = hexgrid::grid(&GridConfig::default(), bytes.len() as u64)?;
//! let t = grid.templates();
//!
//! // Click the leading half of byte 0x42 in the hex column.
//! let hex = t.template(AreaKind::Hex);
//! let x = t.origin(AreaKind::Hex) + hex.elements()[2].x();
//! let y = 4 * t.row_height();
//! let hit = grid.hit_test(x, y).expect("inside the hex area");
//! assert_eq!(hit.byte_offset, 0x42);
//! # Ok::<(), hexgrid::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use hexgrid_core::coords::{
    ByteOffset, INVALID, RowIndex, byte_offset_to_index_in_row, byte_offset_to_row_index,
    row_index_to_byte_offset,
};
pub use hexgrid_core::geometry::{Extent, HorizontalSpan, Position, Rect};
pub use hexgrid_core::range::{ByteRange, RowRange};

// --- Layout re-exports -----------------------------------------------------

pub use hexgrid_layout::{
    AreaKind, AreaSet, Element, FontMetrics, HitInfo, Magnitude, RowShape, RowStyle, RowTemplate,
    StyleError, SurfaceHit, TemplateCache, hit_test,
};

// --- Render re-exports -----------------------------------------------------

pub use hexgrid_render::{
    AsciiFormatter, ByteSource, CellContext, CellFlags, ColorProvider, DamageRegion,
    DefaultColors, DrawSurface, GridConfig, GridConfigParse, GridHit, GridTemplates, HexFormatter,
    HexGrid, HexOffsetFormatter, OffsetFormatter, PaintRequest, PaintStats, Painter, Rgba,
    RowData, Viewport, ValueFormatter, build_row_data, walk_rows,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for hexgrid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Rejected configuration, with every violation found.
    Config(Vec<StyleError>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(errors) => {
                write!(f, "invalid grid configuration")?;
                for (i, err) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<Vec<StyleError>> for Error {
    fn from(errors: Vec<StyleError>) -> Self {
        Self::Config(errors)
    }
}

impl From<StyleError> for Error {
    fn from(err: StyleError) -> Self {
        Self::Config(vec![err])
    }
}

/// Standard result type for hexgrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a grid for `source_len` bytes from `config`.
pub fn grid(config: &GridConfig, source_len: u64) -> Result<HexGrid> {
    Ok(config.build_grid(source_len)?)
}

/// Build a grid from `HEXGRID_*` environment variables.
///
/// Unlike [`GridConfig::from_env`], any unparseable or invalid variable is
/// an error instead of a silently defaulted field.
pub fn grid_from_env(source_len: u64) -> Result<HexGrid> {
    let parsed = GridConfig::from_env_with_diagnostics();
    if !parsed.errors.is_empty() {
        return Err(Error::Config(parsed.errors));
    }
    grid(&parsed.config, source_len)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AreaKind, AreaSet, ByteRange, ByteSource, ColorProvider, DrawSurface, Error, FontMetrics,
        GridConfig, HexGrid, Magnitude, PaintRequest, Painter, Rect, Result, RowRange, RowStyle,
        Viewport,
    };

    pub use crate::{core, layout, render};
}

pub use hexgrid_core as core;
pub use hexgrid_layout as layout;
pub use hexgrid_render as render;
