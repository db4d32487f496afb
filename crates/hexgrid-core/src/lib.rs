#![forbid(unsafe_code)]

//! Core: coordinate conversions, geometry and index ranges for the hex grid.

pub mod coords;
pub mod geometry;
pub mod range;

pub use coords::{ByteOffset, INVALID, RowIndex};
pub use geometry::{Extent, HorizontalSpan, Position, Rect};
pub use range::{ByteRange, IndexRange, RowRange};
