#![forbid(unsafe_code)]

//! Row-wise slicing of a byte source.
//!
//! # Clipping
//!
//! 1. `last_valid = max(0, len - 1)`.
//! 2. A row covers `[row * n, row * n + n - 1]`, clipped to `last_valid`.
//! 3. A row starting past the end of the source (or any row of an empty
//!    source) is empty; its offset is clipped to `last_valid`.
//!
//! The final, partially filled row therefore never reads past the end,
//! and no row has a negative size. Empty rows mean "nothing to draw", not
//! an error.

use hexgrid_core::coords::{self, INVALID};
use hexgrid_core::range::ByteRange;

use crate::source::ByteSource;

/// View of the bytes belonging to one row.
///
/// Cheap to create; nothing is copied until asked for.
#[derive(Debug)]
pub struct RowData<'a, S: ByteSource + ?Sized> {
    source: &'a S,
    offset: i64,
    size: i64,
    row: i64,
}

impl<S: ByteSource + ?Sized> Clone for RowData<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ByteSource + ?Sized> Copy for RowData<'_, S> {}

impl<'a, S: ByteSource + ?Sized> RowData<'a, S> {
    /// Offset of the first byte of the row (clipped for empty rows).
    #[inline]
    pub fn offset(&self) -> i64 {
        self.offset
    }

    #[inline]
    pub fn size(&self) -> i64 {
        self.size
    }

    #[inline]
    pub fn row(&self) -> i64 {
        self.row
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size <= 0
    }

    /// Offset of the last byte, or `INVALID` for an empty row.
    #[inline]
    pub fn last_offset(&self) -> i64 {
        if self.is_empty() {
            INVALID
        } else {
            self.offset + self.size - 1
        }
    }

    /// Covered bytes as a range; invalid for an empty row.
    pub fn byte_range(&self) -> ByteRange {
        if self.is_empty() {
            ByteRange::INVALID
        } else {
            ByteRange::new(self.offset, self.last_offset())
        }
    }

    /// Byte at `index` within the row.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `index < size()`.
    #[inline]
    pub fn byte_at(&self, index: usize) -> u8 {
        debug_assert!((index as i64) < self.size, "index {index} past row end");
        self.source.byte_at(self.offset as u64 + index as u64)
    }

    /// Iterate the row's bytes.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + 'a {
        let source = self.source;
        let offset = self.offset.max(0) as u64;
        (0..self.size.max(0) as u64).map(move |i| source.byte_at(offset + i))
    }

    /// Copy the row into `out`, returning the number of bytes written.
    pub fn copy_to(&self, out: &mut [u8]) -> usize {
        let count = (self.size.max(0) as usize).min(out.len());
        if count > 0 {
            self.source
                .read_into(self.offset as u64, &mut out[..count]);
        }
        count
    }
}

/// Slice row `row` out of `source`, `elements_per_row` bytes per row.
pub fn build_row_data<S: ByteSource + ?Sized>(
    source: &S,
    row: i64,
    elements_per_row: i64,
) -> RowData<'_, S> {
    let len = source.len().min(i64::MAX as u64) as i64;
    let last_valid = (len - 1).max(0);
    let start = coords::row_index_to_byte_offset(row, elements_per_row);

    if start == INVALID {
        return RowData {
            source,
            offset: INVALID,
            size: 0,
            row,
        };
    }
    if len == 0 || start > last_valid {
        return RowData {
            source,
            offset: start.min(last_valid),
            size: 0,
            row,
        };
    }

    let last = last_valid.min(start.saturating_add(elements_per_row - 1));
    RowData {
        source,
        offset: start,
        size: (1 + last - start).max(0),
        row,
    }
}

/// One row of a range walk.
#[derive(Debug)]
pub struct RowSlice<'a, S: ByteSource + ?Sized> {
    pub data: RowData<'a, S>,
    /// Bytes at the start of the row that precede the walked range.
    pub leading_bytes_to_ignore: i64,
    /// Bytes at the end of the row that follow the walked range.
    pub trailing_bytes_to_ignore: i64,
}

impl<S: ByteSource + ?Sized> RowSlice<'_, S> {
    /// Index within the row of the first byte in the walked range.
    #[inline]
    pub fn first_index(&self) -> usize {
        self.leading_bytes_to_ignore as usize
    }

    /// Number of row bytes inside the walked range.
    #[inline]
    pub fn visible_len(&self) -> i64 {
        (self.data.size() - self.leading_bytes_to_ignore - self.trailing_bytes_to_ignore).max(0)
    }
}

/// Iterator over the rows touched by an inclusive byte range.
///
/// Rows past the end of the source are not yielded; they would be empty.
#[derive(Debug)]
pub struct RowWalk<'a, S: ByteSource + ?Sized> {
    source: &'a S,
    range: ByteRange,
    elements_per_row: i64,
    next_row: i64,
    last_row: i64,
}

impl<'a, S: ByteSource + ?Sized> Iterator for RowWalk<'a, S> {
    type Item = RowSlice<'a, S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row > self.last_row {
            return None;
        }
        let data = build_row_data(self.source, self.next_row, self.elements_per_row);
        self.next_row += 1;
        let leading = (self.range.start() - data.offset()).max(0);
        let trailing = (data.offset() + data.size() - 1 - self.range.end()).max(0);
        Some(RowSlice {
            data,
            leading_bytes_to_ignore: leading,
            trailing_bytes_to_ignore: trailing,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last_row - self.next_row + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

/// Walk the rows covering `range`, clipped to the source.
///
/// Invalid ranges, empty sources and `elements_per_row < 1` walk nothing.
pub fn walk_rows<S: ByteSource + ?Sized>(
    source: &S,
    range: ByteRange,
    elements_per_row: i64,
) -> RowWalk<'_, S> {
    let len = source.len().min(i64::MAX as u64) as i64;
    let (next_row, last_row) = if !range.is_valid() || len == 0 || elements_per_row < 1 {
        (0, -1)
    } else {
        let end = range.end().min(len - 1);
        (
            coords::byte_offset_to_row_index(range.start(), elements_per_row),
            coords::byte_offset_to_row_index(end, elements_per_row),
        )
    };
    RowWalk {
        source,
        range,
        elements_per_row,
        next_row,
        last_row,
    }
}
