#![forbid(unsafe_code)]

//! Byte offset / row index conversions.
//!
//! These sit on the hot path of every paint and hit test, so invalid
//! input yields the [`INVALID`] sentinel instead of an error. Callers must
//! check for it before using a result as a sequence index.

/// Byte offset into a byte source.
pub type ByteOffset = i64;

/// Index of a row in the virtualized grid.
pub type RowIndex = i64;

/// Returned by the conversions for negative input or `elements_per_row < 1`.
pub const INVALID: i64 = -1;

/// First byte offset of `row_index`.
///
/// Saturates at `i64::MAX` for rows beyond the addressable range.
#[inline]
pub const fn row_index_to_byte_offset(row_index: RowIndex, elements_per_row: i64) -> ByteOffset {
    if row_index < 0 || elements_per_row < 1 {
        return INVALID;
    }
    row_index.saturating_mul(elements_per_row)
}

/// Row containing `byte_offset`.
#[inline]
pub const fn byte_offset_to_row_index(byte_offset: ByteOffset, elements_per_row: i64) -> RowIndex {
    if byte_offset < 0 || elements_per_row < 1 {
        return INVALID;
    }
    byte_offset / elements_per_row
}

/// Column of `byte_offset` within its row.
#[inline]
pub const fn byte_offset_to_index_in_row(byte_offset: ByteOffset, elements_per_row: i64) -> i64 {
    if byte_offset < 0 || elements_per_row < 1 {
        return INVALID;
    }
    byte_offset % elements_per_row
}

/// Number of rows needed to show `len` bytes. An empty source still has one row.
#[inline]
pub const fn row_count(len: u64, elements_per_row: i64) -> i64 {
    if elements_per_row < 1 {
        return INVALID;
    }
    let len = if len > i64::MAX as u64 {
        i64::MAX
    } else {
        len as i64
    };
    if len == 0 {
        return 1;
    }
    (len - 1) / elements_per_row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_reject_bad_input() {
        assert_eq!(row_index_to_byte_offset(-1, 16), INVALID);
        assert_eq!(row_index_to_byte_offset(3, 0), INVALID);
        assert_eq!(byte_offset_to_row_index(-5, 16), INVALID);
        assert_eq!(byte_offset_to_row_index(5, -2), INVALID);
        assert_eq!(byte_offset_to_index_in_row(-1, 16), INVALID);
        assert_eq!(byte_offset_to_index_in_row(1, 0), INVALID);
    }

    #[test]
    fn conversions_basic() {
        assert_eq!(row_index_to_byte_offset(0, 16), 0);
        assert_eq!(row_index_to_byte_offset(3, 16), 48);
        assert_eq!(byte_offset_to_row_index(47, 16), 2);
        assert_eq!(byte_offset_to_row_index(48, 16), 3);
        assert_eq!(byte_offset_to_index_in_row(47, 16), 15);
        assert_eq!(byte_offset_to_index_in_row(48, 16), 0);
    }

    #[test]
    fn single_element_rows() {
        assert_eq!(byte_offset_to_row_index(99, 1), 99);
        assert_eq!(byte_offset_to_index_in_row(99, 1), 0);
        assert_eq!(row_index_to_byte_offset(99, 1), 99);
    }

    #[test]
    fn huge_row_saturates() {
        assert_eq!(row_index_to_byte_offset(i64::MAX / 2, 16), i64::MAX);
        let last = i64::MAX;
        let row = byte_offset_to_row_index(last, 16);
        assert_eq!(
            row_index_to_byte_offset(row, 16) + byte_offset_to_index_in_row(last, 16),
            last
        );
    }

    #[test]
    fn row_count_rounds_up() {
        assert_eq!(row_count(0, 16), 1);
        assert_eq!(row_count(16, 16), 1);
        assert_eq!(row_count(17, 16), 2);
        assert_eq!(row_count(20, 16), 2);
        assert_eq!(row_count(5, 0), INVALID);
        assert_eq!(row_count(u64::MAX, 1), i64::MAX);
    }
}
