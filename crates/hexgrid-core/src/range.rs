#![forbid(unsafe_code)]

//! Inclusive index ranges for byte selections, highlights and row spans.
//!
//! A range is normalized at construction, so it is never backwards. The
//! invalid sentinel has a negative start; every operation that receives
//! an invalid operand answers with the sentinel again.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker for ranges of byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bytes {}

/// Marker for ranges of row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rows {}

/// Inclusive byte range `[start, end]`.
pub type ByteRange = IndexRange<Bytes>;

/// Inclusive row range `[start, end]`.
pub type RowRange = IndexRange<Rows>;

/// Inclusive `[start, end]` interval over 64-bit indices.
///
/// The unit parameter keeps byte ranges and row ranges from being mixed up.
pub struct IndexRange<Unit> {
    start: i64,
    end: i64,
    _unit: PhantomData<Unit>,
}

impl<Unit> IndexRange<Unit> {
    /// The invalid sentinel.
    pub const INVALID: Self = Self {
        start: -1,
        end: -1,
        _unit: PhantomData,
    };

    /// Create a range, swapping the bounds if `start > end`.
    ///
    /// A negative bound produces [`Self::INVALID`].
    pub const fn new(start: i64, end: i64) -> Self {
        if start < 0 || end < 0 {
            return Self::INVALID;
        }
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        Self {
            start,
            end,
            _unit: PhantomData,
        }
    }

    /// Range holding a single index.
    #[inline]
    pub const fn single(index: i64) -> Self {
        Self::new(index, index)
    }

    #[inline]
    pub const fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> i64 {
        self.end
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.start >= 0
    }

    /// `end - start + 1` for a valid range, otherwise `0`.
    #[inline]
    pub const fn len(&self) -> i64 {
        if self.is_valid() {
            self.end - self.start + 1
        } else {
            0
        }
    }

    /// A valid range always holds at least one index.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        !self.is_valid()
    }

    /// Membership test.
    ///
    /// Index `0` is never reported as contained; it shares its
    /// representation with the "nothing" state of callers that store
    /// ranges as raw offsets.
    #[inline]
    pub const fn contains(&self, value: i64) -> bool {
        value > 0 && value >= self.start && value <= self.end
    }

    /// Check whether `value` lies in `[start, end]`, including `0`.
    #[inline]
    pub const fn covers(&self, value: i64) -> bool {
        self.is_valid() && value >= self.start && value <= self.end
    }

    /// Intersection with `[other_start, other_end]`.
    ///
    /// Disjoint ranges and invalid operands yield [`Self::INVALID`].
    pub const fn intersection_with(&self, other_start: i64, other_end: i64) -> Self {
        let other = Self::new(other_start, other_end);
        if !self.is_valid() || !other.is_valid() {
            return Self::INVALID;
        }
        let start = if self.start > other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end < other.end {
            self.end
        } else {
            other.end
        };
        if start > end {
            return Self::INVALID;
        }
        Self::new(start, end)
    }

    /// Covering hull of this range and `[other_start, other_end]`.
    pub const fn union_with(&self, other_start: i64, other_end: i64) -> Self {
        let other = Self::new(other_start, other_end);
        if !self.is_valid() || !other.is_valid() {
            return Self::INVALID;
        }
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self::new(start, end)
    }

    #[inline]
    pub const fn intersection(&self, other: &Self) -> Self {
        self.intersection_with(other.start, other.end)
    }

    #[inline]
    pub const fn union(&self, other: &Self) -> Self {
        self.union_with(other.start, other.end)
    }

    /// Iterate the indices in the range. Invalid ranges yield nothing.
    pub fn iter(&self) -> std::ops::RangeInclusive<i64> {
        if self.is_valid() {
            self.start..=self.end
        } else {
            // An empty inclusive range.
            1..=0
        }
    }
}

impl<Unit> Clone for IndexRange<Unit> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Unit> Copy for IndexRange<Unit> {}

impl<Unit> PartialEq for IndexRange<Unit> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<Unit> Eq for IndexRange<Unit> {}

impl<Unit> Hash for IndexRange<Unit> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl<Unit> Default for IndexRange<Unit> {
    fn default() -> Self {
        Self::INVALID
    }
}

impl<Unit> fmt::Debug for IndexRange<Unit> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "[{}, {}]", self.start, self.end)
        } else {
            f.write_str("[invalid]")
        }
    }
}
