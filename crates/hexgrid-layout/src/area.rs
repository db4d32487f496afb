#![forbid(unsafe_code)]

//! The three column areas of a hex grid row.

use std::fmt;

/// One column area. Each area has its own template and horizontal origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaKind {
    /// Row start offsets, one element per row.
    Offset,
    /// Bytes as two hex digits each.
    Hex,
    /// Bytes as one text character each.
    Text,
}

impl AreaKind {
    /// All areas, left to right.
    pub const ALL: [AreaKind; 3] = [AreaKind::Offset, AreaKind::Hex, AreaKind::Text];

    /// Characters per byte element. Offset rows size their single element
    /// from the pad width instead.
    #[inline]
    pub const fn chars_per_element(self) -> i64 {
        match self {
            Self::Offset => 0,
            Self::Hex => 2,
            Self::Text => 1,
        }
    }

    #[inline]
    pub const fn is_byte_area(self) -> bool {
        !matches!(self, Self::Offset)
    }

    #[inline]
    pub const fn as_set(self) -> AreaSet {
        match self {
            Self::Offset => AreaSet::OFFSET,
            Self::Hex => AreaSet::HEX,
            Self::Text => AreaSet::TEXT,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Offset => "offset",
            Self::Hex => "hex",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

bitflags::bitflags! {
    /// A selection of areas, used to fan damage out across columns.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AreaSet: u8 {
        const OFFSET = 0b001;
        const HEX    = 0b010;
        const TEXT   = 0b100;
        /// Areas that show bytes (and therefore carets and selections).
        const BYTES  = Self::HEX.bits() | Self::TEXT.bits();
    }
}

impl AreaSet {
    /// Iterate the selected areas, left to right.
    pub fn kinds(self) -> impl Iterator<Item = AreaKind> {
        AreaKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.as_set()))
    }
}
