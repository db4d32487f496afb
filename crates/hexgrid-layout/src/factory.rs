#![forbid(unsafe_code)]

//! Row template construction.
//!
//! # Algorithm
//!
//! Byte rows:
//! 1. Start at `x = left_inset + caret`.
//! 2. For each slot place an element `advance * chars_per_element` wide.
//! 3. Advance by the element width plus one caret slot; after every
//!    `bytes_per_group`-th slot also advance by the group spacing.
//! 4. Width is the last element's right edge plus the right inset and a
//!    trailing caret slot.
//!
//! Offset rows hold a single element wide enough for the pad digits and
//! any format overhead.
//!
//! The factory is stateless. Callers that want reuse go through
//! [`TemplateCache`](crate::cache::TemplateCache).

use hexgrid_core::geometry::{Extent, Position};

use crate::area::AreaKind;
use crate::element::Element;
use crate::metrics::FontMetrics;
use crate::style::{MAX_PAD_SIZE, RowStyle};
use crate::template::RowTemplate;

/// What a template is built for, beyond style and font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowShape {
    /// A byte area (`Hex` or `Text`) holding `elements_per_row` slots.
    Bytes {
        area: AreaKind,
        elements_per_row: usize,
    },
    /// The offset area, sized for offsets up to `last_valid_offset`.
    Offset { last_valid_offset: u64 },
}

impl RowShape {
    pub fn area(&self) -> AreaKind {
        match *self {
            Self::Bytes { area, .. } => area,
            Self::Offset { .. } => AreaKind::Offset,
        }
    }
}

/// Build a template for `shape`.
pub fn build(style: &RowStyle, shape: RowShape, font: &FontMetrics) -> RowTemplate {
    match shape {
        RowShape::Bytes {
            area,
            elements_per_row,
        } => build_byte_row(style, area, elements_per_row, font),
        RowShape::Offset { last_valid_offset } => build_offset_row(style, last_valid_offset, font),
    }
}

/// Build the template of a byte area.
///
/// `style` must already be validated; zero grouping or row sizes are
/// treated as one.
pub fn build_byte_row(
    style: &RowStyle,
    area: AreaKind,
    elements_per_row: usize,
    font: &FontMetrics,
) -> RowTemplate {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "build_byte_row",
        area = %area,
        elements_per_row
    )
    .entered();

    debug_assert!(style.validate().is_ok(), "style must be validated first");
    debug_assert!(area.is_byte_area(), "byte rows need a byte area");
    debug_assert!(elements_per_row >= 1, "elements_per_row must be >= 1");

    let elements_per_row = elements_per_row.max(1);
    let group = style.bytes_per_group.max(1) as usize;
    let caret = style.caret_width.resolve(font);
    let group_space = style.space_between_groups.resolve(font);
    let height = font.row_height();
    let width = font
        .advance
        .saturating_mul(area.chars_per_element().max(1));

    let mut x = style.left_inset.resolve(font).saturating_add(caret);
    let mut elements = Vec::with_capacity(elements_per_row);
    for slot in 0..elements_per_row {
        elements.push(Element::new(Position::new(x, 0), Extent::new(width, height)));
        x = x.saturating_add(width).saturating_add(caret);
        if (slot + 1) % group == 0 {
            x = x.saturating_add(group_space);
        }
    }

    let last_right = elements[elements.len() - 1].right();
    let row_width = last_right
        .saturating_add(style.right_inset.resolve(font))
        .saturating_add(caret);

    #[cfg(feature = "tracing")]
    tracing::trace!(row_width, row_height = height, "byte row template built");

    RowTemplate::from_parts(
        area,
        elements,
        Extent::new(row_width, height),
        caret,
        0,
    )
}

/// Build the template of the offset area.
pub fn build_offset_row(style: &RowStyle, last_valid_offset: u64, font: &FontMetrics) -> RowTemplate {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("build_offset_row", last_valid_offset).entered();

    debug_assert!(style.validate().is_ok(), "style must be validated first");

    let pad = pad_size(last_valid_offset, style.min_pad_size);
    let chars = i64::from(pad) + i64::from(style.offset_format_overhead);
    let height = font.row_height();
    let left = style.left_inset.resolve(font);
    let element = Element::new(
        Position::new(left, 0),
        Extent::new(font.advance.saturating_mul(chars), height),
    );
    let row_width = element.right().saturating_add(style.right_inset.resolve(font));

    #[cfg(feature = "tracing")]
    tracing::trace!(pad, row_width, "offset row template built");

    RowTemplate::from_parts(
        AreaKind::Offset,
        vec![element],
        Extent::new(row_width, height),
        0,
        pad,
    )
}

/// Digits needed to show `last_valid_offset`, at least `min_pad_size`.
pub fn pad_size(last_valid_offset: u64, min_pad_size: u32) -> u32 {
    hex_digits(last_valid_offset)
        .max(min_pad_size)
        .min(MAX_PAD_SIZE)
}

/// Number of hex digits in `value`; `0` needs one.
#[inline]
pub const fn hex_digits(value: u64) -> u32 {
    if value == 0 {
        1
    } else {
        (64 - value.leading_zeros()).div_ceil(4)
    }
}
