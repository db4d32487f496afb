#![forbid(unsafe_code)]

//! Row style configuration.
//!
//! A [`RowStyle`] is validated when it is set on its owner, never while a
//! template is being built. [`RowStyle::validate`] reports every violation
//! at once so the caller can fix them together; nothing is clamped.

use std::fmt;

use crate::metrics::FontMetrics;

/// Largest supported offset pad width, in hex digits.
pub const MAX_PAD_SIZE: u32 = 32;

/// A style length: either fixed pixels or relative to the font.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Magnitude {
    /// An exact size in pixels.
    Fixed(i64),
    /// `round(multiplier * char_height) + extra` pixels, resolved against
    /// the font the template is built for.
    FontRelative { multiplier: f32, extra: i64 },
}

impl Default for Magnitude {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Magnitude {
    pub const ZERO: Self = Self::Fixed(0);

    /// Font-relative magnitude without a fixed part.
    #[inline]
    pub const fn relative(multiplier: f32) -> Self {
        Self::FontRelative {
            multiplier,
            extra: 0,
        }
    }

    /// Resolve to pixels for `font`.
    pub fn resolve(&self, font: &FontMetrics) -> i64 {
        match *self {
            Self::Fixed(px) => px,
            Self::FontRelative { multiplier, extra } => {
                let scaled = (f64::from(multiplier) * font.char_height() as f64).round();
                (scaled as i64).saturating_add(extra)
            }
        }
    }

    /// Parse the [`Display`](fmt::Display) form: `3`, `3px`, `0.5em` or
    /// `1em+2px`. Whitespace around the parts is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some((em, px)) = value.split_once('+') {
            let multiplier = em.trim().strip_suffix("em")?.trim().parse::<f32>().ok()?;
            let px = px.trim();
            let extra = px.strip_suffix("px").unwrap_or(px).trim().parse::<i64>().ok()?;
            return Some(Self::FontRelative { multiplier, extra });
        }
        if let Some(em) = value.strip_suffix("em") {
            return em.trim().parse::<f32>().ok().map(Self::relative);
        }
        let px = value.strip_suffix("px").unwrap_or(value);
        px.trim().parse::<i64>().ok().map(Self::Fixed)
    }

    /// Check that the magnitude cannot resolve to a negative length.
    fn check(&self, field: &'static str, errors: &mut Vec<StyleError>) {
        match *self {
            Self::Fixed(px) if px < 0 => {
                errors.push(StyleError::new(field, px.to_string(), "must be >= 0"));
            }
            Self::FontRelative { multiplier, .. } if !multiplier.is_finite() || multiplier < 0.0 => {
                errors.push(StyleError::new(
                    field,
                    multiplier.to_string(),
                    "multiplier must be finite and >= 0",
                ));
            }
            Self::FontRelative { extra, .. } if extra < 0 => {
                errors.push(StyleError::new(field, extra.to_string(), "extra must be >= 0"));
            }
            _ => {}
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(px) => write!(f, "{px}px"),
            Self::FontRelative { multiplier, extra } if *extra == 0 => write!(f, "{multiplier}em"),
            Self::FontRelative { multiplier, extra } => write!(f, "{multiplier}em+{extra}px"),
        }
    }
}

/// Style of one area's rows.
///
/// Byte areas use the grouping and caret fields; offset rows use the pad
/// fields. Both use the insets.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowStyle {
    /// Bytes per visual group; `space_between_groups` follows each group.
    pub bytes_per_group: u32,
    pub space_between_groups: Magnitude,
    /// Caret slot reserved before every byte and after the last one.
    pub caret_width: Magnitude,
    pub left_inset: Magnitude,
    pub right_inset: Magnitude,
    /// Minimum offset width in hex digits.
    pub min_pad_size: u32,
    /// Characters of offset text beyond the digits, such as a trailing `:`.
    pub offset_format_overhead: u32,
}

impl Default for RowStyle {
    fn default() -> Self {
        Self {
            bytes_per_group: 2,
            space_between_groups: Magnitude::relative(0.5),
            caret_width: Magnitude::Fixed(2),
            left_inset: Magnitude::relative(0.5),
            right_inset: Magnitude::relative(0.5),
            min_pad_size: 8,
            offset_format_overhead: 0,
        }
    }
}

impl RowStyle {
    /// Style with every length zero and no grouping.
    pub fn compact() -> Self {
        Self {
            bytes_per_group: 1,
            space_between_groups: Magnitude::ZERO,
            caret_width: Magnitude::ZERO,
            left_inset: Magnitude::ZERO,
            right_inset: Magnitude::ZERO,
            min_pad_size: 0,
            offset_format_overhead: 0,
        }
    }

    #[must_use]
    pub fn bytes_per_group(mut self, bytes_per_group: u32) -> Self {
        self.bytes_per_group = bytes_per_group;
        self
    }

    #[must_use]
    pub fn space_between_groups(mut self, space: Magnitude) -> Self {
        self.space_between_groups = space;
        self
    }

    #[must_use]
    pub fn caret_width(mut self, width: Magnitude) -> Self {
        self.caret_width = width;
        self
    }

    /// Set both insets.
    #[must_use]
    pub fn insets(mut self, left: Magnitude, right: Magnitude) -> Self {
        self.left_inset = left;
        self.right_inset = right;
        self
    }

    #[must_use]
    pub fn min_pad_size(mut self, pad: u32) -> Self {
        self.min_pad_size = pad;
        self
    }

    #[must_use]
    pub fn offset_format_overhead(mut self, chars: u32) -> Self {
        self.offset_format_overhead = chars;
        self
    }

    /// Validate style constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<StyleError>> {
        let mut errors = Vec::new();
        if self.bytes_per_group == 0 {
            errors.push(StyleError::new("bytes_per_group", "0", "must be >= 1"));
        }
        self.space_between_groups
            .check("space_between_groups", &mut errors);
        self.caret_width.check("caret_width", &mut errors);
        self.left_inset.check("left_inset", &mut errors);
        self.right_inset.check("right_inset", &mut errors);
        if self.min_pad_size > MAX_PAD_SIZE {
            errors.push(StyleError::new(
                "min_pad_size",
                self.min_pad_size.to_string(),
                format!("must be in [0, {MAX_PAD_SIZE}]"),
            ));
        }
        if self.offset_format_overhead > MAX_PAD_SIZE {
            errors.push(StyleError::new(
                "offset_format_overhead",
                self.offset_format_overhead.to_string(),
                format!("must be in [0, {MAX_PAD_SIZE}]"),
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl StyleError {
    pub fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for StyleError {}
