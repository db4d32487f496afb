#![forbid(unsafe_code)]

//! Font metrics consumed by the template factory.

use crate::style::StyleError;

/// Metrics of the monospaced display font, in pixels.
///
/// Supplied fresh by the owner whenever the display font changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    /// Horizontal advance of one character.
    pub advance: i64,
    pub ascent: i64,
    pub descent: i64,
    pub leading: i64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            advance: 8,
            ascent: 12,
            descent: 3,
            leading: 1,
        }
    }
}

impl FontMetrics {
    #[inline]
    pub const fn new(advance: i64, ascent: i64, descent: i64, leading: i64) -> Self {
        Self {
            advance,
            ascent,
            descent,
            leading,
        }
    }

    /// Glyph box height, the base of font-relative magnitudes.
    #[inline]
    pub const fn char_height(&self) -> i64 {
        self.ascent.saturating_add(self.descent)
    }

    /// Height of one grid row.
    #[inline]
    pub const fn row_height(&self) -> i64 {
        self.char_height().saturating_add(self.leading)
    }

    /// Check that every metric is non-negative.
    pub fn validate(&self) -> Result<(), Vec<StyleError>> {
        let mut errors = Vec::new();
        for (field, value) in [
            ("font.advance", self.advance),
            ("font.ascent", self.ascent),
            ("font.descent", self.descent),
            ("font.leading", self.leading),
        ] {
            if value < 0 {
                errors.push(StyleError::new(field, value.to_string(), "must be >= 0"));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
