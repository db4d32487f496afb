#![forbid(unsafe_code)]

//! Grid configuration from defaults and `HEXGRID_*` environment variables.
//!
//! | Variable | Field | Format |
//! |---|---|---|
//! | `HEXGRID_BYTES_PER_ROW` | `bytes_per_row` | integer >= 1 |
//! | `HEXGRID_BYTES_PER_GROUP` | `bytes_per_group` | integer >= 1 |
//! | `HEXGRID_GROUP_SPACING` | `group_spacing` | magnitude |
//! | `HEXGRID_CARET_WIDTH` | `caret_width` | magnitude |
//! | `HEXGRID_INSET` | `inset` | magnitude |
//! | `HEXGRID_AREA_SPACING` | `area_spacing` | pixels >= 0 |
//! | `HEXGRID_MIN_PAD` | `min_pad_size` | integer in `[0, 32]` |
//! | `HEXGRID_UPPERCASE` | `uppercase` | bool (1/0/true/false) |
//!
//! Magnitudes are `3`, `3px`, `0.5em` or `1em+2px`. Unparseable values
//! keep the default and are reported next to the resulting config, as are
//! values that parse but fail validation.

use std::env;

use hexgrid_layout::{AreaKind, FontMetrics, Magnitude, RowStyle, StyleError};

use crate::grid::{DEFAULT_BYTES_PER_ROW, HexGrid};
use crate::paint::{HexFormatter, HexOffsetFormatter};

pub const ENV_BYTES_PER_ROW: &str = "HEXGRID_BYTES_PER_ROW";
pub const ENV_BYTES_PER_GROUP: &str = "HEXGRID_BYTES_PER_GROUP";
pub const ENV_GROUP_SPACING: &str = "HEXGRID_GROUP_SPACING";
pub const ENV_CARET_WIDTH: &str = "HEXGRID_CARET_WIDTH";
pub const ENV_INSET: &str = "HEXGRID_INSET";
pub const ENV_AREA_SPACING: &str = "HEXGRID_AREA_SPACING";
pub const ENV_MIN_PAD: &str = "HEXGRID_MIN_PAD";
pub const ENV_UPPERCASE: &str = "HEXGRID_UPPERCASE";

/// Everything needed to build a [`HexGrid`] and its formatters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub bytes_per_row: usize,
    pub bytes_per_group: u32,
    pub group_spacing: Magnitude,
    pub caret_width: Magnitude,
    /// Left and right inset of every area.
    pub inset: Magnitude,
    /// Horizontal gap between adjacent areas, in pixels.
    pub area_spacing: i64,
    pub min_pad_size: u32,
    /// Uppercase hex digits for bytes and offsets.
    pub uppercase: bool,
    pub font: FontMetrics,
}

impl Default for GridConfig {
    fn default() -> Self {
        let style = RowStyle::default();
        let font = FontMetrics::default();
        Self {
            bytes_per_row: DEFAULT_BYTES_PER_ROW,
            bytes_per_group: style.bytes_per_group,
            group_spacing: style.space_between_groups,
            caret_width: style.caret_width,
            inset: style.left_inset,
            area_spacing: font.advance,
            min_pad_size: style.min_pad_size,
            uppercase: true,
            font,
        }
    }
}

/// Result of reading the environment: the config plus every problem found.
#[derive(Debug, Clone)]
pub struct GridConfigParse {
    pub config: GridConfig,
    pub errors: Vec<StyleError>,
}

impl GridConfig {
    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> GridConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> GridConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Row style of `kind` implied by this config.
    pub fn style(&self, kind: AreaKind) -> RowStyle {
        let base = RowStyle::compact().insets(self.inset, self.inset);
        match kind {
            AreaKind::Offset => base.min_pad_size(self.min_pad_size),
            AreaKind::Hex | AreaKind::Text => base
                .bytes_per_group(self.bytes_per_group)
                .space_between_groups(self.group_spacing)
                .caret_width(self.caret_width),
        }
    }

    /// Styles of all areas, left to right.
    pub fn styles(&self) -> [RowStyle; 3] {
        AreaKind::ALL.map(|kind| self.style(kind))
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<StyleError>> {
        let mut errors = Vec::new();
        if self.bytes_per_row == 0 {
            errors.push(StyleError::new("bytes_per_row", "0", "must be >= 1"));
        }
        if self.area_spacing < 0 {
            errors.push(StyleError::new(
                "area_spacing",
                self.area_spacing.to_string(),
                "must be >= 0",
            ));
        }
        if let Err(mut font) = self.font.validate() {
            errors.append(&mut font);
        }
        // Byte styles share every checked field, so one of them suffices.
        for kind in [AreaKind::Offset, AreaKind::Hex] {
            if let Err(mut style) = self.style(kind).validate() {
                errors.append(&mut style);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build a grid for a source of `source_len` bytes.
    pub fn build_grid(&self, source_len: u64) -> Result<HexGrid, Vec<StyleError>> {
        HexGrid::with_parts(
            self.font,
            self.styles(),
            self.bytes_per_row,
            self.area_spacing,
            source_len,
        )
    }

    pub fn hex_formatter(&self) -> HexFormatter {
        HexFormatter {
            lowercase: !self.uppercase,
        }
    }

    pub fn offset_formatter(&self) -> HexOffsetFormatter {
        HexOffsetFormatter {
            lowercase: !self.uppercase,
            suffix: None,
        }
    }
}

fn from_env_with<F>(mut get: F) -> GridConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = GridConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_BYTES_PER_ROW) {
        match parse_usize(&value) {
            Some(parsed) => config.bytes_per_row = parsed,
            None => errors.push(StyleError::new(
                "bytes_per_row",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_BYTES_PER_GROUP) {
        match value.trim().parse::<u32>() {
            Ok(parsed) => config.bytes_per_group = parsed,
            Err(_) => errors.push(StyleError::new(
                "bytes_per_group",
                value,
                "expected positive integer",
            )),
        }
    }

    for (key, field, slot) in [
        (ENV_GROUP_SPACING, "group_spacing", &mut config.group_spacing),
        (ENV_CARET_WIDTH, "caret_width", &mut config.caret_width),
        (ENV_INSET, "inset", &mut config.inset),
    ] {
        if let Some(value) = get(key) {
            match Magnitude::parse(&value) {
                Some(parsed) => *slot = parsed,
                None => errors.push(StyleError::new(
                    field,
                    value,
                    "expected magnitude (3, 3px, 0.5em or 1em+2px)",
                )),
            }
        }
    }

    if let Some(value) = get(ENV_AREA_SPACING) {
        match value.trim().parse::<i64>() {
            Ok(parsed) => config.area_spacing = parsed,
            Err(_) => errors.push(StyleError::new(
                "area_spacing",
                value,
                "expected integer pixels",
            )),
        }
    }

    if let Some(value) = get(ENV_MIN_PAD) {
        match value.trim().parse::<u32>() {
            Ok(parsed) => config.min_pad_size = parsed,
            Err(_) => errors.push(StyleError::new(
                "min_pad_size",
                value,
                "expected integer in [0, 32]",
            )),
        }
    }

    if let Some(value) = get(ENV_UPPERCASE) {
        match parse_bool(&value) {
            Some(parsed) => config.uppercase = parsed,
            None => errors.push(StyleError::new(
                "uppercase",
                value,
                "expected bool (1/0/true/false)",
            )),
        }
    }

    if let Err(mut validation) = config.validate() {
        errors.append(&mut validation);
    }

    #[cfg(feature = "tracing")]
    for error in &errors {
        tracing::warn!(%error, "grid config");
    }

    GridConfigParse { config, errors }
}

#[inline]
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[inline]
fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}
