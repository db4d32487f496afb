#![forbid(unsafe_code)]

//! Template memoization keyed on style, font and row shape.
//!
//! A grid area only ever needs its current template, so the cache keeps a
//! single slot: asking for the same key again returns the shared
//! template; any change to the key rebuilds it. Templates are handed out
//! as `Arc`s so a paint in progress keeps a consistent template while the
//! owner swaps in a new one.
//!
//! ```
//! use hexgrid_layout::{AreaKind, FontMetrics, RowShape, RowStyle, TemplateCache};
//!
//! let mut cache = TemplateCache::new();
//! let style = RowStyle::default();
//! let shape = RowShape::Bytes { area: AreaKind::Hex, elements_per_row: 16 };
//! let font = FontMetrics::default();
//!
//! let a = cache.get_or_build(&style, shape, &font);
//! let b = cache.get_or_build(&style, shape, &font);
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! assert_eq!(cache.stats().hits, 1);
//! ```

use std::sync::Arc;

use crate::factory::{self, RowShape};
use crate::metrics::FontMetrics;
use crate::style::RowStyle;
use crate::template::RowTemplate;

/// Everything a template depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateKey {
    pub style: RowStyle,
    pub shape: RowShape,
    pub font: FontMetrics,
}

/// Hit/miss counters for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemplateCacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl TemplateCacheStats {
    /// Fraction of lookups served from the cache; `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Single-slot template memo.
#[derive(Debug, Default)]
pub struct TemplateCache {
    slot: Option<(TemplateKey, Arc<RowTemplate>)>,
    stats: TemplateCacheStats,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the template for the key, building it on a miss.
    pub fn get_or_build(
        &mut self,
        style: &RowStyle,
        shape: RowShape,
        font: &FontMetrics,
    ) -> Arc<RowTemplate> {
        if let Some((key, template)) = &self.slot {
            if key.shape == shape && key.font == *font && key.style == *style {
                self.stats.hits += 1;
                return Arc::clone(template);
            }
        }

        self.stats.misses += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(area = %shape.area(), misses = self.stats.misses, "template cache miss");

        let template = Arc::new(factory::build(style, shape, font));
        self.slot = Some((
            TemplateKey {
                style: style.clone(),
                shape,
                font: *font,
            },
            Arc::clone(&template),
        ));
        template
    }

    /// Currently cached template, if any.
    pub fn current(&self) -> Option<&Arc<RowTemplate>> {
        self.slot.as_ref().map(|(_, template)| template)
    }

    /// Drop the cached template; the next lookup rebuilds.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    pub fn stats(&self) -> TemplateCacheStats {
        self.stats
    }
}
