#![forbid(unsafe_code)]

//! Row layout for the hex grid.
//!
//! - [`RowStyle`] / [`Magnitude`] - style configuration, validated on set
//! - [`factory`] - builds a [`RowTemplate`] from a style and [`FontMetrics`]
//! - [`TemplateCache`] - reuses the template until style, font or shape change
//! - [`hit_test`] - resolves a pixel to an element with edge classification

pub mod area;
pub mod cache;
pub mod element;
pub mod factory;
pub mod metrics;
pub mod style;
pub mod template;

pub use area::{AreaKind, AreaSet};
pub use cache::{TemplateCache, TemplateCacheStats, TemplateKey};
pub use element::Element;
pub use factory::RowShape;
pub use hexgrid_core::geometry::{Extent, HorizontalSpan, Position, Rect};
pub use hit_test::{HitInfo, SurfaceHit, hit_test, hit_test_surface};
pub use metrics::FontMetrics;
pub use style::{Magnitude, RowStyle, StyleError};
pub use template::RowTemplate;
