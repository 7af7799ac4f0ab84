//! Radial score gauge: concentric category rings inside an outer total
//! ring, rendered as a deterministic vector drawing.

#[cfg(feature = "cairo")]
pub mod cairo_render;
pub mod config;
pub mod error;
pub mod gauge;
pub mod label;
pub mod layout;
pub mod scale;
pub mod theme;
pub mod view;

pub use crate::config::{ArcStyleConfig, CanvasConfig, Theme};
pub use crate::error::GaugeError;
pub use crate::gauge::{GaugeHandle, InitOptions, init};
pub use crate::layout::{Category, CategoryOrder, GaugeLayout, RingSpec, ScorePayload, plan};
pub use crate::theme::ColorTable;
