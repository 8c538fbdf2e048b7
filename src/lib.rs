//! brushline: interactive time-series line chart engine.
//!
//! A chart is built from an ascending sample sequence in one of two modes:
//! a hover tooltip with a focus marker, or a drag-to-zoom brush with a
//! debounced double-release reset. Scenes are produced declaratively and
//! handed to a pluggable [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
