mod animation;
mod frame;
mod layer_stack;
mod layered_frame;
mod null_renderer;
mod overlay;
mod primitives;

pub use animation::{Easing, Transition};
pub use frame::{FrameLayer, RenderFrame};
pub use layer_stack::{CanvasLayerKind, ChartLayerStack};
pub use layered_frame::{LayerPrimitives, LayeredScene};
pub use null_renderer::NullRenderer;
pub use overlay::{CanvasRootId, TooltipOverlay};
pub use primitives::{
    CirclePrimitive, Color, DashPattern, GradientStop, LinePrimitive, LinearGradient, Paint,
    PathPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart domain and interaction logic.
/// Each frame replaces everything previously drawn under the same root.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Detaches the canvas root and its floating tooltip overlay.
    ///
    /// Must be idempotent; unknown roots are ignored.
    fn teardown(&mut self, root: CanvasRootId) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
