use std::time::Duration;

use tracing::trace;

use crate::core::{Sample, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{BrushSelection, ChartMode, InteractionPhase};
use crate::render::{CanvasRootId, LayeredScene, RenderFrame, Renderer, TooltipOverlay};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::ChartEngineConfig;
use super::chart_instance::{ChartInstance, FocusMarker};
use super::scene_builder::build_scene;

/// Main orchestration facade consumed by host applications.
///
/// One engine owns one host: at most one chart instance is alive at a time,
/// and every `create` fully replaces the previous one.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) instance: Option<ChartInstance>,
    /// Latest host clock reading; transitions and the idle timer run on it.
    pub(super) clock: Duration,
    pub(super) next_root: u64,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            renderer,
            config,
            instance: None,
            clock: Duration::ZERO,
            next_root: 1,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    #[must_use]
    pub fn has_chart(&self) -> bool {
        self.instance.is_some()
    }

    /// Root of the live canvas subtree, if a chart exists.
    #[must_use]
    pub fn canvas_root(&self) -> Option<CanvasRootId> {
        self.instance.as_ref().map(|instance| instance.root)
    }

    #[must_use]
    pub fn mode(&self) -> Option<ChartMode> {
        self.instance.as_ref().map(|instance| instance.mode)
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.instance.as_ref().map(|instance| instance.label.as_str())
    }

    /// Samples originally supplied to `create`.
    #[must_use]
    pub fn samples(&self) -> Option<&[Sample]> {
        self.instance
            .as_ref()
            .map(|instance| instance.series.as_slice())
    }

    /// Current time domain. During a rescale transition this is already the
    /// target range.
    #[must_use]
    pub fn time_visible_range(&self) -> Option<(f64, f64)> {
        self.instance
            .as_ref()
            .map(|instance| instance.time_scale.visible_range())
    }

    #[must_use]
    pub fn time_full_range(&self) -> Option<(f64, f64)> {
        self.instance
            .as_ref()
            .map(|instance| instance.time_scale.full_range())
    }

    /// `(0, max)` value domain.
    #[must_use]
    pub fn value_domain(&self) -> Option<(f64, f64)> {
        self.instance
            .as_ref()
            .map(|instance| instance.value_scale.domain())
    }

    #[must_use]
    pub fn phase(&self) -> Option<InteractionPhase> {
        self.instance
            .as_ref()
            .map(|instance| instance.interaction.phase())
    }

    #[must_use]
    pub fn focus(&self) -> Option<FocusMarker> {
        self.instance.as_ref().and_then(|instance| instance.focus)
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipOverlay> {
        self.instance
            .as_ref()
            .and_then(|instance| instance.tooltip.as_ref())
    }

    #[must_use]
    pub fn brush_selection(&self) -> Option<BrushSelection> {
        self.instance
            .as_ref()
            .and_then(|instance| instance.interaction.selection())
    }

    /// Whether an empty brush release is waiting for its confirming twin.
    #[must_use]
    pub fn is_reset_pending(&self) -> bool {
        self.instance
            .as_ref()
            .is_some_and(|instance| instance.interaction.idle_timer().is_pending(self.clock))
    }

    pub fn time_to_x(&self, time: f64) -> ChartResult<f64> {
        Ok(self.live()?.time_scale.time_to_x(time))
    }

    pub fn x_to_time(&self, x: f64) -> ChartResult<f64> {
        Ok(self.live()?.time_scale.x_to_time(x))
    }

    pub fn value_to_y(&self, value: f64) -> ChartResult<f64> {
        Ok(self.live()?.value_scale.value_to_y(value))
    }

    pub fn y_to_value(&self, y: f64) -> ChartResult<f64> {
        Ok(self.live()?.value_scale.y_to_value(y))
    }

    /// Converts canvas coordinates (margins included) to plot coordinates.
    #[must_use]
    pub fn canvas_to_plot(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.config.margin.left, y - self.config.margin.top)
    }

    /// Declarative scene of the live chart at the current clock.
    pub fn build_scene(&self) -> ChartResult<LayeredScene> {
        Ok(build_scene(self.live()?, &self.config, self.clock))
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        Ok(self.build_scene()?.flatten())
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        trace!(
            root = frame.root.raw(),
            paths = frame.paths.len(),
            rects = frame.rects.len(),
            "render frame"
        );
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    pub(super) fn live(&self) -> ChartResult<&ChartInstance> {
        self.instance.as_ref().ok_or(ChartError::NoChart)
    }

    pub(super) fn live_mut(&mut self) -> ChartResult<&mut ChartInstance> {
        self.instance.as_mut().ok_or(ChartError::NoChart)
    }

    /// Moves the clock forward; readings from the past are ignored.
    pub(super) fn advance_clock(&mut self, now: Duration) {
        self.clock = self.clock.max(now);
    }
}
