use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    PairBand, Sample, SampleSeries, TimeScale, ValueScale, Viewport, pair_band_at_x,
};
use crate::error::ChartResult;
use crate::interaction::{ChartMode, InteractionState, ModePolicy};
use crate::render::{CanvasRootId, Easing, TooltipOverlay, Transition};

use super::ChartEngineConfig;

/// Focus marker placed on the sample nearest the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusMarker {
    pub index: usize,
    pub sample: Sample,
    /// Plot-space center of the marker.
    pub x: f64,
    pub y: f64,
}

/// Visible time range animating from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct RescaleTransition {
    pub(super) from: (f64, f64),
    pub(super) to: (f64, f64),
    pub(super) transition: Transition,
}

/// Live state of the single chart mounted on a host.
///
/// Everything a handler needs lives here, so dropping the instance is the
/// whole teardown: its idle timer and in-flight transitions go with it.
#[derive(Debug, Clone)]
pub(super) struct ChartInstance {
    pub(super) root: CanvasRootId,
    /// Series supplied to `create`; reset always rebuilds from it.
    pub(super) series: SampleSeries,
    pub(super) mode: ChartMode,
    pub(super) label: String,
    pub(super) policy: ModePolicy,
    /// Target scale. Brushing and pointer inversion read this one even while a
    /// rescale transition is still drawing intermediate frames.
    pub(super) time_scale: TimeScale,
    pub(super) value_scale: ValueScale,
    pub(super) interaction: InteractionState,
    pub(super) axis_fade: Transition,
    pub(super) path_reveal: Option<Transition>,
    pub(super) rescale: Option<RescaleTransition>,
    pub(super) focus: Option<FocusMarker>,
    pub(super) tooltip: Option<TooltipOverlay>,
}

impl ChartInstance {
    pub(super) fn new(
        root: CanvasRootId,
        series: SampleSeries,
        mode: ChartMode,
        label: String,
        config: &ChartEngineConfig,
        now: Duration,
    ) -> ChartResult<Self> {
        let time_scale = TimeScale::from_series(&series, config.viewport)?;
        let value_scale = ValueScale::from_series(&series, config.viewport)?;
        let policy = mode.policy(config.timings);

        Ok(Self {
            root,
            series,
            mode,
            label,
            policy,
            time_scale,
            value_scale,
            interaction: InteractionState::new(mode, config.timings),
            axis_fade: Transition::new(now, policy.axis_fade, Easing::CubicInOut),
            path_reveal: policy
                .path_reveal
                .map(|duration| Transition::new(now, duration, Easing::SinInOut)),
            rescale: None,
            focus: None,
            tooltip: policy.hover_surface.then(TooltipOverlay::hidden),
        })
    }

    /// Scale used for drawing at `now`, interpolated during a rescale.
    pub(super) fn drawn_time_scale(&self, now: Duration) -> TimeScale {
        match self.rescale {
            Some(rescale) if !rescale.transition.is_finished(now) => self.time_scale.interpolated(
                rescale.from,
                rescale.to,
                rescale.transition.progress(now),
            ),
            _ => self.time_scale,
        }
    }

    pub(super) fn is_animating(&self, now: Duration) -> bool {
        !self.axis_fade.is_finished(now)
            || self
                .path_reveal
                .is_some_and(|reveal| !reveal.is_finished(now))
            || self
                .rescale
                .is_some_and(|rescale| !rescale.transition.is_finished(now))
    }

    /// Drops a rescale transition that has run its course.
    pub(super) fn settle(&mut self, now: Duration) {
        if self
            .rescale
            .is_some_and(|rescale| rescale.transition.is_finished(now))
        {
            self.rescale = None;
        }
    }

    /// Pair hover band under a plot-space point, if this mode hit-tests.
    pub(super) fn hovered_band(&self, x: f64, y: f64, viewport: Viewport) -> Option<PairBand> {
        if !self.policy.hover_surface || self.time_scale.is_degenerate() || !viewport.contains(x, y)
        {
            return None;
        }
        pair_band_at_x(self.series.as_slice(), x, self.time_scale)
    }
}
