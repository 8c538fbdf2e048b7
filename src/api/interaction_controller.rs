use std::time::Duration;

use tracing::{debug, trace};

use crate::core::{NearestHit, NearestPointIndex, PairBand};
use crate::error::ChartResult;
use crate::interaction::BrushRelease;
use crate::render::{CanvasRootId, Easing, Renderer, TooltipOverlay, Transition};

use super::ChartEngine;
use super::chart_instance::{FocusMarker, RescaleTransition};
use super::label_format::{format_tooltip_date, format_tooltip_value};

/// What a completed brush gesture did to the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushOutcome {
    /// Time domain moved to `(start, end)`.
    Rescaled { start: f64, end: f64 },
    /// Empty release; a second one within the idle delay resets the chart.
    ResetArmed,
    /// Chart rebuilt from its original samples under a new root.
    Reset(CanvasRootId),
    /// No drag was in progress or the mode has no brush.
    Ignored,
}

impl<R: Renderer> ChartEngine<R> {
    /// Pointer moved to plot coordinates `(x, y)`.
    ///
    /// The tooltip anchors at the equivalent page position inside the canvas.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<Option<FocusMarker>> {
        let margin = self.config.margin;
        self.pointer_move_at_page(x, y, x + margin.left, y + margin.top)
    }

    /// Pointer moved to plot coordinates `(x, y)`, seen by the host at page
    /// coordinates `(page_x, page_y)`.
    ///
    /// Returns the focused sample, or `None` when the pointer is off the hover
    /// surface (treated as a leave) or the mode has no hover surface.
    pub fn pointer_move_at_page(
        &mut self,
        x: f64,
        y: f64,
        page_x: f64,
        page_y: f64,
    ) -> ChartResult<Option<FocusMarker>> {
        let viewport = self.config.viewport;
        let opacity = self.config.style.tooltip_opacity;
        let instance = self.live_mut()?;

        if !instance.policy.hover_surface {
            trace!(x, y, mode = ?instance.mode, "pointer move ignored");
            return Ok(None);
        }
        let Some(band) = instance.hovered_band(x, y, viewport) else {
            if instance.focus.is_some() {
                self.pointer_leave()?;
            }
            return Ok(None);
        };

        // The band's own pair holds the nearest sample.
        let time_scale = instance.time_scale;
        let pair = instance
            .series
            .as_slice()
            .get(band.start_index..band.start_index + 2)
            .unwrap_or_default();
        let Some(local) = NearestPointIndex::new(pair).nearest_to_x(x, time_scale) else {
            return Ok(None);
        };
        let hit = NearestHit {
            index: band.start_index + local.index,
            sample: local.sample,
        };

        let focus = FocusMarker {
            index: hit.index,
            sample: hit.sample,
            x: time_scale.time_to_x(hit.sample.time),
            y: instance.value_scale.value_to_y(hit.sample.value),
        };
        instance.interaction.on_pointer_move(x, y);
        instance.focus = Some(focus);
        instance.tooltip = Some(TooltipOverlay {
            opacity,
            page_x,
            page_y,
            date_text: format_tooltip_date(hit.sample.time),
            value_text: format_tooltip_value(hit.sample.value),
        });
        trace!(x, index = hit.index, value = hit.sample.value, "nearest sample");

        self.render()?;
        Ok(Some(focus))
    }

    /// Pair hover band under plot `(x, y)`. `None` off the hover surface or in
    /// a mode without one.
    pub fn hover_band_at(&self, x: f64, y: f64) -> ChartResult<Option<PairBand>> {
        Ok(self.live()?.hovered_band(x, y, self.config.viewport))
    }

    /// Pointer left the hover surface: marker and tooltip fade out but stay
    /// mounted.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        let instance = self.live_mut()?;
        if !instance.policy.hover_surface {
            return Ok(());
        }
        instance.interaction.on_pointer_leave();
        instance.focus = None;
        if let Some(tooltip) = instance.tooltip.as_mut() {
            tooltip.opacity = 0.0;
        }
        self.render()
    }

    /// Drag started at plot x. Returns `false` outside Brush Mode.
    pub fn brush_start(&mut self, x: f64) -> ChartResult<bool> {
        let width = self.config.viewport.width_px();
        let instance = self.live_mut()?;
        if !instance.policy.brush_overlay {
            trace!(x, mode = ?instance.mode, "brush start ignored");
            return Ok(false);
        }
        if !instance.interaction.on_brush_start(x.clamp(0.0, width)) {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    pub fn brush_move(&mut self, x: f64) -> ChartResult<bool> {
        let width = self.config.viewport.width_px();
        let instance = self.live_mut()?;
        if !instance.interaction.on_brush_move(x.clamp(0.0, width)) {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Drag released at host time `now`.
    ///
    /// A non-empty selection rescales the time domain and clears the
    /// selection. An empty one arms the idle timer, or resets the chart when
    /// the timer was already armed.
    pub fn brush_end(&mut self, now: Duration) -> ChartResult<BrushOutcome> {
        self.advance_clock(now);
        let clock = self.clock;
        let rescale_duration = self.config.timings.rescale_transition();
        let instance = self.live_mut()?;

        match instance.interaction.on_brush_end(clock) {
            BrushRelease::Rescale { left_x, right_x } => {
                let from = instance.drawn_time_scale(clock).visible_range();
                let start = instance.time_scale.x_to_time(left_x);
                let end = instance.time_scale.x_to_time(right_x);
                instance.time_scale.set_visible_range(start, end)?;
                instance.rescale = Some(RescaleTransition {
                    from,
                    to: (start, end),
                    transition: Transition::new(clock, rescale_duration, Easing::CubicInOut),
                });
                debug!(left_x, right_x, start, end, "brush rescaled time domain");
                self.render()?;
                Ok(BrushOutcome::Rescaled { start, end })
            }
            BrushRelease::ArmedReset => {
                debug!("empty brush release; reset armed");
                self.render()?;
                Ok(BrushOutcome::ResetArmed)
            }
            BrushRelease::Reset => {
                debug!("second empty brush release; resetting chart");
                self.reset().map(BrushOutcome::Reset)
            }
            BrushRelease::Ignored => Ok(BrushOutcome::Ignored),
        }
    }

    /// Single click at plot coordinates. Returns the new root when the click
    /// completed a double click and the chart was reset.
    pub fn click(&mut self, x: f64, y: f64, now: Duration) -> ChartResult<Option<CanvasRootId>> {
        self.advance_clock(now);
        let clock = self.clock;
        let instance = self.live_mut()?;
        if !instance.interaction.on_click(clock, x, y) {
            return Ok(None);
        }
        debug!(x, y, "double click detected");
        self.reset().map(Some)
    }

    /// Native double-click from the host; always resets.
    pub fn double_click(&mut self, now: Duration) -> ChartResult<CanvasRootId> {
        self.advance_clock(now);
        debug!("double click; resetting chart");
        self.reset()
    }

    /// Advances host time: runs transitions and the idle timer.
    ///
    /// Returns `true` when a new frame was rendered.
    pub fn tick(&mut self, now: Duration) -> ChartResult<bool> {
        let previous = self.clock;
        self.advance_clock(now);
        let clock = self.clock;
        let Some(instance) = self.instance.as_mut() else {
            return Ok(false);
        };

        let was_animating = instance.is_animating(previous);
        let lapsed = instance.interaction.tick(clock);
        if lapsed {
            debug!("idle reset window lapsed; domain unchanged");
        }
        instance.settle(clock);

        if !was_animating && !lapsed {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Whether a transition is still running at the current clock.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.instance
            .as_ref()
            .is_some_and(|instance| instance.is_animating(self.clock))
    }
}
