use std::time::Duration;

use tracing::debug;

use crate::core::{Sample, SampleSeries};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ChartMode;
use crate::render::{CanvasRootId, Renderer};

use super::ChartEngine;
use super::chart_instance::ChartInstance;

impl<R: Renderer> ChartEngine<R> {
    /// Builds a chart from `samples`, replacing whatever the host showed.
    ///
    /// Input is validated before anything is torn down, so a rejected call
    /// leaves the previous chart untouched. Returns the new canvas root.
    ///
    /// Entry transitions start at the last clock reading the host supplied.
    /// Hosts whose clock has moved on since then should use
    /// [`Self::create_at`].
    pub fn create(
        &mut self,
        samples: Vec<Sample>,
        mode: ChartMode,
        label: impl Into<String>,
    ) -> ChartResult<CanvasRootId> {
        let series = SampleSeries::new(samples)?;
        self.create_from_series(series, mode, label.into())
    }

    /// Same as [`Self::create`], with entry transitions starting at `now`.
    pub fn create_at(
        &mut self,
        samples: Vec<Sample>,
        mode: ChartMode,
        label: impl Into<String>,
        now: Duration,
    ) -> ChartResult<CanvasRootId> {
        let series = SampleSeries::new(samples)?;
        self.advance_clock(now);
        self.create_from_series(series, mode, label.into())
    }

    /// Same as [`Self::create`] for an already validated series.
    pub fn create_from_series(
        &mut self,
        series: SampleSeries,
        mode: ChartMode,
        label: String,
    ) -> ChartResult<CanvasRootId> {
        let root = CanvasRootId::new(self.next_root);
        let instance = ChartInstance::new(root, series, mode, label, &self.config, self.clock)?;

        self.teardown_current()?;
        self.next_root += 1;

        debug!(
            root = root.raw(),
            mode = ?instance.mode,
            samples = instance.series.len(),
            time_start = instance.time_scale.full_range().0,
            time_end = instance.time_scale.full_range().1,
            value_max = instance.value_scale.domain_max(),
            "chart created"
        );
        self.instance = Some(instance);
        self.render()?;
        Ok(root)
    }

    /// Rebuilds the chart from the samples, mode and label given to the last
    /// `create`, discarding zoom and hover state.
    pub fn reset(&mut self) -> ChartResult<CanvasRootId> {
        self.reset_at(self.clock)
    }

    /// Same as [`Self::reset`], with entry transitions starting at `now`.
    pub fn reset_at(&mut self, now: Duration) -> ChartResult<CanvasRootId> {
        let instance = self.live()?;
        let series = instance.series.clone();
        let mode = instance.mode;
        let label = instance.label.clone();
        debug!(root = instance.root.raw(), "chart reset requested");
        self.advance_clock(now);
        self.create_from_series(series, mode, label)
    }

    /// Removes the live chart from the host, if any.
    pub fn destroy(&mut self) -> ChartResult<()> {
        if self.instance.is_none() {
            return Err(ChartError::NoChart);
        }
        self.teardown_current()
    }

    /// Detaches the canvas root and tooltip overlay of the live chart.
    ///
    /// Dropping the instance also drops its idle timer and transitions, so no
    /// handler can fire against a replaced scale afterwards.
    fn teardown_current(&mut self) -> ChartResult<()> {
        let Some(instance) = self.instance.take() else {
            return Ok(());
        };
        self.renderer.teardown(instance.root)?;
        debug!(
            root = instance.root.raw(),
            idle_reset_pending = instance.interaction.idle_timer().is_pending(self.clock),
            "chart torn down"
        );
        Ok(())
    }
}
