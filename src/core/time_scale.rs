use crate::core::{LinearScale, SampleSeries, Viewport};
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Time axis model with separate full and visible ranges.
///
/// `full_*` tracks the extent of the supplied series and never changes for
/// the lifetime of a chart. The visible range is what brushing rescales.
/// Time always maps onto `[0, viewport.width]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    full_start: f64,
    full_end: f64,
    visible: LinearScale,
}

impl TimeScale {
    /// Creates a scale with matching full and visible ranges.
    pub fn new(time_start: f64, time_end: f64, viewport: Viewport) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        let (start, end) = normalize_range(time_start, time_end)?;
        Ok(Self {
            full_start: start,
            full_end: end,
            visible: LinearScale::new(start, end, 0.0, viewport.width_px())?,
        })
    }

    /// Fits both ranges to the series extent.
    pub fn from_series(series: &SampleSeries, viewport: Viewport) -> ChartResult<Self> {
        let (start, end) = series.time_extent();
        Self::new(start, end, viewport)
    }

    #[must_use]
    pub fn full_range(self) -> (f64, f64) {
        (self.full_start, self.full_end)
    }

    #[must_use]
    pub fn visible_range(self) -> (f64, f64) {
        self.visible.domain()
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.visible.is_degenerate()
    }

    /// Overrides the visible range without modifying the full fitted range.
    pub fn set_visible_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        let (start, end) = normalize_range(start, end)?;
        self.visible = self.visible.with_domain(start, end);
        Ok(())
    }

    pub fn reset_visible_range_to_full(&mut self) {
        self.visible = self.visible.with_domain(self.full_start, self.full_end);
    }

    #[must_use]
    pub fn time_to_x(self, time: f64) -> f64 {
        self.visible.map(time)
    }

    #[must_use]
    pub fn x_to_time(self, x: f64) -> f64 {
        self.visible.invert(x)
    }

    /// Returns a copy whose visible range sits `t` of the way from `from` to `to`.
    #[must_use]
    pub fn interpolated(self, from: (f64, f64), to: (f64, f64), t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let start = from.0 + (to.0 - from.0) * t;
        let end = from.1 + (to.1 - from.1) * t;
        Self {
            visible: self.visible.with_domain(start, end),
            ..self
        }
    }
}

fn normalize_range(start: f64, end: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "time range must be finite".to_owned(),
        ));
    }

    Ok((start.min(end), start.max(end)))
}
