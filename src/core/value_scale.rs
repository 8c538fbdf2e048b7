use crate::core::{LinearScale, SampleSeries, Viewport};
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Value axis model mapped to an inverted Y pixel axis.
///
/// The domain floor is pinned at zero, so `value_to_y(0) == height` and
/// `value_to_y(max) == 0`. A zero maximum yields a degenerate scale that
/// places every sample on the vertical midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    linear: LinearScale,
}

impl ValueScale {
    pub fn new(domain_max: f64, viewport: Viewport) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        if !domain_max.is_finite() {
            return Err(ChartError::InvalidData(
                "value domain max must be finite".to_owned(),
            ));
        }
        Ok(Self {
            linear: LinearScale::new(0.0, domain_max, viewport.height_px(), 0.0)?,
        })
    }

    pub fn from_series(series: &SampleSeries, viewport: Viewport) -> ChartResult<Self> {
        Self::new(series.max_value(), viewport)
    }

    /// `(0, max)` value domain.
    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn domain_max(self) -> f64 {
        self.linear.domain().1
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.linear.is_degenerate()
    }

    #[must_use]
    pub fn value_to_y(self, value: f64) -> f64 {
        self.linear.map(value)
    }

    #[must_use]
    pub fn y_to_value(self, y: f64) -> f64 {
        self.linear.invert(y)
    }
}

#[cfg(test)]
mod tests {
    use super::ValueScale;
    use crate::core::Viewport;

    #[test]
    fn zero_and_max_hit_plot_edges() {
        let scale = ValueScale::new(80.0, Viewport::new(1200, 600)).expect("valid scale");
        assert_eq!(scale.value_to_y(0.0), 600.0);
        assert_eq!(scale.value_to_y(80.0), 0.0);
        assert_eq!(scale.y_to_value(300.0), 40.0);
    }

    #[test]
    fn all_zero_values_produce_degenerate_but_usable_scale() {
        let scale = ValueScale::new(0.0, Viewport::new(1200, 600)).expect("zero max is allowed");
        assert!(scale.is_degenerate());
        assert_eq!(scale.value_to_y(0.0), 300.0);
    }
}
