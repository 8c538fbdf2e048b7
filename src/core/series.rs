use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::Sample;
use crate::error::{ChartError, ChartResult};

/// Validated sample sequence: non-empty, finite, ascending by timestamp.
///
/// Equal consecutive timestamps are accepted; the nearest-point lookup only
/// requires a non-decreasing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sample>", into = "Vec<Sample>")]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    pub fn new(samples: Vec<Sample>) -> ChartResult<Self> {
        if samples.is_empty() {
            return Err(ChartError::EmptySeries);
        }

        for (index, sample) in samples.iter().enumerate() {
            if !sample.is_finite() {
                return Err(ChartError::NonFiniteSample { index });
            }
        }

        if let Some(index) = samples
            .windows(2)
            .position(|pair| pair[1].time < pair[0].time)
        {
            return Err(ChartError::UnsortedSeries { index: index + 1 });
        }

        Ok(Self { samples })
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Sample {
        self.samples[0]
    }

    #[must_use]
    pub fn last(&self) -> Sample {
        self.samples[self.samples.len() - 1]
    }

    /// Earliest and latest timestamp.
    #[must_use]
    pub fn time_extent(&self) -> (f64, f64) {
        (self.first().time, self.last().time)
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.samples
            .iter()
            .map(|sample| OrderedFloat(sample.value))
            .max()
            .map_or(0.0, |max| max.0)
    }

    /// Consecutive sample pairs, in order.
    pub fn pairs(&self) -> impl Iterator<Item = (Sample, Sample)> + '_ {
        self.samples.windows(2).map(|pair| (pair[0], pair[1]))
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Sample> {
        self.samples
    }
}

impl TryFrom<Vec<Sample>> for SampleSeries {
    type Error = ChartError;

    fn try_from(samples: Vec<Sample>) -> ChartResult<Self> {
        Self::new(samples)
    }
}

impl From<SampleSeries> for Vec<Sample> {
    fn from(series: SampleSeries) -> Self {
        series.samples
    }
}
