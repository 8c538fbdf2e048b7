use serde::{Deserialize, Serialize};

use crate::core::{Sample, SampleSeries, TimeScale};

/// Sample selected by a nearest-point lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestHit {
    pub index: usize,
    pub sample: Sample,
}

/// Bisection index over an ascending sample sequence.
///
/// Lookups are `O(log n)` so they can run on every pointer move.
#[derive(Debug, Clone, Copy)]
pub struct NearestPointIndex<'a> {
    samples: &'a [Sample],
}

impl<'a> NearestPointIndex<'a> {
    /// Wraps an already-sorted slice. Order is not re-checked here.
    #[must_use]
    pub fn new(samples: &'a [Sample]) -> Self {
        Self { samples }
    }

    #[must_use]
    pub fn from_series(series: &'a SampleSeries) -> Self {
        Self::new(series.as_slice())
    }

    /// First position whose timestamp is `>= time`.
    #[must_use]
    pub fn insertion_point(&self, time: f64) -> usize {
        self.samples.partition_point(|sample| sample.time < time)
    }

    /// Sample closest in time to `time`; ties go to the earlier sample.
    ///
    /// Returns `None` only for an empty slice.
    #[must_use]
    pub fn nearest_to_time(&self, time: f64) -> Option<NearestHit> {
        let last = self.samples.len().checked_sub(1)?;
        let insertion = self.insertion_point(time);

        let index = if insertion == 0 {
            0
        } else if insertion > last {
            last
        } else {
            let before = insertion - 1;
            let before_distance = time - self.samples[before].time;
            let after_distance = self.samples[insertion].time - time;
            if after_distance < before_distance {
                insertion
            } else {
                before
            }
        };

        Some(NearestHit {
            index,
            sample: self.samples[index],
        })
    }

    /// Inverts `x` through the time scale, then runs [`Self::nearest_to_time`].
    #[must_use]
    pub fn nearest_to_x(&self, x: f64, time_scale: TimeScale) -> Option<NearestHit> {
        self.nearest_to_time(time_scale.x_to_time(x))
    }
}
