use crate::core::{NearestPointIndex, Sample, TimeScale, ValueScale};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

/// Projected polyline vertex in plot pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

/// Invisible hover band covering one consecutive sample pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairBand {
    /// Index of the left sample of the pair.
    pub start_index: usize,
    pub x: f64,
    pub width: f64,
}

impl PairBand {
    /// Band of the pair starting at `start_index`; `None` past the last pair.
    #[must_use]
    pub fn for_pair(samples: &[Sample], start_index: usize, time_scale: TimeScale) -> Option<Self> {
        let left = samples.get(start_index)?;
        let right = samples.get(start_index.checked_add(1)?)?;
        let x = time_scale.time_to_x(left.time);
        Some(Self {
            start_index,
            x,
            width: time_scale.time_to_x(right.time) - x,
        })
    }

    #[must_use]
    pub fn contains_x(self, x: f64) -> bool {
        x >= self.x && x <= self.x + self.width
    }
}

/// Projects samples into a single connected polyline.
///
/// The function is deterministic and side-effect free so both rendering and
/// tests can consume the exact same geometry output.
#[must_use]
pub fn project_line_path(
    samples: &[Sample],
    time_scale: TimeScale,
    value_scale: ValueScale,
) -> Vec<PathPoint> {
    let project = |sample: &Sample| PathPoint {
        x: time_scale.time_to_x(sample.time),
        y: value_scale.value_to_y(sample.value),
    };

    #[cfg(feature = "parallel-projection")]
    {
        samples.par_iter().map(project).collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        samples.iter().map(project).collect()
    }
}

/// Total euclidean length of a polyline.
#[must_use]
pub fn path_length(points: &[PathPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[1].x - pair[0].x).hypot(pair[1].y - pair[0].y))
        .sum()
}

/// One band per consecutive sample pair, spanning the pair's x extent.
#[must_use]
pub fn project_pair_bands(samples: &[Sample], time_scale: TimeScale) -> Vec<PairBand> {
    (0..samples.len().saturating_sub(1))
        .filter_map(|start_index| PairBand::for_pair(samples, start_index, time_scale))
        .collect()
}

/// Band under plot `x`, located by bisection over the sample times.
///
/// Bands share their edges, so a point on an edge resolves to the left band.
#[must_use]
pub fn pair_band_at_x(samples: &[Sample], x: f64, time_scale: TimeScale) -> Option<PairBand> {
    let last_pair = samples.len().checked_sub(2)?;
    let insertion = NearestPointIndex::new(samples).insertion_point(time_scale.x_to_time(x));
    let guess = insertion.saturating_sub(1).min(last_pair);

    // Inverting x can land one ulp across an edge; the neighbours settle it.
    [guess.checked_sub(1), Some(guess), Some(guess + 1)]
        .into_iter()
        .flatten()
        .filter(|&start_index| start_index <= last_pair)
        .filter_map(|start_index| PairBand::for_pair(samples, start_index, time_scale))
        .find(|band| band.contains_x(x))
}
