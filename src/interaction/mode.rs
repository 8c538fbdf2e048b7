use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Interaction behavior selected by the caller at `create` time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChartMode {
    /// Hover tooltip with a focus marker and an animated path reveal.
    #[default]
    Tooltip,
    /// Drag-to-zoom over the time axis, with a double-activation reset.
    Brush,
}

/// How the series path is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeKind {
    /// Vertical value gradient.
    Gradient,
    Solid,
}

/// Fixed durations used by transitions and gesture detection, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartTimings {
    pub axis_fade_ms: u64,
    pub path_reveal_ms: u64,
    pub rescale_transition_ms: u64,
    pub idle_reset_delay_ms: u64,
    pub double_click_window_ms: u64,
}

impl Default for ChartTimings {
    fn default() -> Self {
        Self {
            axis_fade_ms: 500,
            path_reveal_ms: 3_500,
            rescale_transition_ms: 1_000,
            idle_reset_delay_ms: 350,
            double_click_window_ms: 500,
        }
    }
}

impl ChartTimings {
    pub fn validate(self) -> ChartResult<Self> {
        if self.idle_reset_delay_ms == 0 {
            return Err(ChartError::InvalidData(
                "idle reset delay must be > 0 ms".to_owned(),
            ));
        }
        if self.double_click_window_ms == 0 {
            return Err(ChartError::InvalidData(
                "double click window must be > 0 ms".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn idle_reset_delay(self) -> Duration {
        Duration::from_millis(self.idle_reset_delay_ms)
    }

    #[must_use]
    pub fn double_click_window(self) -> Duration {
        Duration::from_millis(self.double_click_window_ms)
    }

    #[must_use]
    pub fn rescale_transition(self) -> Duration {
        Duration::from_millis(self.rescale_transition_ms)
    }
}

/// Per-mode render and interaction policy.
///
/// One shared pipeline consults this table instead of branching into two
/// parallel implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModePolicy {
    /// Axis fade-in duration; zero renders axes immediately.
    pub axis_fade: Duration,
    /// Path dash-reveal duration; `None` draws the path at once.
    pub path_reveal: Option<Duration>,
    pub stroke: StrokeKind,
    /// Attach one invisible hover band per consecutive sample pair.
    pub hover_surface: bool,
    /// Attach the full-height brush selection overlay.
    pub brush_overlay: bool,
}

impl ChartMode {
    #[must_use]
    pub fn policy(self, timings: ChartTimings) -> ModePolicy {
        match self {
            Self::Tooltip => ModePolicy {
                axis_fade: Duration::from_millis(timings.axis_fade_ms),
                path_reveal: Some(Duration::from_millis(timings.path_reveal_ms)),
                stroke: StrokeKind::Gradient,
                hover_surface: true,
                brush_overlay: false,
            },
            Self::Brush => ModePolicy {
                axis_fade: Duration::ZERO,
                path_reveal: None,
                stroke: StrokeKind::Solid,
                hover_surface: false,
                brush_overlay: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartMode, ChartTimings, StrokeKind};
    use std::time::Duration;

    #[test]
    fn modes_attach_mutually_exclusive_surfaces() {
        let timings = ChartTimings::default();
        let tooltip = ChartMode::Tooltip.policy(timings);
        let brush = ChartMode::Brush.policy(timings);

        assert!(tooltip.hover_surface && !tooltip.brush_overlay);
        assert!(brush.brush_overlay && !brush.hover_surface);
        assert_eq!(tooltip.stroke, StrokeKind::Gradient);
        assert_eq!(tooltip.path_reveal, Some(Duration::from_millis(3_500)));
        assert_eq!(brush.path_reveal, None);
        assert_eq!(brush.axis_fade, Duration::ZERO);
    }

    #[test]
    fn zero_idle_delay_is_rejected() {
        let timings = ChartTimings {
            idle_reset_delay_ms: 0,
            ..ChartTimings::default()
        };
        assert!(timings.validate().is_err());
    }
}
