use std::f64::consts::PI;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing curve applied to linear transition progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Easing {
    Linear,
    /// Symmetric sine in/out.
    #[default]
    SinInOut,
    /// Symmetric cubic in/out.
    CubicInOut,
}

impl Easing {
    /// Eases `t`, clamped to `[0, 1]`. Endpoints are exact.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::SinInOut => (1.0 - (PI * t).cos()) / 2.0,
            Self::CubicInOut => {
                let doubled = t * 2.0;
                if doubled <= 1.0 {
                    doubled * doubled * doubled / 2.0
                } else {
                    let rest = doubled - 2.0;
                    (rest * rest * rest + 2.0) / 2.0
                }
            }
        }
    }
}

/// Time-based transition driven by the host's frame clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    started_at: Duration,
    duration: Duration,
    easing: Easing,
}

impl Transition {
    #[must_use]
    pub fn new(started_at: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            started_at,
            duration,
            easing,
        }
    }

    #[must_use]
    pub fn duration(self) -> Duration {
        self.duration
    }

    /// Raw progress in `[0, 1]`; a zero duration is always complete.
    #[must_use]
    pub fn linear_progress(self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn progress(self, now: Duration) -> f64 {
        self.easing.apply(self.linear_progress(now))
    }

    #[must_use]
    pub fn is_finished(self, now: Duration) -> bool {
        self.linear_progress(now) >= 1.0
    }
}
