mod idle_timer;
mod mode;

pub use idle_timer::IdleTimer;
pub use mode::{ChartMode, ChartTimings, ModePolicy, StrokeKind};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Observable state of the interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionPhase {
    Idle,
    /// Pointer over the hover surface (Tooltip Mode only).
    Hovering,
    /// Drag in progress over the brush overlay (Brush Mode only).
    Selecting,
    /// One empty release seen; a second one before the idle timer fires
    /// resets the chart (Brush Mode only).
    PendingReset,
}

/// Horizontal brush selection in plot pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSelection {
    pub anchor_x: f64,
    pub current_x: f64,
}

impl BrushSelection {
    /// Ordered `(left, right)` edges.
    #[must_use]
    pub fn edges(self) -> (f64, f64) {
        (
            self.anchor_x.min(self.current_x),
            self.anchor_x.max(self.current_x),
        )
    }

    #[must_use]
    pub fn width(self) -> f64 {
        (self.current_x - self.anchor_x).abs()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width() == 0.0
    }
}

/// What a brush release asks the chart to do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BrushRelease {
    /// Non-empty selection: rescale the time domain to these pixel edges.
    Rescale { left_x: f64, right_x: f64 },
    /// First empty release: the idle timer is now armed.
    ArmedReset,
    /// Second empty release inside the debounce window.
    Reset,
    /// No drag was in progress.
    Ignored,
}

/// Detects two clicks close together in time and space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleClickDetector {
    window: Duration,
    slop_px: f64,
    last: Option<(Duration, f64, f64)>,
}

impl DoubleClickDetector {
    #[must_use]
    pub fn new(window: Duration, slop_px: f64) -> Self {
        Self {
            window,
            slop_px,
            last: None,
        }
    }

    /// Registers a click and returns `true` when it completes a double click.
    pub fn register(&mut self, now: Duration, x: f64, y: f64) -> bool {
        let is_double = self.last.is_some_and(|(at, last_x, last_y)| {
            now.saturating_sub(at) <= self.window
                && (x - last_x).abs() <= self.slop_px
                && (y - last_y).abs() <= self.slop_px
        });
        self.last = if is_double { None } else { Some((now, x, y)) };
        is_double
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Pointer-driven state for one chart instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: ChartMode,
    phase: InteractionPhase,
    cursor: Option<(f64, f64)>,
    selection: Option<BrushSelection>,
    idle_timer: IdleTimer,
    clicks: DoubleClickDetector,
}

/// Clicks further apart than this many pixels never pair up.
const DOUBLE_CLICK_SLOP_PX: f64 = 4.0;

impl InteractionState {
    #[must_use]
    pub fn new(mode: ChartMode, timings: ChartTimings) -> Self {
        Self {
            mode,
            phase: InteractionPhase::Idle,
            cursor: None,
            selection: None,
            idle_timer: IdleTimer::new(timings.idle_reset_delay()),
            clicks: DoubleClickDetector::new(timings.double_click_window(), DOUBLE_CLICK_SLOP_PX),
        }
    }

    #[must_use]
    pub fn mode(self) -> ChartMode {
        self.mode
    }

    #[must_use]
    pub fn phase(self) -> InteractionPhase {
        self.phase
    }

    #[must_use]
    pub fn cursor(self) -> Option<(f64, f64)> {
        self.cursor
    }

    /// Selection currently being dragged, if any.
    #[must_use]
    pub fn selection(self) -> Option<BrushSelection> {
        self.selection
    }

    #[must_use]
    pub fn idle_timer(self) -> IdleTimer {
        self.idle_timer
    }

    /// Returns `false` when the pointer event does not apply to this mode.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        if self.mode != ChartMode::Tooltip {
            return false;
        }
        self.cursor = Some((x, y));
        self.phase = InteractionPhase::Hovering;
        true
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        if self.phase == InteractionPhase::Hovering {
            self.phase = InteractionPhase::Idle;
        }
    }

    /// Starts a drag. Any armed idle timer keeps running.
    pub fn on_brush_start(&mut self, x: f64) -> bool {
        if self.mode != ChartMode::Brush {
            return false;
        }
        self.selection = Some(BrushSelection {
            anchor_x: x,
            current_x: x,
        });
        self.phase = InteractionPhase::Selecting;
        true
    }

    pub fn on_brush_move(&mut self, x: f64) -> bool {
        match self.selection.as_mut() {
            Some(selection) if self.phase == InteractionPhase::Selecting => {
                selection.current_x = x;
                true
            }
            _ => false,
        }
    }

    pub fn on_brush_end(&mut self, now: Duration) -> BrushRelease {
        if self.phase != InteractionPhase::Selecting {
            return BrushRelease::Ignored;
        }
        let Some(selection) = self.selection.take() else {
            return BrushRelease::Ignored;
        };

        if !selection.is_empty() {
            self.idle_timer.cancel();
            self.phase = InteractionPhase::Idle;
            let (left_x, right_x) = selection.edges();
            return BrushRelease::Rescale { left_x, right_x };
        }

        if self.idle_timer.is_pending(now) {
            self.idle_timer.cancel();
            self.phase = InteractionPhase::Idle;
            return BrushRelease::Reset;
        }

        self.idle_timer.arm(now);
        self.phase = InteractionPhase::PendingReset;
        BrushRelease::ArmedReset
    }

    /// Advances the idle timer. Returns `true` when a pending reset lapsed.
    pub fn tick(&mut self, now: Duration) -> bool {
        if !self.idle_timer.poll(now) {
            return false;
        }
        if self.phase == InteractionPhase::PendingReset {
            self.phase = InteractionPhase::Idle;
        }
        true
    }

    /// Returns `true` when the click completes a double click.
    pub fn on_click(&mut self, now: Duration, x: f64, y: f64) -> bool {
        self.clicks.register(now, x, y)
    }
}
