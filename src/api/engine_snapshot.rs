use serde::{Deserialize, Serialize};

use crate::core::{Margin, Sample, Viewport};
use crate::error::ChartResult;
use crate::interaction::{BrushSelection, ChartMode, InteractionPhase};
use crate::render::{CanvasRootId, Renderer, TooltipOverlay};

use super::ChartEngine;
use super::chart_instance::FocusMarker;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub margin: Margin,
    pub root: CanvasRootId,
    pub mode: ChartMode,
    pub label: String,
    pub time_full_range: (f64, f64),
    pub time_visible_range: (f64, f64),
    pub value_domain: (f64, f64),
    pub phase: InteractionPhase,
    pub focus: Option<FocusMarker>,
    pub tooltip: Option<TooltipOverlay>,
    pub brush_selection: Option<BrushSelection>,
    pub reset_pending: bool,
    pub samples: Vec<Sample>,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn snapshot(&self) -> ChartResult<ChartSnapshot> {
        let instance = self.live()?;
        Ok(ChartSnapshot {
            viewport: self.config.viewport,
            margin: self.config.margin,
            root: instance.root,
            mode: instance.mode,
            label: instance.label.clone(),
            time_full_range: instance.time_scale.full_range(),
            time_visible_range: instance.time_scale.visible_range(),
            value_domain: instance.value_scale.domain(),
            phase: instance.interaction.phase(),
            focus: instance.focus,
            tooltip: instance.tooltip.clone(),
            brush_selection: instance.interaction.selection(),
            reset_pending: instance.interaction.idle_timer().is_pending(self.clock),
            samples: instance.series.as_slice().to_vec(),
        })
    }
}
