use indexmap::IndexSet;

use crate::error::ChartResult;
use crate::render::{CanvasRootId, RenderFrame, Renderer, TooltipOverlay};

/// Headless renderer used by tests and engine usage without a display.
///
/// It validates every frame and tracks which canvas roots and tooltip
/// overlays are currently mounted, the way a real host tree would.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_frame: Option<RenderFrame>,
    pub frames_rendered: usize,
    pub teardowns: usize,
    live_roots: IndexSet<CanvasRootId>,
    live_overlays: IndexSet<CanvasRootId>,
}

impl NullRenderer {
    #[must_use]
    pub fn live_canvas_roots(&self) -> usize {
        self.live_roots.len()
    }

    #[must_use]
    pub fn live_tooltip_overlays(&self) -> usize {
        self.live_overlays.len()
    }

    #[must_use]
    pub fn last_tooltip(&self) -> Option<&TooltipOverlay> {
        self.last_frame.as_ref()?.tooltip.as_ref()
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.live_roots.insert(frame.root);
        if frame.tooltip.is_some() {
            self.live_overlays.insert(frame.root);
        }
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn teardown(&mut self, root: CanvasRootId) -> ChartResult<()> {
        self.live_roots.shift_remove(&root);
        self.live_overlays.shift_remove(&root);
        if self
            .last_frame
            .as_ref()
            .is_some_and(|frame| frame.root == root)
        {
            self.last_frame = None;
        }
        self.teardowns += 1;
        Ok(())
    }
}
