use std::ops::Range;

use crate::core::{CanvasSize, Margin, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasLayerKind, CanvasRootId, CirclePrimitive, LinePrimitive, PathPrimitive, RectPrimitive,
    TextPrimitive, TooltipOverlay,
};

/// Primitives one canvas layer contributed to a flattened frame, as index
/// ranges into the frame's per-kind buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayer {
    /// `None` for the single catch-all pass of a frame built without layers.
    pub kind: Option<CanvasLayerKind>,
    pub lines: Range<usize>,
    pub rects: Range<usize>,
    pub texts: Range<usize>,
    pub paths: Range<usize>,
    pub circles: Range<usize>,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Primitive coordinates are in plot space; backends translate by
/// `margin.left`/`margin.top` to reach canvas space.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub root: CanvasRootId,
    pub viewport: Viewport,
    pub margin: Margin,
    /// Region clipped paths are confined to.
    pub clip: RectPrimitive,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    /// Paint order, bottom to top. Empty means one pass over everything.
    pub layers: Vec<FrameLayer>,
    pub tooltip: Option<TooltipOverlay>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(root: CanvasRootId, viewport: Viewport, margin: Margin) -> Self {
        Self {
            root,
            viewport,
            margin,
            clip: RectPrimitive::new(
                0.0,
                0.0,
                viewport.width_px(),
                viewport.height_px(),
                crate::render::Color::TRANSPARENT,
            ),
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            paths: Vec::new(),
            circles: Vec::new(),
            layers: Vec::new(),
            tooltip: None,
        }
    }

    /// Layers in paint order; backends draw each pass completely before the
    /// next one.
    #[must_use]
    pub fn paint_passes(&self) -> Vec<FrameLayer> {
        if !self.layers.is_empty() {
            return self.layers.clone();
        }
        vec![FrameLayer {
            kind: None,
            lines: 0..self.lines.len(),
            rects: 0..self.rects.len(),
            texts: 0..self.texts.len(),
            paths: 0..self.paths.len(),
            circles: 0..self.circles.len(),
        }]
    }

    /// Position of `kind` in the paint order, if the frame records layers.
    #[must_use]
    pub fn paint_position(&self, kind: CanvasLayerKind) -> Option<usize> {
        self.layers.iter().position(|layer| layer.kind == Some(kind))
    }

    #[must_use]
    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::from_viewport(self.viewport, self.margin)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.margin.validate()?;
        self.clip.validate()?;

        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for layer in &self.layers {
            if layer.lines.end > self.lines.len()
                || layer.rects.end > self.rects.len()
                || layer.texts.end > self.texts.len()
                || layer.paths.end > self.paths.len()
                || layer.circles.end > self.circles.len()
            {
                return Err(ChartError::InvalidData(
                    "frame layer range exceeds primitive buffers".to_owned(),
                ));
            }
        }
        if let Some(tooltip) = &self.tooltip {
            tooltip.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
            && self.paths.is_empty()
            && self.circles.is_empty()
    }
}
