use crate::core::{Margin, Viewport};

use super::{
    CanvasLayerKind, CanvasRootId, ChartLayerStack, CirclePrimitive, FrameLayer, LinePrimitive,
    PathPrimitive, RectPrimitive, RenderFrame, TextPrimitive, TooltipOverlay,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub circles: Vec<CirclePrimitive>,
}

impl LayerPrimitives {
    fn empty(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            paths: Vec::new(),
            circles: Vec::new(),
        }
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

/// Declarative chart scene grouped by canvas layer.
///
/// Built by a pure function of chart state, then flattened into a
/// [`RenderFrame`] for whichever backend applies it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredScene {
    pub root: CanvasRootId,
    pub viewport: Viewport,
    pub margin: Margin,
    pub layers: Vec<LayerPrimitives>,
    pub tooltip: Option<TooltipOverlay>,
}

impl LayeredScene {
    #[must_use]
    pub fn from_stack(
        root: CanvasRootId,
        viewport: Viewport,
        margin: Margin,
        stack: ChartLayerStack,
    ) -> Self {
        Self {
            root,
            viewport,
            margin,
            layers: stack.layers.into_iter().map(LayerPrimitives::empty).collect(),
            tooltip: None,
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    pub fn push_line(&mut self, kind: CanvasLayerKind, line: LinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.lines.push(line);
        }
    }

    pub fn push_rect(&mut self, kind: CanvasLayerKind, rect: RectPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.rects.push(rect);
        }
    }

    pub fn push_text(&mut self, kind: CanvasLayerKind, text: TextPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.texts.push(text);
        }
    }

    pub fn push_path(&mut self, kind: CanvasLayerKind, path: PathPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.paths.push(path);
        }
    }

    pub fn push_circle(&mut self, kind: CanvasLayerKind, circle: CirclePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.circles.push(circle);
        }
    }

    /// Concatenates the layers into one frame, recording each layer's slice
    /// of the primitive buffers so backends paint in stack order.
    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.root, self.viewport, self.margin);
        for layer in &self.layers {
            let lines_start = frame.lines.len();
            let rects_start = frame.rects.len();
            let texts_start = frame.texts.len();
            let paths_start = frame.paths.len();
            let circles_start = frame.circles.len();

            frame.lines.extend(layer.lines.iter().copied());
            frame.rects.extend(layer.rects.iter().copied());
            frame.texts.extend(layer.texts.iter().cloned());
            frame.paths.extend(layer.paths.iter().cloned());
            frame.circles.extend(layer.circles.iter().copied());

            frame.layers.push(FrameLayer {
                kind: Some(layer.kind),
                lines: lines_start..frame.lines.len(),
                rects: rects_start..frame.rects.len(),
                texts: texts_start..frame.texts.len(),
                paths: paths_start..frame.paths.len(),
                circles: circles_start..frame.circles.len(),
            });
        }
        frame.tooltip = self.tooltip.clone();
        frame
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> Option<&mut LayerPrimitives> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::LayeredScene;
    use crate::core::{Margin, Viewport};
    use crate::render::{
        CanvasLayerKind, CanvasRootId, ChartLayerStack, Color, LinePrimitive, RectPrimitive,
    };

    #[test]
    fn flatten_preserves_layer_order() {
        let mut scene = LayeredScene::from_stack(
            CanvasRootId::new(1),
            Viewport::new(100, 50),
            Margin::default(),
            ChartLayerStack::canonical(),
        );
        scene.push_rect(
            CanvasLayerKind::Brush,
            RectPrimitive::new(1.0, 0.0, 2.0, 50.0, Color::BLACK),
        );
        scene.push_rect(
            CanvasLayerKind::Interaction,
            RectPrimitive::new(0.0, 0.0, 5.0, 50.0, Color::TRANSPARENT),
        );
        scene.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(0.0, 50.0, 100.0, 50.0, 1.0, Color::BLACK),
        );

        let frame = scene.flatten();
        assert_eq!(frame.lines.len(), 1);
        assert_eq!(frame.rects.len(), 2);
        assert!(frame.rects[0].is_invisible());
        assert!(!frame.rects[1].is_invisible());

        let interaction = frame
            .paint_position(CanvasLayerKind::Interaction)
            .expect("interaction layer");
        let brush = frame.paint_position(CanvasLayerKind::Brush).expect("brush layer");
        assert!(brush > interaction);
        assert_eq!(frame.layers[brush].rects, 1..2);
        assert_eq!(frame.layers.len(), ChartLayerStack::canonical().layers.len());
        frame.validate().expect("layer ranges are in bounds");
    }

    #[test]
    fn frame_without_layers_paints_in_one_pass() {
        let frame = LayeredScene::from_stack(
            CanvasRootId::new(1),
            Viewport::new(100, 50),
            Margin::default(),
            ChartLayerStack { layers: Vec::new() },
        )
        .flatten();
        let passes = frame.paint_passes();
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].kind, None);
    }
}
