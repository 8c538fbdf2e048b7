use serde::{Deserialize, Serialize};

/// Canvas layers of one chart, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    /// Focus marker group, painted first.
    Marker,
    Axis,
    Label,
    /// Clipped series path.
    Series,
    /// Invisible hover bands.
    Interaction,
    /// Brush selection overlay.
    Brush,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLayerStack {
    pub layers: Vec<CanvasLayerKind>,
}

impl ChartLayerStack {
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            layers: vec![
                CanvasLayerKind::Marker,
                CanvasLayerKind::Axis,
                CanvasLayerKind::Label,
                CanvasLayerKind::Series,
                CanvasLayerKind::Interaction,
                CanvasLayerKind::Brush,
            ],
        }
    }
}
