use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Identity of one chart's canvas root and its floating overlay.
///
/// A fresh id is allocated on every `create`, so a stale handle can never be
/// confused with the live chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanvasRootId(u64);

impl CanvasRootId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Selector a host can use to locate the canvas root for export.
    #[must_use]
    pub fn selector(self) -> String {
        format!("[data-brushline-root=\"{}\"]", self.0)
    }
}

/// Floating tooltip anchored at page coordinates, outside the canvas subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipOverlay {
    pub opacity: f64,
    pub page_x: f64,
    pub page_y: f64,
    pub date_text: String,
    pub value_text: String,
}

impl TooltipOverlay {
    /// Overlay that exists but is not shown yet.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            page_x: 0.0,
            page_y: 0.0,
            date_text: String::new(),
            value_text: String::new(),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(
                "tooltip opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !self.page_x.is_finite() || !self.page_y.is_finite() {
            return Err(ChartError::InvalidData(
                "tooltip position must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
