use serde::{Deserialize, Serialize};

use crate::core::{Margin, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ChartTimings;
use crate::render::Color;

/// Visual constants of the chart scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Gradient color at value zero.
    pub gradient_low: Color,
    /// Gradient color at the value maximum.
    pub gradient_high: Color,
    /// Path color when the mode uses a solid stroke.
    pub solid_stroke: Color,
    pub stroke_width: f64,
    pub focus_radius: f64,
    pub focus_fill: Color,
    pub focus_stroke: Color,
    pub focus_stroke_width: f64,
    pub tooltip_opacity: f64,
    pub axis_color: Color,
    pub axis_line_width: f64,
    pub axis_tick_size_px: f64,
    pub axis_font_size_px: f64,
    pub label_color: Color,
    pub label_font_size_px: f64,
    pub brush_fill: Color,
    pub brush_border: Color,
    pub time_tick_count: usize,
    pub value_tick_count: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            gradient_low: Color::RED,
            gradient_high: Color::BLUE,
            solid_stroke: Color::STEEL_BLUE,
            stroke_width: 1.8,
            focus_radius: 4.5,
            focus_fill: Color::GREY,
            focus_stroke: Color::BLACK,
            focus_stroke_width: 1.0,
            tooltip_opacity: 0.9,
            axis_color: Color::BLACK,
            axis_line_width: 1.0,
            axis_tick_size_px: 6.0,
            axis_font_size_px: 10.0,
            label_color: Color::BLACK,
            label_font_size_px: 12.0,
            brush_fill: Color::rgba(0.467, 0.467, 0.467, 0.3),
            brush_border: Color::rgb(1.0, 1.0, 1.0),
            time_tick_count: 10,
            value_tick_count: 10,
        }
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub timings: ChartTimings,
    #[serde(default)]
    pub style: ChartStyle,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self::new(Viewport::new(1200, 600))
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margin: Margin::default(),
            timings: ChartTimings::default(),
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_timings(mut self, timings: ChartTimings) -> Self {
        self.timings = timings;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.viewport.ensure_valid()?;
        self.margin.validate()?;
        self.timings.validate()?;
        validate_style(self.style)?;
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()
    }
}

fn validate_style(style: ChartStyle) -> ChartResult<()> {
    for color in [
        style.gradient_low,
        style.gradient_high,
        style.solid_stroke,
        style.focus_fill,
        style.focus_stroke,
        style.axis_color,
        style.label_color,
        style.brush_fill,
        style.brush_border,
    ] {
        color.validate()?;
    }

    for (name, value) in [
        ("stroke width", style.stroke_width),
        ("focus radius", style.focus_radius),
        ("focus stroke width", style.focus_stroke_width),
        ("axis line width", style.axis_line_width),
        ("axis font size", style.axis_font_size_px),
        ("label font size", style.label_font_size_px),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{name} must be finite and > 0"
            )));
        }
    }

    if !style.axis_tick_size_px.is_finite() || style.axis_tick_size_px < 0.0 {
        return Err(ChartError::InvalidData(
            "axis tick size must be finite and >= 0".to_owned(),
        ));
    }
    if !style.tooltip_opacity.is_finite() || !(0.0..=1.0).contains(&style.tooltip_opacity) {
        return Err(ChartError::InvalidData(
            "tooltip opacity must be in [0, 1]".to_owned(),
        ));
    }
    if style.time_tick_count == 0 || style.value_tick_count == 0 {
        return Err(ChartError::InvalidData(
            "tick counts must be > 0".to_owned(),
        ));
    }
    Ok(())
}
