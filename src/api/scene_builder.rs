use std::time::Duration;

use crate::core::{
    TimeScale, ValueScale, Viewport, path_length, project_line_path, project_pair_bands,
};
use crate::interaction::StrokeKind;
use crate::render::{
    CanvasLayerKind, ChartLayerStack, CirclePrimitive, Color, DashPattern, LayeredScene,
    LinePrimitive, LinearGradient, Paint, PathPrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};

use super::axis_ticks::{
    AXIS_TIME_MIN_SPACING_PX, format_time_tick, linear_ticks, select_ticks_with_min_spacing,
    select_time_interval, tick_step, time_ticks,
};
use super::chart_instance::ChartInstance;
use super::label_format::format_value_tick;
use super::{ChartEngineConfig, ChartStyle};

/// Gap between a tick mark and its label.
const AXIS_LABEL_PADDING_PX: f64 = 3.0;
/// Axis label anchor, relative to the plot origin.
const LABEL_OFFSET_X: f64 = -20.0;
const LABEL_OFFSET_Y: f64 = -10.0;
/// Tolerance when deciding whether a tick falls inside the plot.
const TICK_EDGE_EPSILON_PX: f64 = 1e-6;

/// Builds the declarative scene for `instance` at `now`.
///
/// Pure function of chart state: the same instance, config and clock always
/// produce the same scene.
pub(super) fn build_scene(
    instance: &ChartInstance,
    config: &ChartEngineConfig,
    now: Duration,
) -> LayeredScene {
    let viewport = config.viewport;
    let style = config.style;
    let time_scale = instance.drawn_time_scale(now);
    let value_scale = instance.value_scale;

    let mut scene = LayeredScene::from_stack(
        instance.root,
        viewport,
        config.margin,
        ChartLayerStack::canonical(),
    );

    push_axis_label(&mut scene, &instance.label, style);

    let axis_opacity = instance.axis_fade.progress(now);
    push_time_axis(&mut scene, time_scale, viewport, style, axis_opacity);
    push_value_axis(&mut scene, value_scale, viewport, style, axis_opacity);

    // A zero-width time domain has nothing meaningful to trace or hover.
    if !time_scale.is_degenerate() {
        push_series_path(&mut scene, instance, time_scale, style, now);
        if instance.policy.hover_surface {
            push_hover_bands(&mut scene, instance, time_scale, viewport);
        }
    }

    if instance.policy.hover_surface {
        push_focus_marker(&mut scene, instance, style);
    }
    if instance.policy.brush_overlay {
        push_brush_overlay(&mut scene, instance, viewport, style);
    }

    scene.tooltip = instance.tooltip.clone();
    scene
}

fn push_axis_label(scene: &mut LayeredScene, label: &str, style: ChartStyle) {
    if label.is_empty() {
        return;
    }
    scene.push_text(
        CanvasLayerKind::Label,
        TextPrimitive::new(
            label,
            LABEL_OFFSET_X,
            LABEL_OFFSET_Y - style.label_font_size_px,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Left,
        ),
    );
}

fn push_time_axis(
    scene: &mut LayeredScene,
    time_scale: TimeScale,
    viewport: Viewport,
    style: ChartStyle,
    opacity: f64,
) {
    let width = viewport.width_px();
    let height = viewport.height_px();
    let color = style.axis_color.faded(opacity);

    scene.push_line(
        CanvasLayerKind::Axis,
        LinePrimitive::new(0.0, height, width, height, style.axis_line_width, color),
    );

    let (start, end) = time_scale.visible_range();
    let interval = select_time_interval(start, end, style.time_tick_count);
    let ticks = time_ticks(start, end, interval)
        .into_iter()
        .map(|time| (time, time_scale.time_to_x(time)))
        .filter(|(_, x)| within_extent(*x, width))
        .collect();

    for (time, x) in select_ticks_with_min_spacing(ticks, AXIS_TIME_MIN_SPACING_PX) {
        scene.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(
                x,
                height,
                x,
                height + style.axis_tick_size_px,
                style.axis_line_width,
                color,
            ),
        );
        let text = format_time_tick(time);
        if !text.is_empty() {
            scene.push_text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    text,
                    x,
                    height + style.axis_tick_size_px + AXIS_LABEL_PADDING_PX,
                    style.axis_font_size_px,
                    color,
                    TextHAlign::Center,
                ),
            );
        }
    }
}

fn push_value_axis(
    scene: &mut LayeredScene,
    value_scale: ValueScale,
    viewport: Viewport,
    style: ChartStyle,
    opacity: f64,
) {
    let height = viewport.height_px();
    let color = style.axis_color.faded(opacity);

    scene.push_line(
        CanvasLayerKind::Axis,
        LinePrimitive::new(0.0, 0.0, 0.0, height, style.axis_line_width, color),
    );

    let (low, high) = value_scale.domain();
    let step = tick_step(low, high, style.value_tick_count);
    for value in linear_ticks(low, high, style.value_tick_count) {
        let y = value_scale.value_to_y(value);
        if !within_extent(y, height) {
            continue;
        }
        scene.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(
                -style.axis_tick_size_px,
                y,
                0.0,
                y,
                style.axis_line_width,
                color,
            ),
        );
        scene.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                format_value_tick(value, step),
                -style.axis_tick_size_px - AXIS_LABEL_PADDING_PX,
                y - style.axis_font_size_px / 2.0,
                style.axis_font_size_px,
                color,
                TextHAlign::Right,
            ),
        );
    }
}

fn push_series_path(
    scene: &mut LayeredScene,
    instance: &ChartInstance,
    time_scale: TimeScale,
    style: ChartStyle,
    now: Duration,
) {
    let points = project_line_path(instance.series.as_slice(), time_scale, instance.value_scale);

    let dash = instance
        .path_reveal
        .filter(|reveal| !reveal.is_finished(now))
        .map(|reveal| {
            let length = path_length(&points);
            DashPattern {
                dash: length * reveal.progress(now),
                gap: length,
            }
        });

    let paint = match instance.policy.stroke {
        StrokeKind::Gradient => {
            let value_scale = instance.value_scale;
            Paint::Gradient(LinearGradient::vertical(
                value_scale.value_to_y(0.0),
                value_scale.value_to_y(value_scale.domain_max()),
                style.gradient_low,
                style.gradient_high,
            ))
        }
        StrokeKind::Solid => Paint::Solid(style.solid_stroke),
    };

    scene.push_path(
        CanvasLayerKind::Series,
        PathPrimitive {
            points: points.iter().map(|point| (point.x, point.y)).collect(),
            stroke_width: style.stroke_width,
            paint,
            dash,
            round_joins: true,
            clipped: true,
        },
    );
}

fn push_hover_bands(
    scene: &mut LayeredScene,
    instance: &ChartInstance,
    time_scale: TimeScale,
    viewport: Viewport,
) {
    let height = viewport.height_px();
    for band in project_pair_bands(instance.series.as_slice(), time_scale) {
        scene.push_rect(
            CanvasLayerKind::Interaction,
            RectPrimitive::new(band.x, 0.0, band.width, height, Color::TRANSPARENT),
        );
    }
}

/// The marker always exists in hover-capable modes; it is hidden through
/// alpha so showing it again needs no new element.
fn push_focus_marker(scene: &mut LayeredScene, instance: &ChartInstance, style: ChartStyle) {
    let (cx, cy, alpha) = match instance.focus {
        Some(focus) => (focus.x, focus.y, 1.0),
        None => (0.0, 0.0, 0.0),
    };
    scene.push_circle(
        CanvasLayerKind::Marker,
        CirclePrimitive {
            cx,
            cy,
            radius: style.focus_radius,
            fill_color: style.focus_fill.faded(alpha),
            stroke_width: style.focus_stroke_width,
            stroke_color: style.focus_stroke.faded(alpha),
        },
    );
}

fn push_brush_overlay(
    scene: &mut LayeredScene,
    instance: &ChartInstance,
    viewport: Viewport,
    style: ChartStyle,
) {
    let width = viewport.width_px();
    let height = viewport.height_px();

    scene.push_rect(
        CanvasLayerKind::Brush,
        RectPrimitive::new(0.0, 0.0, width, height, Color::TRANSPARENT),
    );

    if let Some(selection) = instance.interaction.selection() {
        let (left, right) = selection.edges();
        scene.push_rect(
            CanvasLayerKind::Brush,
            RectPrimitive::new(left, 0.0, right - left, height, style.brush_fill)
                .with_border(1.0, style.brush_border),
        );
    }
}

fn within_extent(position: f64, extent: f64) -> bool {
    position >= -TICK_EDGE_EPSILON_PX && position <= extent + TICK_EDGE_EPSILON_PX
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::build_scene;
    use crate::api::ChartEngineConfig;
    use crate::api::chart_instance::{ChartInstance, FocusMarker};
    use crate::core::{Sample, SampleSeries, Viewport};
    use crate::interaction::ChartMode;
    use crate::render::{CanvasLayerKind, CanvasRootId, Paint};

    fn instance(mode: ChartMode, samples: Vec<Sample>) -> ChartInstance {
        let config = ChartEngineConfig::new(Viewport::new(400, 200));
        ChartInstance::new(
            CanvasRootId::new(1),
            SampleSeries::new(samples).expect("valid series"),
            mode,
            "Revenue".to_owned(),
            &config,
            Duration::ZERO,
        )
        .expect("instance")
    }

    fn samples() -> Vec<Sample> {
        vec![
            Sample::new(0.0, 10.0),
            Sample::new(100.0, 50.0),
            Sample::new(200.0, 30.0),
        ]
    }

    #[test]
    fn tooltip_scene_has_gradient_path_bands_and_hidden_marker() {
        let config = ChartEngineConfig::new(Viewport::new(400, 200));
        let instance = instance(ChartMode::Tooltip, samples());
        let scene = build_scene(&instance, &config, Duration::ZERO);

        let series = scene.layer(CanvasLayerKind::Series).expect("series layer");
        assert_eq!(series.paths.len(), 1);
        assert!(matches!(series.paths[0].paint, Paint::Gradient(_)));
        let dash = series.paths[0].dash.expect("reveal dash at start");
        assert_eq!(dash.dash, 0.0);

        let bands = scene.layer(CanvasLayerKind::Interaction).expect("bands");
        assert_eq!(bands.rects.len(), 2);
        assert!(bands.rects.iter().all(|rect| rect.is_invisible()));

        let marker = scene.layer(CanvasLayerKind::Marker).expect("marker");
        assert_eq!(marker.circles[0].fill_color.alpha, 0.0);
        assert!(scene.tooltip.is_some());
        assert!(scene.layer(CanvasLayerKind::Brush).expect("brush").is_empty());
    }

    #[test]
    fn reveal_completes_after_its_duration() {
        let config = ChartEngineConfig::new(Viewport::new(400, 200));
        let instance = instance(ChartMode::Tooltip, samples());
        let scene = build_scene(&instance, &config, Duration::from_millis(3_500));
        let series = scene.layer(CanvasLayerKind::Series).expect("series layer");
        assert_eq!(series.paths[0].dash, None);
    }

    #[test]
    fn brush_scene_is_solid_and_immediate() {
        let config = ChartEngineConfig::new(Viewport::new(400, 200));
        let instance = instance(ChartMode::Brush, samples());
        let scene = build_scene(&instance, &config, Duration::ZERO);

        let series = scene.layer(CanvasLayerKind::Series).expect("series layer");
        assert!(matches!(series.paths[0].paint, Paint::Solid(_)));
        assert_eq!(series.paths[0].dash, None);
        let axis = scene.layer(CanvasLayerKind::Axis).expect("axis layer");
        assert!(axis.lines.iter().all(|line| line.color.alpha == 1.0));
        assert!(scene.layer(CanvasLayerKind::Interaction).expect("bands").is_empty());
        assert_eq!(scene.layer(CanvasLayerKind::Brush).expect("brush").rects.len(), 1);
        assert!(scene.tooltip.is_none());
    }

    #[test]
    fn single_sample_renders_axes_without_path() {
        let config = ChartEngineConfig::new(Viewport::new(400, 200));
        let instance = instance(ChartMode::Tooltip, vec![Sample::new(5.0, 0.0)]);
        let scene = build_scene(&instance, &config, Duration::from_secs(10));

        assert!(scene.layer(CanvasLayerKind::Series).expect("series").is_empty());
        assert!(!scene.layer(CanvasLayerKind::Axis).expect("axis").is_empty());
        scene.flatten().validate().expect("degenerate frame stays valid");
    }

    #[test]
    fn visible_focus_marker_is_opaque() {
        let config = ChartEngineConfig::new(Viewport::new(400, 200));
        let mut instance = instance(ChartMode::Tooltip, samples());
        instance.focus = Some(FocusMarker {
            index: 1,
            sample: Sample::new(100.0, 50.0),
            x: 200.0,
            y: 0.0,
        });
        let scene = build_scene(&instance, &config, Duration::ZERO);
        let marker = scene.layer(CanvasLayerKind::Marker).expect("marker");
        assert_eq!(marker.circles[0].cx, 200.0);
        assert_eq!(marker.circles[0].fill_color.alpha, 1.0);
    }
}
