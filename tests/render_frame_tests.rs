use std::time::Duration;

use brushline::api::{ChartEngine, ChartEngineConfig};
use brushline::core::Sample;
use brushline::interaction::ChartMode;
use brushline::render::{CanvasLayerKind, Color, NullRenderer, Paint, RenderFrame};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn engine_with(mode: ChartMode, label: &str) -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default())
        .expect("engine init");
    engine
        .create(
            vec![
                Sample::new(1_577_836_800.0, 10.0),
                Sample::new(1_590_969_600.0, 50.0),
                Sample::new(1_609_459_200.0, 30.0),
            ],
            mode,
            label,
        )
        .expect("create chart");
    engine
}

fn last_frame(engine: &ChartEngine<NullRenderer>) -> &RenderFrame {
    engine.renderer().last_frame.as_ref().expect("rendered frame")
}

fn texts(frame: &RenderFrame) -> Vec<&str> {
    frame.texts.iter().map(|text| text.text.as_str()).collect()
}

#[test]
fn tooltip_chart_fades_axes_and_reveals_path_over_time() {
    let mut engine = engine_with(ChartMode::Tooltip, "Revenue");

    let frame = last_frame(&engine);
    assert!(frame.lines.iter().all(|line| line.color.alpha == 0.0));
    let path = frame.paths.first().expect("series path");
    assert_eq!(path.dash.map(|dash| dash.dash), Some(0.0));

    assert!(engine.tick(ms(250)).expect("tick during fade"));
    let frame = last_frame(&engine);
    let axis_alpha = frame.lines[0].color.alpha;
    assert!(axis_alpha > 0.0 && axis_alpha < 1.0);
    let dash = frame.paths[0].dash.expect("still revealing");
    assert!(dash.dash > 0.0 && dash.dash < dash.gap);

    assert!(engine.tick(ms(4_000)).expect("tick after reveal"));
    let frame = last_frame(&engine);
    assert!(frame.lines.iter().all(|line| line.color.alpha == 1.0));
    assert!(frame.paths[0].dash.is_none());

    assert!(!engine.tick(ms(5_000)).expect("idle tick"));
}

#[test]
fn create_at_starts_the_reveal_at_the_given_time() {
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default())
        .expect("engine init");
    engine
        .create_at(
            vec![Sample::new(0.0, 10.0), Sample::new(86_400.0, 50.0)],
            ChartMode::Tooltip,
            "Revenue",
            ms(10_000),
        )
        .expect("create chart");
    let path = &last_frame(&engine).paths[0];
    assert_eq!(path.dash.map(|dash| dash.dash), Some(0.0));

    assert!(engine.tick(ms(10_250)).expect("tick during reveal"));
    let frame = last_frame(&engine);
    let dash = frame.paths[0].dash.expect("still revealing");
    assert!(dash.dash > 0.0 && dash.dash < dash.gap);
    let axis_alpha = frame.lines[0].color.alpha;
    assert!(axis_alpha > 0.0 && axis_alpha < 1.0);
}

#[test]
fn tooltip_stroke_is_a_vertical_value_gradient() {
    let engine = engine_with(ChartMode::Tooltip, "Revenue");
    let path = &last_frame(&engine).paths[0];

    let Paint::Gradient(gradient) = &path.paint else {
        panic!("expected gradient stroke, got {:?}", path.paint);
    };
    assert_eq!((gradient.y1, gradient.y2), (600.0, 0.0));
    assert_eq!(gradient.stops.len(), 2);
    assert_eq!(gradient.stops[0].color, Color::RED);
    assert_eq!(gradient.stops[1].color, Color::BLUE);
    assert!(path.round_joins);
    assert!(path.clipped);
}

#[test]
fn brush_chart_draws_solid_path_and_opaque_axes_immediately() {
    let engine = engine_with(ChartMode::Brush, "Volume");
    let frame = last_frame(&engine);

    assert!(frame.lines.iter().all(|line| line.color.alpha == 1.0));
    assert!(matches!(frame.paths[0].paint, Paint::Solid(_)));
    assert!(frame.paths[0].dash.is_none());
    assert!(frame.circles.is_empty());
    assert!(frame.tooltip.is_none());
}

#[test]
fn frame_carries_label_and_axis_ticks() {
    let engine = engine_with(ChartMode::Tooltip, "Revenue");
    let frame = last_frame(&engine);
    let labels = texts(frame);

    assert_eq!(labels.iter().filter(|text| **text == "Revenue").count(), 1);
    assert!(labels.contains(&"0"));
    assert!(labels.contains(&"50"));
    assert!(labels.contains(&"2020"));
    assert!(labels.contains(&"June"));
    assert!(labels.contains(&"2021"));

    let label = frame
        .texts
        .iter()
        .find(|text| text.text == "Revenue")
        .expect("axis label");
    assert_eq!(label.x, -20.0);
    assert!(label.y < 0.0);
}

#[test]
fn empty_label_draws_no_label_text() {
    let engine = engine_with(ChartMode::Brush, "");
    let frame = last_frame(&engine);
    assert!(frame.texts.iter().all(|text| !text.text.is_empty()));
    assert!(frame.texts.iter().all(|text| text.x != -20.0));
}

#[test]
fn clip_region_matches_viewport() {
    let engine = engine_with(ChartMode::Tooltip, "Revenue");
    let frame = last_frame(&engine);

    assert_eq!(
        (frame.clip.x, frame.clip.y, frame.clip.width, frame.clip.height),
        (0.0, 0.0, 1200.0, 600.0)
    );
    frame.validate().expect("frame validates");
}

#[test]
fn tooltip_mode_has_one_hover_band_per_sample_pair() {
    let engine = engine_with(ChartMode::Tooltip, "Revenue");
    let frame = last_frame(&engine);

    assert_eq!(frame.rects.len(), 2);
    assert!(frame.rects.iter().all(|rect| rect.is_invisible()));
    assert_eq!(frame.rects[0].x, 0.0);
    let last = frame.rects[1];
    assert!((last.x + last.width - 1200.0).abs() < 1e-9);
}

#[test]
fn hover_marker_paints_in_the_bottom_layer() {
    let mut engine = engine_with(ChartMode::Tooltip, "Revenue");
    engine.pointer_move(600.0, 100.0).expect("hover");
    let frame = last_frame(&engine);

    assert_eq!(frame.circles.len(), 1);
    assert_eq!(frame.circles[0].fill_color.alpha, 1.0);
    assert_eq!(frame.tooltip.as_ref().map(|tooltip| tooltip.opacity), Some(0.9));

    let passes = frame.paint_passes();
    let marker_pass = passes
        .iter()
        .position(|pass| !pass.circles.is_empty())
        .expect("marker pass");
    let series_pass = passes
        .iter()
        .position(|pass| !pass.paths.is_empty())
        .expect("series pass");
    assert_eq!(Some(marker_pass), frame.paint_position(CanvasLayerKind::Marker));
    assert!(marker_pass < series_pass);
}

#[test]
fn brush_selection_paints_after_the_series_path() {
    let mut engine = engine_with(ChartMode::Brush, "Volume");
    engine.brush_start(100.0).expect("brush start");
    engine.brush_move(300.0).expect("brush move");
    let frame = last_frame(&engine);

    let passes = frame.paint_passes();
    let series_pass = passes
        .iter()
        .position(|pass| !pass.paths.is_empty())
        .expect("series pass");
    let selection_pass = passes
        .iter()
        .position(|pass| pass.rects.clone().any(|index| !frame.rects[index].is_invisible()))
        .expect("selection pass");

    assert!(selection_pass > series_pass);
    assert_eq!(Some(selection_pass), frame.paint_position(CanvasLayerKind::Brush));
    assert_eq!(Some(series_pass), frame.paint_position(CanvasLayerKind::Series));
}
