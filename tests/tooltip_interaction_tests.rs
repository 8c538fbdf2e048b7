use approx::assert_relative_eq;
use brushline::api::{ChartEngine, ChartEngineConfig};
use brushline::core::{Sample, datetime_to_unix_seconds};
use brushline::interaction::{ChartMode, InteractionPhase};
use brushline::render::NullRenderer;
use chrono::{TimeZone, Utc};

fn date(year: i32, month: u32, day: u32) -> f64 {
    datetime_to_unix_seconds(
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .expect("valid date"),
    )
}

fn tooltip_engine() -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default())
        .expect("engine init");
    engine
        .create(
            vec![
                Sample::new(date(2020, 1, 1), 10.0),
                Sample::new(date(2020, 6, 1), 50.0),
                Sample::new(date(2021, 1, 1), 30.0),
            ],
            ChartMode::Tooltip,
            "Revenue",
        )
        .expect("create chart");
    engine
}

#[test]
fn hovering_june_reports_its_sample_and_places_the_marker() {
    let mut engine = tooltip_engine();
    let june_x = engine.time_to_x(date(2020, 6, 1)).expect("time to x");

    let focus = engine
        .pointer_move(june_x, 300.0)
        .expect("pointer move")
        .expect("pointer over hover surface");

    assert_eq!(focus.sample.value, 50.0);
    assert_eq!(focus.index, 1);
    assert_relative_eq!(focus.x, june_x);
    assert_relative_eq!(focus.y, engine.value_to_y(50.0).expect("value to y"));
    assert_eq!(focus.y, 0.0);
    assert_eq!(engine.phase(), Some(InteractionPhase::Hovering));

    let tooltip = engine.tooltip().expect("tooltip overlay");
    assert!(tooltip.is_visible());
    assert_eq!(tooltip.date_text, "Jun 1, 2020");
    assert_eq!(tooltip.value_text, "50.00");
    assert_relative_eq!(tooltip.opacity, 0.9);

    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    let marker = frame.circles.first().expect("focus marker");
    assert_relative_eq!(marker.cx, june_x);
    assert_eq!(marker.cy, 0.0);
    assert_eq!(marker.fill_color.alpha, 1.0);
}

#[test]
fn tooltip_anchors_at_page_coordinates() {
    let mut engine = tooltip_engine();
    engine
        .pointer_move(400.0, 120.0)
        .expect("pointer move")
        .expect("hit");
    let tooltip = engine.tooltip().expect("tooltip");
    let margin = engine.config().margin;
    assert_eq!(tooltip.page_x, 400.0 + margin.left);
    assert_eq!(tooltip.page_y, 120.0 + margin.top);

    engine
        .pointer_move_at_page(400.0, 120.0, 1_000.0, 900.0)
        .expect("pointer move at page");
    let tooltip = engine.tooltip().expect("tooltip");
    assert_eq!((tooltip.page_x, tooltip.page_y), (1_000.0, 900.0));
}

#[test]
fn pointer_snaps_to_closest_sample_between_pairs() {
    let mut engine = tooltip_engine();
    let jan_x = engine.time_to_x(date(2020, 1, 1)).expect("x");
    let june_x = engine.time_to_x(date(2020, 6, 1)).expect("x");

    let near_start = jan_x + (june_x - jan_x) * 0.25;
    let focus = engine
        .pointer_move(near_start, 10.0)
        .expect("move")
        .expect("hit");
    assert_eq!(focus.sample.value, 10.0);

    let near_june = jan_x + (june_x - jan_x) * 0.75;
    let focus = engine
        .pointer_move(near_june, 10.0)
        .expect("move")
        .expect("hit");
    assert_eq!(focus.sample.value, 50.0);
}

#[test]
fn leave_hides_marker_and_tooltip_without_removing_them() {
    let mut engine = tooltip_engine();
    engine.pointer_move(600.0, 300.0).expect("move");
    engine.pointer_leave().expect("leave");

    assert_eq!(engine.phase(), Some(InteractionPhase::Idle));
    assert!(engine.focus().is_none());
    let tooltip = engine.tooltip().expect("overlay still mounted");
    assert_eq!(tooltip.opacity, 0.0);
    assert!(!tooltip.is_visible());
    assert_eq!(engine.renderer().live_tooltip_overlays(), 1);

    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.circles.len(), 1);
    assert_eq!(frame.circles[0].fill_color.alpha, 0.0);
}

#[test]
fn moving_off_the_hover_surface_counts_as_leave() {
    let mut engine = tooltip_engine();
    engine.pointer_move(600.0, 300.0).expect("move");

    let outside = engine.pointer_move(600.0, -25.0).expect("move into margin");
    assert!(outside.is_none());
    assert!(engine.focus().is_none());
    assert_eq!(engine.tooltip().map(|tooltip| tooltip.opacity), Some(0.0));
}

#[test]
fn brush_gestures_are_ignored_in_tooltip_mode() {
    let mut engine = tooltip_engine();
    assert!(!engine.brush_start(100.0).expect("brush start"));
    assert!(!engine.brush_move(300.0).expect("brush move"));
    let full = engine.time_full_range();
    assert_eq!(engine.time_visible_range(), full);
}

#[test]
fn pointer_resolves_to_the_pair_band_it_covers() {
    let mut engine = tooltip_engine();
    let june_x = engine.time_to_x(date(2020, 6, 1)).expect("x");

    let first = engine
        .hover_band_at(june_x * 0.75, 200.0)
        .expect("hit test")
        .expect("first band");
    assert_eq!(first.start_index, 0);
    assert_eq!(first.x, 0.0);
    assert_relative_eq!(first.width, june_x);

    let second = engine
        .hover_band_at(june_x + 10.0, 200.0)
        .expect("hit test")
        .expect("second band");
    assert_eq!(second.start_index, 1);
    assert_relative_eq!(second.x + second.width, 1_200.0);

    assert!(engine.hover_band_at(june_x, -1.0).expect("hit test").is_none());
    assert!(engine.hover_band_at(1_200.5, 200.0).expect("hit test").is_none());

    // The focused sample always belongs to the hovered pair.
    let focus = engine
        .pointer_move(june_x + 10.0, 200.0)
        .expect("move")
        .expect("hit");
    assert_eq!(focus.index, 1);
    let focus = engine
        .pointer_move(1_190.0, 200.0)
        .expect("move")
        .expect("hit");
    assert_eq!(focus.index, 2);
    assert_eq!(focus.sample.value, 30.0);
}

#[test]
fn brush_mode_has_no_hover_bands() {
    let mut engine = tooltip_engine();
    engine
        .create(
            vec![Sample::new(0.0, 1.0), Sample::new(10.0, 2.0)],
            ChartMode::Brush,
            "Volume",
        )
        .expect("recreate as brush");
    assert!(engine.hover_band_at(600.0, 200.0).expect("hit test").is_none());
}
