use std::rc::Rc;
use std::time::Duration;

use brushline::api::{ChartEngine, ChartEngineConfig};
use brushline::core::Sample;
use brushline::interaction::ChartMode;
use brushline::platform_gtk::GtkChartAdapter;
use brushline::render::CairoRenderer;
use gtk4 as gtk;
use gtk4::prelude::*;

const DAY_SECONDS: f64 = 86_400.0;
/// 2020-01-01T00:00:00Z.
const START_SECONDS: f64 = 1_577_836_800.0;

fn main() {
    let _ = brushline::telemetry::init_default_tracing();
    let app = gtk::Application::builder()
        .application_id("rs.brushline.demos.gtk_revenue_chart")
        .build();
    app.connect_activate(build_ui);
    app.run();
}

fn build_ui(app: &gtk::Application) {
    let config = ChartEngineConfig::default();
    let renderer = match CairoRenderer::new(
        (f64::from(config.viewport.width) + config.margin.left + config.margin.right) as i32,
        (f64::from(config.viewport.height) + config.margin.top + config.margin.bottom) as i32,
    ) {
        Ok(renderer) => renderer,
        Err(err) => {
            eprintln!("failed to create renderer: {err}");
            return;
        }
    };
    let engine = match ChartEngine::new(renderer, config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("failed to initialize chart engine: {err}");
            return;
        }
    };

    let adapter = GtkChartAdapter::new(engine);
    let engine = adapter.engine();

    let tooltip = gtk::Label::new(None);
    tooltip.set_halign(gtk::Align::Start);
    tooltip.set_valign(gtk::Align::Start);
    tooltip.set_can_target(false);
    tooltip.set_opacity(0.0);
    adapter.set_tooltip_hook({
        let tooltip = tooltip.clone();
        move |overlay| {
            let Some(overlay) = overlay else {
                tooltip.set_opacity(0.0);
                return;
            };
            tooltip.set_text(&format!("{}\n{}", overlay.date_text, overlay.value_text));
            tooltip.set_margin_start(overlay.page_x as i32 + 12);
            tooltip.set_margin_top(overlay.page_y as i32 - 28);
            tooltip.set_opacity(overlay.opacity);
            tooltip.set_visible(overlay.is_visible());
        }
    });

    let overlay = gtk::Overlay::new();
    overlay.set_child(Some(adapter.drawing_area()));
    overlay.add_overlay(&tooltip);

    let samples = build_revenue_samples(366);
    let create = {
        let engine = Rc::clone(&engine);
        let drawing_area = adapter.drawing_area().clone();
        let samples = samples.clone();
        move |mode: ChartMode| {
            if let Ok(mut chart) = engine.try_borrow_mut() {
                if let Err(err) = chart.create_at(samples.clone(), mode, "Revenue", monotonic_now()) {
                    eprintln!("failed to create chart: {err}");
                }
            }
            drawing_area.queue_draw();
        }
    };
    create(ChartMode::Tooltip);

    let brush_toggle = gtk::ToggleButton::with_label("Brush Mode");
    brush_toggle.connect_toggled(move |button| {
        let mode = if button.is_active() {
            ChartMode::Brush
        } else {
            ChartMode::Tooltip
        };
        create(mode);
    });

    let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
    root.append(&brush_toggle);
    root.append(&overlay);

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .title("brushline revenue chart")
        .child(&root)
        .build();
    window.present();
}

fn build_revenue_samples(days: usize) -> Vec<Sample> {
    (0..days)
        .map(|day| {
            let t = day as f64;
            let seasonal = (t / 58.0).sin() * 180.0;
            let weekly = (t / 7.0 * std::f64::consts::TAU).cos() * 35.0;
            let trend = t * 1.6;
            Sample::new(START_SECONDS + t * DAY_SECONDS, (900.0 + trend + seasonal + weekly).max(0.0))
        })
        .collect()
}

fn monotonic_now() -> Duration {
    Duration::from_micros(gtk::glib::monotonic_time().max(0) as u64)
}
