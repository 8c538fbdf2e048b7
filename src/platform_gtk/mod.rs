use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::ChartEngine;
use crate::core::CanvasSize;
use crate::error::ChartResult;
use crate::render::{CairoContextRenderer, Renderer, TooltipOverlay};

type SharedEngine<R> = Rc<RefCell<ChartEngine<R>>>;
type TooltipHook = Rc<RefCell<Option<Box<dyn Fn(Option<&TooltipOverlay>)>>>>;

/// Hosts a [`ChartEngine`] inside a GTK `DrawingArea`.
///
/// The adapter wires motion, drag, click and frame-clock callbacks into the
/// engine. The tooltip is not painted on the canvas; hosts receive it through
/// [`GtkChartAdapter::set_tooltip_hook`] and place their own widget.
pub struct GtkChartAdapter<R: Renderer + CairoContextRenderer + 'static> {
    drawing_area: gtk::DrawingArea,
    engine: SharedEngine<R>,
    tooltip_hook: TooltipHook,
}

impl<R: Renderer + CairoContextRenderer + 'static> GtkChartAdapter<R> {
    #[must_use]
    pub fn new(engine: ChartEngine<R>) -> Self {
        let canvas = CanvasSize::from_viewport(engine.viewport(), engine.config().margin);
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(canvas.width.ceil() as i32);
        drawing_area.set_content_height(canvas.height.ceil() as i32);

        let adapter = Self {
            drawing_area,
            engine: Rc::new(RefCell::new(engine)),
            tooltip_hook: Rc::new(RefCell::new(None)),
        };
        adapter.attach_draw_func();
        adapter.attach_frame_clock();
        adapter.attach_pointer_controllers();
        adapter.attach_brush_controllers();
        adapter
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn engine(&self) -> SharedEngine<R> {
        Rc::clone(&self.engine)
    }

    /// Called with the current tooltip after every pointer event.
    pub fn set_tooltip_hook<F>(&self, hook: F)
    where
        F: Fn(Option<&TooltipOverlay>) + 'static,
    {
        *self.tooltip_hook.borrow_mut() = Some(Box::new(hook));
    }

    fn attach_draw_func(&self) {
        let engine = Rc::clone(&self.engine);
        self.drawing_area
            .set_draw_func(move |_, context, _width, _height| {
                let Ok(mut chart) = engine.try_borrow_mut() else {
                    return;
                };
                if !chart.has_chart() {
                    return;
                }
                if let Err(err) = chart.render_on_cairo_context(context) {
                    warn!(error = %err, "chart draw failed");
                }
            });
    }

    fn attach_frame_clock(&self) {
        let engine = Rc::clone(&self.engine);
        self.drawing_area.add_tick_callback(move |area, clock| {
            let now = Duration::from_micros(clock.frame_time().max(0) as u64);
            if let Ok(mut chart) = engine.try_borrow_mut() {
                match chart.tick(now) {
                    Ok(true) => area.queue_draw(),
                    Ok(false) => {}
                    Err(err) => warn!(error = %err, "chart tick failed"),
                }
            }
            gtk::glib::ControlFlow::Continue
        });
    }

    fn attach_pointer_controllers(&self) {
        let motion = gtk::EventControllerMotion::new();
        {
            let engine = Rc::clone(&self.engine);
            let hook = Rc::clone(&self.tooltip_hook);
            let drawing_area = self.drawing_area.clone();
            motion.connect_motion(move |_, x, y| {
                with_chart(&engine, &hook, |chart| {
                    let (plot_x, plot_y) = chart.canvas_to_plot(x, y);
                    chart.pointer_move_at_page(plot_x, plot_y, x, y).map(|_| ())
                });
                drawing_area.queue_draw();
            });
        }
        {
            let engine = Rc::clone(&self.engine);
            let hook = Rc::clone(&self.tooltip_hook);
            let drawing_area = self.drawing_area.clone();
            motion.connect_leave(move |_| {
                with_chart(&engine, &hook, ChartEngine::pointer_leave);
                drawing_area.queue_draw();
            });
        }
        self.drawing_area.add_controller(motion);

        let click = gtk::GestureClick::new();
        {
            let engine = Rc::clone(&self.engine);
            let hook = Rc::clone(&self.tooltip_hook);
            let drawing_area = self.drawing_area.clone();
            click.connect_pressed(move |_, n_press, _x, _y| {
                if n_press != 2 {
                    return;
                }
                with_chart(&engine, &hook, |chart| {
                    chart.double_click(monotonic_now()).map(|_| ())
                });
                drawing_area.queue_draw();
            });
        }
        self.drawing_area.add_controller(click);
    }

    fn attach_brush_controllers(&self) {
        let drag = gtk::GestureDrag::new();
        let anchor_x = Rc::new(Cell::new(0.0));
        {
            let engine = Rc::clone(&self.engine);
            let hook = Rc::clone(&self.tooltip_hook);
            let drawing_area = self.drawing_area.clone();
            let anchor_x = Rc::clone(&anchor_x);
            drag.connect_drag_begin(move |_, start_x, start_y| {
                anchor_x.set(start_x);
                with_chart(&engine, &hook, |chart| {
                    let (plot_x, _) = chart.canvas_to_plot(start_x, start_y);
                    chart.brush_start(plot_x).map(|_| ())
                });
                drawing_area.queue_draw();
            });
        }
        {
            let engine = Rc::clone(&self.engine);
            let hook = Rc::clone(&self.tooltip_hook);
            let drawing_area = self.drawing_area.clone();
            let anchor_x = Rc::clone(&anchor_x);
            drag.connect_drag_update(move |_, offset_x, _offset_y| {
                with_chart(&engine, &hook, |chart| {
                    let (plot_x, _) = chart.canvas_to_plot(anchor_x.get() + offset_x, 0.0);
                    chart.brush_move(plot_x).map(|_| ())
                });
                drawing_area.queue_draw();
            });
        }
        {
            let engine = Rc::clone(&self.engine);
            let hook = Rc::clone(&self.tooltip_hook);
            let drawing_area = self.drawing_area.clone();
            drag.connect_drag_end(move |_, _offset_x, _offset_y| {
                with_chart(&engine, &hook, |chart| {
                    chart.brush_end(monotonic_now()).map(|_| ())
                });
                drawing_area.queue_draw();
            });
        }
        self.drawing_area.add_controller(drag);
    }
}

/// Runs `action` on the chart if one exists and reports the tooltip after.
fn with_chart<R, F>(engine: &SharedEngine<R>, hook: &TooltipHook, action: F)
where
    R: Renderer,
    F: FnOnce(&mut ChartEngine<R>) -> ChartResult<()>,
{
    let Ok(mut chart) = engine.try_borrow_mut() else {
        return;
    };
    if !chart.has_chart() {
        return;
    }
    if let Err(err) = action(&mut *chart) {
        warn!(error = %err, "chart interaction failed");
    }
    if let Some(hook) = hook.borrow().as_ref() {
        hook(chart.tooltip());
    }
}

/// Same time base as the frame clock, so the idle timer and transitions agree.
fn monotonic_now() -> Duration {
    Duration::from_micros(gtk::glib::monotonic_time().max(0) as u64)
}
