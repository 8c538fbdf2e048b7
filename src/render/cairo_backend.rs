use cairo::{Context, Format, ImageSurface, LineCap, LineJoin};
use pango::FontDescription;
use std::f64::consts::PI;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasRootId, Color, FrameLayer, Paint, PathPrimitive, RenderFrame, Renderer, TextHAlign,
    TooltipOverlay,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
    pub paths_drawn: usize,
    pub circles_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`, whose
///   surface is what downstream exporters read
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
///
/// The tooltip overlay is not rasterized; it is kept for the host to place
/// outside the canvas.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
    mounted_root: Option<CanvasRootId>,
    tooltip: Option<TooltipOverlay>,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
            mounted_root: None,
            tooltip: None,
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn mounted_root(&self) -> Option<CanvasRootId> {
        self.mounted_root
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipOverlay> {
        self.tooltip.as_ref()
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn clear(&self, context: &Context) -> ChartResult<()> {
        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;
        self.clear(context)?;

        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        context.translate(frame.margin.left, frame.margin.top);

        let mut stats = CairoRenderStats::default();
        for pass in frame.paint_passes() {
            paint_layer(context, frame, &pass, &mut stats)?;
        }

        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;

        self.mounted_root = Some(frame.root);
        self.tooltip = frame.tooltip.clone();
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }

    fn teardown(&mut self, root: CanvasRootId) -> ChartResult<()> {
        if self.mounted_root != Some(root) {
            return Ok(());
        }
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.clear(&context)?;
        self.mounted_root = None;
        self.tooltip = None;
        self.last_stats = CairoRenderStats::default();
        Ok(())
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Paints one layer: strokes, fills, paths, circles, then text.
fn paint_layer(
    context: &Context,
    frame: &RenderFrame,
    pass: &FrameLayer,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    for line in frame.lines.get(pass.lines.clone()).unwrap_or_default() {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }

    for rect in frame
        .rects
        .get(pass.rects.clone())
        .unwrap_or_default()
        .iter()
        .filter(|rect| !rect.is_invisible())
    {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        apply_color(context, rect.fill_color);
        if rect.border_width > 0.0 {
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            apply_color(context, rect.border_color);
            context.set_line_width(rect.border_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
        } else {
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        }
        stats.rects_drawn += 1;
    }

    for path in frame.paths.get(pass.paths.clone()).unwrap_or_default() {
        stroke_path(context, frame, path)?;
        stats.paths_drawn += 1;
    }

    for circle in frame.circles.get(pass.circles.clone()).unwrap_or_default() {
        context.new_path();
        context.arc(circle.cx, circle.cy, circle.radius, 0.0, 2.0 * PI);
        apply_color(context, circle.fill_color);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill circle", err))?;
        apply_color(context, circle.stroke_color);
        context.set_line_width(circle.stroke_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke circle", err))?;
        stats.circles_drawn += 1;
    }

    for text in frame.texts.get(pass.texts.clone()).unwrap_or_default() {
        let layout = pangocairo::functions::create_layout(context);
        let font_description =
            FontDescription::from_string(&format!("Sans {}", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, _text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };

        apply_color(context, text.color);
        context.move_to(x, text.y);
        pangocairo::functions::show_layout(context, &layout);
        stats.texts_drawn += 1;
    }
    Ok(())
}

fn stroke_path(context: &Context, frame: &RenderFrame, path: &PathPrimitive) -> ChartResult<()> {
    let Some(((first_x, first_y), rest)) = path.points.split_first() else {
        return Ok(());
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    if path.clipped {
        context.rectangle(
            frame.clip.x,
            frame.clip.y,
            frame.clip.width,
            frame.clip.height,
        );
        context.clip();
    }

    context.new_path();
    context.move_to(*first_x, *first_y);
    for (x, y) in rest {
        context.line_to(*x, *y);
    }

    context.set_line_width(path.stroke_width);
    if path.round_joins {
        context.set_line_join(LineJoin::Round);
        context.set_line_cap(LineCap::Round);
    }
    match path.dash {
        Some(dash) if dash.dash <= 0.0 => {
            // Nothing revealed yet.
            context.new_path();
        }
        Some(dash) => context.set_dash(&[dash.dash, dash.gap.max(f64::MIN_POSITIVE)], 0.0),
        None => context.set_dash(&[], 0.0),
    }

    match &path.paint {
        Paint::Solid(color) => apply_color(context, *color),
        Paint::Gradient(gradient) => {
            let pattern = cairo::LinearGradient::new(gradient.x1, gradient.y1, gradient.x2, gradient.y2);
            for stop in &gradient.stops {
                pattern.add_color_stop_rgba(
                    stop.offset,
                    stop.color.red,
                    stop.color.green,
                    stop.color.blue,
                    stop.color.alpha,
                );
            }
            context
                .set_source(&pattern)
                .map_err(|err| map_backend_error("failed to set gradient source", err))?;
        }
    }

    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke path", err))?;
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
